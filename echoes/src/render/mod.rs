mod animation;
mod renderer;
mod sprite;

pub use animation::{Animation, AnimationFrame, AnimationId, Visual};
pub use renderer::{CommandBuffer, DrawCommand, Renderer};
pub use sprite::{Color, TextureHandle};
pub use crate::math::{Rect, Vec2};
