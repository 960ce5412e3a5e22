/// Opaque handle used to reference textures owned by the rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) u32);

/// RGBA color, components in `0.0..=1.0`.
pub type Color = [f32; 4];
