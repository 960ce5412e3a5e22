use crate::math::{Rect, Vec2};

use super::sprite::{Color, TextureHandle};

/// Drawing surface the simulation renders into.
///
/// Backends own textures and the window; the simulation only issues draw
/// calls in painter's order between `clear` and `present`.
pub trait Renderer {
    fn clear(&mut self);

    /// Copy `source` (texture pixels) of `texture` into `dest` (screen pixels).
    fn draw_sprite(&mut self, texture: TextureHandle, source: Rect, dest: Rect);

    /// Stroke a circle outline.
    fn draw_ring(&mut self, center: Vec2, radius: f32, color: Color);

    fn present(&mut self);
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Sprite {
        texture: TextureHandle,
        source: Rect,
        dest: Rect,
    },
    Ring {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Present,
}

/// Renderer that records every call instead of drawing.
///
/// Used by the headless driver and by tests that check draw order.
#[derive(Clone, Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
    frames_presented: u64,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of `present` calls since creation.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Drop recorded commands, keeping the frame counter.
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Renderer for CommandBuffer {
    fn clear(&mut self) {
        // A new frame starts; keep only what this frame draws.
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_sprite(&mut self, texture: TextureHandle, source: Rect, dest: Rect) {
        self.commands.push(DrawCommand::Sprite {
            texture,
            source,
            dest,
        });
    }

    fn draw_ring(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Ring {
            center,
            radius,
            color,
        });
    }

    fn present(&mut self) {
        self.commands.push(DrawCommand::Present);
        self.frames_presented += 1;
        log::trace!(
            "frame {} presented with {} draw calls",
            self.frames_presented,
            self.commands.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_starts_a_fresh_frame() {
        let mut buf = CommandBuffer::new();
        buf.draw_ring(Vec2::ZERO, 4.0, [1.0; 4]);
        buf.present();
        buf.clear();
        buf.draw_sprite(TextureHandle(3), Rect::new(0, 0, 8, 8), Rect::new(1, 2, 8, 8));
        buf.present();

        assert_eq!(buf.frames_presented(), 2);
        assert_eq!(buf.commands().len(), 3);
        assert_eq!(buf.commands()[0], DrawCommand::Clear);
        assert!(matches!(buf.commands()[1], DrawCommand::Sprite { texture, .. } if texture == TextureHandle(3)));
    }
}
