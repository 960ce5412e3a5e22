use crate::assets::AssetManager;
use crate::math::{Rect, Vec2};

use super::renderer::Renderer;
use super::sprite::TextureHandle;

/// A single frame of an animation.
#[derive(Clone, Debug)]
pub struct AnimationFrame {
    /// The texture to use for this frame.
    pub texture: TextureHandle,
    /// Source rectangle in texture pixels.
    pub source: Rect,
    /// How long this frame lasts in seconds.
    pub duration: f32,
}

impl AnimationFrame {
    pub fn new(texture: TextureHandle, source: Rect, duration: f32) -> Self {
        Self {
            texture,
            source,
            duration,
        }
    }
}

/// An animation sequence consisting of multiple frames.
#[derive(Clone, Debug)]
pub struct Animation {
    pub frames: Vec<AnimationFrame>,
    pub looping: bool,
    pub total_duration: f32,
}

impl Animation {
    pub fn new(frames: Vec<AnimationFrame>, looping: bool) -> Self {
        let total_duration = frames.iter().map(|f| f.duration).sum();
        Self {
            frames,
            looping,
            total_duration,
        }
    }

    /// Create a looping animation from a horizontal strip of equally sized
    /// frames starting at the texture's top-left corner.
    pub fn from_strip(
        texture: TextureHandle,
        frame_size: (i32, i32),
        frame_count: usize,
        frame_duration: f32,
    ) -> Self {
        let (w, h) = frame_size;
        let frames = (0..frame_count)
            .map(|i| AnimationFrame::new(texture, Rect::new(i as i32 * w, 0, w, h), frame_duration))
            .collect();
        Self::new(frames, true)
    }
}

/// Handle to an animation owned by the `AssetManager`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationId(pub(crate) u32);

/// The drawable half of an actor: which animation is playing, where in it we
/// are, and the on-screen rectangle.
///
/// The rectangle size is fixed when the visual is created; `follow` only
/// moves its origin.
#[derive(Clone, Debug)]
pub struct Visual {
    animation: AnimationId,
    current_frame_index: usize,
    timer: f32,
    playing: bool,
    dest: Rect,
}

impl Visual {
    pub fn new(animation: AnimationId, width: i32, height: i32) -> Self {
        Self {
            animation,
            current_frame_index: 0,
            timer: 0.0,
            playing: true,
            dest: Rect::new(0, 0, width, height),
        }
    }

    pub fn animation(&self) -> AnimationId {
        self.animation
    }

    /// Switch animation. Re-selecting the current one keeps its progress.
    pub fn set_animation(&mut self, animation: AnimationId) {
        if self.animation != animation {
            self.animation = animation;
            self.reset();
        }
    }

    pub fn dest(&self) -> Rect {
        self.dest
    }

    /// Move the rectangle origin to the truncated position.
    pub fn follow(&mut self, position: Vec2) {
        self.dest.x = position.x as i32;
        self.dest.y = position.y as i32;
    }

    pub fn update(&mut self, dt: f32, assets: &AssetManager) {
        let Some(animation) = assets.animation(self.animation) else {
            return;
        };
        if !self.playing || animation.frames.is_empty() {
            return;
        }
        // The animation may have been replaced by a shorter one.
        if self.current_frame_index >= animation.frames.len() {
            self.reset();
        }

        self.timer += dt;

        // Large frame times may cross several frames at once.
        loop {
            let frame = &animation.frames[self.current_frame_index];
            if frame.duration <= 0.0 || self.timer < frame.duration {
                break;
            }
            self.timer -= frame.duration;
            self.current_frame_index += 1;

            if self.current_frame_index >= animation.frames.len() {
                if animation.looping {
                    self.current_frame_index = 0;
                } else {
                    self.current_frame_index = animation.frames.len() - 1;
                    self.playing = false;
                    break;
                }
            }
        }
    }

    pub fn current_frame<'a>(&self, assets: &'a AssetManager) -> Option<&'a AnimationFrame> {
        assets
            .animation(self.animation)
            .and_then(|a| a.frames.get(self.current_frame_index))
    }

    pub fn frame_index(&self) -> usize {
        self.current_frame_index
    }

    /// Reset animation to start.
    pub fn reset(&mut self) {
        self.current_frame_index = 0;
        self.timer = 0.0;
        self.playing = true;
    }

    /// Draw the current frame at `dest`; nothing is drawn for an empty animation.
    pub fn render(&self, renderer: &mut dyn Renderer, assets: &AssetManager) {
        if let Some(frame) = self.current_frame(assets) {
            renderer.draw_sprite(frame.texture, frame.source, self.dest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_frame_assets() -> (AssetManager, AnimationId) {
        let mut assets = AssetManager::new();
        let tex = assets.texture("walk.png");
        let id = assets.insert_animation("walk", Animation::from_strip(tex, (16, 16), 2, 0.1));
        (assets, id)
    }

    #[test]
    fn advances_and_loops() {
        let (assets, id) = two_frame_assets();
        let mut visual = Visual::new(id, 16, 16);

        visual.update(0.05, &assets);
        assert_eq!(visual.frame_index(), 0);
        visual.update(0.06, &assets);
        assert_eq!(visual.frame_index(), 1);
        visual.update(0.1, &assets);
        assert_eq!(visual.frame_index(), 0);
    }

    #[test]
    fn long_frame_skips_frames() {
        let (assets, id) = two_frame_assets();
        let mut visual = Visual::new(id, 16, 16);
        visual.update(0.25, &assets);
        assert_eq!(visual.frame_index(), 0);
        assert_eq!(
            visual.current_frame(&assets).unwrap().source,
            Rect::new(0, 0, 16, 16)
        );
    }

    #[test]
    fn survives_animation_shrinking_under_it() {
        let mut assets = AssetManager::new();
        let tex = assets.texture("walk.png");
        let id = assets.insert_animation("walk", Animation::from_strip(tex, (16, 16), 3, 0.1));
        let mut visual = Visual::new(id, 16, 16);
        visual.update(0.25, &assets);
        assert_eq!(visual.frame_index(), 2);

        assets.insert_animation("walk", Animation::from_strip(tex, (16, 16), 1, 0.1));
        assert!(visual.current_frame(&assets).is_none());
        visual.update(0.01, &assets);
        assert_eq!(visual.frame_index(), 0);
        assert!(visual.current_frame(&assets).is_some());
    }

    #[test]
    fn follow_truncates_and_keeps_size() {
        let (_, id) = two_frame_assets();
        let mut visual = Visual::new(id, 20, 30);
        visual.follow(Vec2::new(10.9, 5.2));
        assert_eq!(visual.dest(), Rect::new(10, 5, 20, 30));
    }
}
