use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::math::Rect;
use crate::render::{Animation, AnimationFrame, AnimationId, TextureHandle};

/// Handle to a sound clip owned by the `AssetManager`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SoundId(pub(crate) u32);

/// A sound effect or music track on disk. Decoding happens in the audio backend.
#[derive(Clone, Debug, PartialEq)]
pub struct SoundClip {
    pub name: String,
    pub path: PathBuf,
}

/// Owns every texture name, animation and sound clip used by a session.
///
/// Actors only keep `AnimationId`/`SoundId` handles into this table, so
/// dropping an actor never frees asset data.
pub struct AssetManager {
    textures: HashMap<String, TextureHandle>,
    next_texture_id: u32,
    animations: Vec<Animation>,
    animation_names: HashMap<String, AnimationId>,
    sounds: Vec<SoundClip>,
    sound_names: HashMap<String, SoundId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    #[serde(default)]
    sounds: HashMap<String, PathBuf>,
    #[serde(default)]
    animations: HashMap<String, AnimationEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnimationEntry {
    texture: String,
    #[serde(default = "default_frame_duration")]
    frame_duration: f32,
    #[serde(default = "default_looping")]
    looping: bool,
    /// Explicit source rectangles `[x, y, w, h]`.
    #[serde(default)]
    rects: Vec<[i32; 4]>,
    /// Horizontal strip layout, used when `rects` is empty.
    #[serde(default)]
    frame_width: i32,
    #[serde(default)]
    frame_height: i32,
    #[serde(default = "default_frame_count")]
    frames: usize,
}

fn default_frame_duration() -> f32 {
    0.1
}

fn default_looping() -> bool {
    true
}

fn default_frame_count() -> usize {
    1
}

impl AssetManager {
    /// Create a new asset manager with no cached assets.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            next_texture_id: 1,
            animations: Vec::new(),
            animation_names: HashMap::new(),
            sounds: Vec::new(),
            sound_names: HashMap::new(),
        }
    }

    /// Get the handle for a texture name, allocating one on first use.
    pub fn texture(&mut self, name: &str) -> TextureHandle {
        if let Some(handle) = self.textures.get(name) {
            return *handle;
        }

        let handle = TextureHandle(self.next_texture_id);
        self.next_texture_id += 1;
        self.textures.insert(name.to_string(), handle);
        handle
    }

    /// Get a cached texture handle by name, if it exists.
    pub fn texture_handle(&self, name: &str) -> Option<TextureHandle> {
        self.textures.get(name).copied()
    }

    /// Register an animation under `name`. Re-registering a name replaces the
    /// data but keeps the handle, so existing actors pick up the new frames.
    pub fn insert_animation(&mut self, name: &str, animation: Animation) -> AnimationId {
        if let Some(id) = self.animation_names.get(name) {
            self.animations[id.0 as usize] = animation;
            return *id;
        }

        let id = AnimationId(self.animations.len() as u32);
        self.animations.push(animation);
        self.animation_names.insert(name.to_string(), id);
        id
    }

    /// Look up an animation handle by name.
    pub fn animation_id(&self, name: &str) -> Result<AnimationId> {
        self.animation_names
            .get(name)
            .copied()
            .ok_or_else(|| Error::MissingAnimation(name.to_string()))
    }

    pub fn animation(&self, id: AnimationId) -> Option<&Animation> {
        self.animations.get(id.0 as usize)
    }

    /// Register a sound clip under `name`.
    pub fn insert_sound(&mut self, name: &str, path: impl Into<PathBuf>) -> SoundId {
        let clip = SoundClip {
            name: name.to_string(),
            path: path.into(),
        };
        if let Some(id) = self.sound_names.get(name) {
            self.sounds[id.0 as usize] = clip;
            return *id;
        }

        let id = SoundId(self.sounds.len() as u32);
        self.sounds.push(clip);
        self.sound_names.insert(name.to_string(), id);
        id
    }

    /// Look up a sound handle by name.
    pub fn sound_id(&self, name: &str) -> Result<SoundId> {
        self.sound_names
            .get(name)
            .copied()
            .ok_or_else(|| Error::MissingSound(name.to_string()))
    }

    pub fn sound(&self, id: SoundId) -> Option<&SoundClip> {
        self.sounds.get(id.0 as usize)
    }

    /// Register everything listed in a JSON manifest:
    ///
    /// ```json
    /// {
    ///   "sounds": { "clap": "media/clap.wav" },
    ///   "animations": {
    ///     "stand": { "texture": "media/player.png", "frameWidth": 32,
    ///                "frameHeight": 48, "frames": 4, "frameDuration": 0.15 }
    ///   }
    /// }
    /// ```
    pub fn load_manifest(&mut self, json: &str) -> Result<()> {
        let manifest: Manifest = serde_json::from_str(json)?;

        for (name, path) in manifest.sounds {
            self.insert_sound(&name, path);
        }

        for (name, entry) in manifest.animations {
            let texture = self.texture(&entry.texture);
            let mut animation = if entry.rects.is_empty() {
                Animation::from_strip(
                    texture,
                    (entry.frame_width, entry.frame_height),
                    entry.frames,
                    entry.frame_duration,
                )
            } else {
                let frames = entry
                    .rects
                    .iter()
                    .map(|[x, y, w, h]| {
                        AnimationFrame::new(texture, Rect::new(*x, *y, *w, *h), entry.frame_duration)
                    })
                    .collect();
                Animation::new(frames, true)
            };
            animation.looping = entry.looping;
            self.insert_animation(&name, animation);
        }

        log::info!(
            "Asset manifest loaded: {} animations, {} sounds",
            self.animations.len(),
            self.sounds.len()
        );
        Ok(())
    }
}

impl Default for AssetManager {
    fn default() -> Self {
        Self::new()
    }
}
