//! Per-type actor settings resolved against the asset table.

use std::collections::HashMap;

use crate::assets::{AssetManager, SoundId};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::render::{AnimationId, Visual};

/// Everything a config section says about one kind of actor, with animation
/// and sound names already turned into handles.
///
/// Reads `width`, `height` (defaults to `width`), `animations`,
/// `defaultAnimation` (defaults to the first animation) and `sounds`. The
/// section itself stays available for actor-specific keys.
#[derive(Clone, Debug)]
pub struct ActorProfile {
    pub width: i32,
    pub height: i32,
    animations: HashMap<String, AnimationId>,
    default_animation: AnimationId,
    sounds: Vec<SoundId>,
    config: Config,
}

impl ActorProfile {
    pub fn from_config(config: &Config, assets: &AssetManager) -> Result<Self> {
        let width: i32 = config.parse("width")?;
        let height: i32 = config.parse_or("height", width)?;

        let names = config.get_many_or_empty("animations");
        let mut animations = HashMap::with_capacity(names.len());
        for name in &names {
            animations.insert(name.clone(), assets.animation_id(name)?);
        }

        let default_name = match config.get_opt("defaultAnimation") {
            Some(name) => name,
            None => names.first().cloned().ok_or_else(|| Error::MissingKey {
                section: config.section().to_string(),
                key: "defaultAnimation".to_string(),
            })?,
        };
        let default_animation = assets.animation_id(&default_name)?;

        let sounds = config
            .get_many_or_empty("sounds")
            .iter()
            .map(|name| assets.sound_id(name))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Profile `{}`: {}x{}, {} animations, {} sounds",
            config.section(),
            width,
            height,
            animations.len(),
            sounds.len()
        );

        Ok(Self {
            width,
            height,
            animations,
            default_animation,
            sounds,
            config: config.clone(),
        })
    }

    pub fn name(&self) -> &str {
        self.config.section()
    }

    /// Animation registered under `name` in this profile's list.
    pub fn animation(&self, name: &str) -> Option<AnimationId> {
        self.animations.get(name).copied()
    }

    pub fn default_animation(&self) -> AnimationId {
        self.default_animation
    }

    /// Sounds in configured order.
    pub fn sounds(&self) -> &[SoundId] {
        &self.sounds
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A fresh visual showing the default animation at this profile's size.
    pub fn visual(&self) -> Visual {
        Visual::new(self.default_animation, self.width, self.height)
    }
}
