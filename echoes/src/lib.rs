//! Echoes - a small side-scroller simulation core.
//!
//! A level is a grid of typed tiles plus patrolling enemies. The player walks,
//! jumps and claps; each clap sends out an expanding ring (a wave) that tiles
//! can react to. Rendering and audio sit behind the [`Renderer`] and
//! [`AudioSink`] traits, so the whole simulation runs headless.

pub mod assets;
pub mod audio;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod events;
pub mod game;
pub mod input;
pub mod level;
pub mod math;
pub mod particle;
pub mod player;
pub mod profile;
pub mod render;
pub mod tile;
pub mod wave;

pub use crate::assets::{AssetManager, SoundClip, SoundId};
pub use crate::audio::{AudioSink, AudioSystem};
pub use crate::config::{Config, ConfigSource, DirConfigSource, MemoryConfigSource};
pub use crate::engine::{Engine, EngineConfig, EngineContext, Game};
pub use crate::entity::{Entity, Facing};
pub use crate::error::{Error, Result};
pub use crate::events::{FrameEvent, FrameEvents};
pub use crate::game::Session;
pub use crate::input::{Action, InputMap, InputSource, InputState, Key, ScriptedInput};
pub use crate::level::{DirLevelSource, Level, LevelSource, MemoryLevelSource, Prototypes};
pub use crate::math::{Rect, Vec2};
pub use crate::particle::{Bounds, Particle};
pub use crate::player::{Movement, Player, PlayerSettings};
pub use crate::profile::ActorProfile;
pub use crate::render::{
    Animation, AnimationFrame, AnimationId, Color, CommandBuffer, DrawCommand, Renderer,
    TextureHandle, Visual,
};
pub use crate::tile::{Cell, EntityKind, Tile, TileKind};
pub use crate::wave::{Wave, WaveField, WaveSettings};
