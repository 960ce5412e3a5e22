//! A loaded level: its tiles, its enemies, where the player starts, and the
//! fixed order in which they are simulated each frame.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::assets::AssetManager;
use crate::config::ConfigSource;
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::events::{FrameEvent, FrameEvents};
use crate::math::Vec2;
use crate::player::Player;
use crate::profile::ActorProfile;
use crate::render::Renderer;
use crate::tile::{Cell, EntityKind, Tile, TileKind};
use crate::wave::WaveField;

/// Where level text comes from.
pub trait LevelSource {
    fn read_level(&self, name: &str) -> Result<String>;
}

/// Reads `<root>/<name>.txt`.
#[derive(Clone, Debug)]
pub struct DirLevelSource {
    root: PathBuf,
}

impl DirLevelSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LevelSource for DirLevelSource {
    fn read_level(&self, name: &str) -> Result<String> {
        let path = self.root.join(format!("{name}.txt"));
        std::fs::read_to_string(&path).map_err(|source| Error::Level { path, source })
    }
}

/// Levels kept in memory, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MemoryLevelSource {
    levels: HashMap<String, String>,
}

impl MemoryLevelSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level(mut self, name: &str, text: &str) -> Self {
        self.levels.insert(name.to_string(), text.to_string());
        self
    }
}

impl LevelSource for MemoryLevelSource {
    fn read_level(&self, name: &str) -> Result<String> {
        self.levels.get(name).cloned().ok_or_else(|| Error::Level {
            path: PathBuf::from(name),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such level"),
        })
    }
}

/// Profiles for everything a level can place.
#[derive(Clone, Debug)]
pub struct Prototypes {
    pub tile: ActorProfile,
    pub basic_entity: ActorProfile,
    pub big_entity: ActorProfile,
}

impl Prototypes {
    /// Load the `tile`, `entity` and `bigEntity` sections.
    pub fn load(config: &dyn ConfigSource, assets: &AssetManager) -> Result<Self> {
        Ok(Self {
            tile: ActorProfile::from_config(&config.section("tile")?, assets)?,
            basic_entity: ActorProfile::from_config(
                &config.section(EntityKind::Basic.config_section())?,
                assets,
            )?,
            big_entity: ActorProfile::from_config(
                &config.section(EntityKind::Big.config_section())?,
                assets,
            )?,
        })
    }

    pub fn entity(&self, kind: EntityKind) -> &ActorProfile {
        match kind {
            EntityKind::Basic => &self.basic_entity,
            EntityKind::Big => &self.big_entity,
        }
    }

    /// Grid pitch of level files.
    pub fn tile_width(&self) -> i32 {
        self.tile.width
    }
}

#[derive(Debug)]
pub struct Level {
    name: String,
    tiles: Vec<Tile>,
    entities: Vec<Entity>,
    spawn: Option<Vec2>,
    tile_width: i32,
}

impl Level {
    /// An empty level on the prototypes' grid.
    pub fn new(name: impl Into<String>, prototypes: &Prototypes) -> Self {
        Self {
            name: name.into(),
            tiles: Vec::new(),
            entities: Vec::new(),
            spawn: None,
            tile_width: prototypes.tile_width(),
        }
    }

    /// Read and parse the level called `name`.
    pub fn load(name: &str, source: &dyn LevelSource, prototypes: &Prototypes) -> Result<Self> {
        let text = source.read_level(name)?;
        Self::parse(name, &text, prototypes)
    }

    /// Build a level from its text: one row per line, one cell per
    /// character, each cell `tile_width` pixels square. Row lengths are not
    /// checked and a missing spawn marker is allowed.
    pub fn parse(name: &str, text: &str, prototypes: &Prototypes) -> Result<Self> {
        let mut level = Self::new(name, prototypes);
        let pitch = level.tile_width;

        let mut y = 0;
        for row in text.lines() {
            let mut x = 0;
            for c in row.chars() {
                level.place_tile(x, y, Cell::from_char(c), prototypes)?;
                x += pitch;
            }
            y += pitch;
        }

        if level.spawn.is_none() {
            log::warn!("Level `{}` has no player spawn marker", name);
        }
        log::info!(
            "Level `{}` loaded: {} tiles, {} entities",
            name,
            level.tiles.len(),
            level.entities.len()
        );
        Ok(level)
    }

    /// Apply one cell at `(x, y)`. Enemies appear one tile below their marker.
    pub fn place_tile(&mut self, x: i32, y: i32, cell: Cell, prototypes: &Prototypes) -> Result<()> {
        match cell {
            Cell::PlayerSpawn => {
                self.spawn = Some(Vec2::new(x as f32, y as f32));
            }
            Cell::Enemy(kind) => {
                self.spawn_entity(x, y + self.tile_width, kind, prototypes)?;
            }
            Cell::Tile(kind) => {
                self.tiles.push(Tile::new(&prototypes.tile, kind, x, y));
            }
            Cell::Empty => {}
        }
        Ok(())
    }

    pub fn spawn_entity(
        &mut self,
        x: i32,
        y: i32,
        kind: EntityKind,
        prototypes: &Prototypes,
    ) -> Result<()> {
        let entity = Entity::new(prototypes.entity(kind), kind, x as f32, y as f32)?;
        self.entities.push(entity);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tile_width(&self) -> i32 {
        self.tile_width
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// The spawn marker position, if the level has one.
    pub fn spawn(&self) -> Option<Vec2> {
        self.spawn
    }

    /// Where to put the player: the spawn marker, or the origin when the
    /// level has none.
    pub fn start_position(&self) -> Vec2 {
        self.spawn.unwrap_or(Vec2::ZERO)
    }

    /// One simulation step, always in this order: waves, entities, tiles
    /// against waves, player against walls, player against floors and
    /// ceilings.
    pub fn update(
        &mut self,
        dt: f32,
        player: &mut Player,
        waves: &mut WaveField,
        assets: &AssetManager,
        events: &mut FrameEvents,
    ) {
        waves.update_waves(dt);

        self.update_entities(dt, player, assets, events);

        for tile in &mut self.tiles {
            tile.update(dt, assets);
            if waves.collide_sound(&tile.rect()) {
                tile.on_wave_contact();
            }
        }

        self.on_wall(player);
        self.hit_floor(player);
    }

    /// Move every entity, kill the ones touching the player, then drop the
    /// killed. Survivors keep their order.
    pub fn update_entities(
        &mut self,
        dt: f32,
        player: &Player,
        assets: &AssetManager,
        events: &mut FrameEvents,
    ) {
        let player_x = player.x();
        for entity in &mut self.entities {
            entity.update(dt, player_x, assets);
        }

        let player_rect = player.rect();
        for entity in &mut self.entities {
            if !entity.collide(&player_rect) {
                continue;
            }
            entity.kill();
            log::debug!("{:?} entity killed at {:?}", entity.kind(), entity.position());
            events.push(FrameEvent::EntityKilled {
                kind: entity.kind(),
                position: entity.position(),
            });
            if let Some(sound) = entity.death_sound() {
                events.push(FrameEvent::Sound(sound));
            }
        }
        self.entities.retain(|entity| !entity.is_killed());
    }

    /// Hand every tile overlapping the player to its wall response. Overlap
    /// is judged against the player's rectangle as it was when the pass began.
    pub fn on_wall(&self, player: &mut Player) {
        let rect = player.rect();
        for tile in &self.tiles {
            if tile.collide(&rect) {
                player.hit_wall(tile);
            }
        }
    }

    /// Floors land the player and lift it one pixel; ceilings stop upward
    /// motion and push it down one pixel. Every overlapping tile applies its
    /// nudge, judged against the rectangle from the start of the pass.
    pub fn hit_floor(&self, player: &mut Player) {
        let rect = player.rect();
        for tile in &self.tiles {
            if !tile.collide(&rect) {
                continue;
            }
            match tile.kind() {
                TileKind::Floor => {
                    player.stop_falling();
                    player.set_y(player.y() - 1.0);
                }
                TileKind::Ceiling => {
                    player.set_velocity_y(0.0);
                    player.set_y(player.y() + 1.0);
                }
                TileKind::LeftWall | TileKind::RightWall => {}
            }
        }
    }

    /// Painter's order: waves, player, tiles, entities.
    pub fn render(
        &self,
        renderer: &mut dyn Renderer,
        player: &Player,
        waves: &WaveField,
        assets: &AssetManager,
    ) {
        waves.render_waves(renderer);
        player.render(renderer, assets);
        for tile in &self.tiles {
            tile.render(renderer, assets);
        }
        for entity in &self.entities {
            entity.render(renderer, assets);
        }
    }
}
