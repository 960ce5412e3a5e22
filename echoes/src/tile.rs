//! Static level geometry.

use crate::assets::AssetManager;
use crate::math::{Rect, Vec2};
use crate::profile::ActorProfile;
use crate::render::{Renderer, Visual};

/// Solid tile kinds. Each kind decides how the player is pushed out of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    LeftWall,
    RightWall,
    Floor,
    Ceiling,
}

impl TileKind {
    /// Name used to pick a per-kind animation from the tile profile.
    pub fn keyword(self) -> &'static str {
        match self {
            TileKind::LeftWall => "lWall",
            TileKind::RightWall => "rWall",
            TileKind::Floor => "floor",
            TileKind::Ceiling => "ceiling",
        }
    }
}

/// Enemy flavours a level can spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Basic,
    Big,
}

impl EntityKind {
    /// Config section holding this kind's settings.
    pub fn config_section(self) -> &'static str {
        match self {
            EntityKind::Basic => "entity",
            EntityKind::Big => "bigEntity",
        }
    }
}

/// What one character of a level file stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Tile(TileKind),
    PlayerSpawn,
    Enemy(EntityKind),
    Empty,
}

impl Cell {
    /// Level character table. Unknown characters are inert.
    pub fn from_char(c: char) -> Self {
        match c {
            'l' => Cell::Tile(TileKind::LeftWall),
            'r' => Cell::Tile(TileKind::RightWall),
            'f' => Cell::Tile(TileKind::Floor),
            'c' => Cell::Tile(TileKind::Ceiling),
            'p' => Cell::PlayerSpawn,
            'e' => Cell::Enemy(EntityKind::Basic),
            'b' => Cell::Enemy(EntityKind::Big),
            _ => Cell::Empty,
        }
    }
}

/// An immovable rectangle of world geometry.
#[derive(Clone, Debug)]
pub struct Tile {
    kind: TileKind,
    rect: Rect,
    visual: Visual,
}

impl Tile {
    /// Place a tile with its top-left corner at `(x, y)`. The tile profile
    /// may carry an animation named after the kind keyword; otherwise the
    /// default animation is used.
    pub fn new(profile: &ActorProfile, kind: TileKind, x: i32, y: i32) -> Self {
        let mut visual = profile.visual();
        if let Some(animation) = profile.animation(kind.keyword()) {
            visual.set_animation(animation);
        }
        visual.follow(Vec2::new(x as f32, y as f32));

        Self {
            kind,
            rect: Rect::new(x, y, profile.width, profile.height),
            visual,
        }
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Edge-exclusive AABB test against `other`.
    pub fn collide(&self, other: &Rect) -> bool {
        self.rect.intersects(other)
    }

    /// Tiles never move; this only animates.
    pub fn update(&mut self, dt: f32, assets: &AssetManager) {
        self.visual.update(dt, assets);
    }

    /// Called when a wave front reaches this tile. Tiles have no reaction yet.
    pub fn on_wave_contact(&mut self) {
        log::trace!("wave reached {:?} tile at ({}, {})", self.kind, self.rect.x, self.rect.y);
    }

    pub fn render(&self, renderer: &mut dyn Renderer, assets: &AssetManager) {
        self.visual.render(renderer, assets);
    }
}
