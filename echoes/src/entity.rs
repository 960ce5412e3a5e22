//! Enemy actors.

use crate::assets::{AssetManager, SoundId};
use crate::error::Result;
use crate::math::{Rect, Vec2};
use crate::particle::{Bounds, Particle};
use crate::profile::ActorProfile;
use crate::render::{AnimationId, Renderer, Visual};
use crate::tile::EntityKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// A simple enemy. It paces back and forth around its spawn point (when its
/// profile gives it a `speed` and `patrolRange`), turns to face the player,
/// and dies the moment the player touches it.
#[derive(Clone, Debug)]
pub struct Entity {
    kind: EntityKind,
    body: Particle,
    visual: Visual,
    facing: Facing,
    face_left: AnimationId,
    face_right: AnimationId,
    death_sound: Option<SoundId>,
    killed: bool,
}

impl Entity {
    pub fn new(profile: &ActorProfile, kind: EntityKind, x: f32, y: f32) -> Result<Self> {
        let config = profile.config();
        let speed: f32 = config.parse_or("speed", 0.0)?;
        let patrol_range: f32 = config.parse_or("patrolRange", 0.0)?;

        let mut body = Particle::new(Vec2::new(x, y));
        if speed != 0.0 && patrol_range > 0.0 {
            body = body
                .with_velocity(Vec2::new(speed, 0.0))
                .with_bounds(Bounds::horizontal(x - patrol_range, x + patrol_range));
        }

        // A side without its own animation shows the default one.
        let facing_animation = |key: &str| {
            config
                .get_opt(key)
                .and_then(|name| profile.animation(&name))
                .unwrap_or_else(|| profile.default_animation())
        };
        let face_left = facing_animation("leftAnimation");
        let face_right = facing_animation("rightAnimation");

        let mut visual = profile.visual();
        visual.follow(body.position);

        Ok(Self {
            kind,
            body,
            visual,
            facing: Facing::Right,
            face_left,
            face_right,
            death_sound: profile.sounds().first().copied(),
            killed: false,
        })
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn rect(&self) -> Rect {
        self.visual.dest()
    }

    /// Move, turn toward `player_x` and animate.
    pub fn update(&mut self, dt: f32, player_x: f32, assets: &AssetManager) {
        self.body.update(dt);

        self.facing = if player_x < self.body.position.x {
            Facing::Left
        } else {
            Facing::Right
        };
        self.visual.set_animation(match self.facing {
            Facing::Left => self.face_left,
            Facing::Right => self.face_right,
        });

        self.visual.update(dt, assets);
        self.visual.follow(self.body.position);
    }

    /// AABB test against the player's rectangle. Removal is up to the owner.
    pub fn collide(&self, rect: &Rect) -> bool {
        self.visual.dest().intersects(rect)
    }

    /// Mark for removal at the end of the current entity pass.
    pub fn kill(&mut self) {
        self.killed = true;
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }

    /// First configured sound, played when the entity dies.
    pub fn death_sound(&self) -> Option<SoundId> {
        self.death_sound
    }

    pub fn render(&self, renderer: &mut dyn Renderer, assets: &AssetManager) {
        self.visual.render(renderer, assets);
    }
}
