//! The controllable actor.

use crate::assets::{AssetManager, SoundId};
use crate::error::Result;
use crate::events::{FrameEvent, FrameEvents};
use crate::math::{Rect, Vec2};
use crate::particle::Particle;
use crate::profile::ActorProfile;
use crate::render::{AnimationId, Renderer, Visual};
use crate::tile::{Tile, TileKind};
use crate::wave::WaveField;

/// Horizontal movement state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    Idle,
    Left,
    Right,
}

/// The wall the player was last pushed out of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallContact {
    pub kind: TileKind,
    pub rect: Rect,
}

/// Movement tunables from the `player` config section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSettings {
    /// Horizontal speed in px/s.
    pub walk_speed: f32,
    /// Upward launch speed in px/s.
    pub jump_speed: f32,
    /// Downward acceleration in px/s².
    pub gravity: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            walk_speed: 150.0,
            jump_speed: 420.0,
            gravity: 900.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct MovementAnimations {
    stand: AnimationId,
    left: AnimationId,
    right: AnimationId,
}

#[derive(Clone, Debug)]
pub struct Player {
    body: Particle,
    visual: Visual,
    size: (i32, i32),
    settings: PlayerSettings,
    animations: MovementAnimations,
    movement: Movement,
    airborne: bool,
    last_wall: Option<WallContact>,
    clapping: bool,
    clap_sound: Option<SoundId>,
}

impl Player {
    /// Build the player from its profile. Reads `walkSpeed`, `jumpSpeed` and
    /// `gravity`, plus optional `standAnimation`, `leftAnimation` and
    /// `rightAnimation` naming entries of the profile's animation list. The
    /// first configured sound is the clap.
    pub fn new(profile: &ActorProfile, position: Vec2) -> Result<Self> {
        let config = profile.config();
        let defaults = PlayerSettings::default();
        let settings = PlayerSettings {
            walk_speed: config.parse_or("walkSpeed", defaults.walk_speed)?,
            jump_speed: config.parse_or("jumpSpeed", defaults.jump_speed)?,
            gravity: config.parse_or("gravity", defaults.gravity)?,
        };
        // Unset movement animations fall back to the profile default.
        let lookup = |key: &str| {
            config
                .get_opt(key)
                .and_then(|name| profile.animation(&name))
                .unwrap_or_else(|| profile.default_animation())
        };
        let animations = MovementAnimations {
            stand: lookup("standAnimation"),
            left: lookup("leftAnimation"),
            right: lookup("rightAnimation"),
        };

        let body = Particle::new(position).with_acceleration(Vec2::new(0.0, settings.gravity));
        let mut visual = profile.visual();
        visual.follow(position);

        Ok(Self {
            body,
            visual,
            size: (profile.width, profile.height),
            settings,
            animations,
            movement: Movement::Idle,
            airborne: false,
            last_wall: None,
            clapping: false,
            clap_sound: profile.sounds().first().copied(),
        })
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn x(&self) -> f32 {
        self.body.position.x
    }

    pub fn y(&self) -> f32 {
        self.body.position.y
    }

    pub fn set_y(&mut self, y: f32) {
        self.body.position.y = y;
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn set_velocity_y(&mut self, vy: f32) {
        self.body.velocity.y = vy;
    }

    /// Collision rectangle at the current (truncated) position.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.body.position.x as i32,
            self.body.position.y as i32,
            self.size.0,
            self.size.1,
        )
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    pub fn is_moving(&self) -> bool {
        self.movement != Movement::Idle
    }

    pub fn is_in_air(&self) -> bool {
        self.airborne
    }

    pub fn is_clapping(&self) -> bool {
        self.clapping
    }

    pub fn last_wall(&self) -> Option<WallContact> {
        self.last_wall
    }

    /// Start walking left. Ignored unless idle: turning around needs a stop first.
    pub fn move_left(&mut self) -> bool {
        self.start_moving(Movement::Left, -self.settings.walk_speed)
    }

    /// Start walking right. Ignored unless idle.
    pub fn move_right(&mut self) -> bool {
        self.start_moving(Movement::Right, self.settings.walk_speed)
    }

    fn start_moving(&mut self, movement: Movement, vx: f32) -> bool {
        if self.movement != Movement::Idle {
            return false;
        }
        self.movement = movement;
        self.body.velocity.x = vx;
        true
    }

    pub fn stop_moving(&mut self) {
        self.movement = Movement::Idle;
        self.body.velocity.x = 0.0;
    }

    /// Launch upward. Only from the ground.
    ///
    /// Walking off a ledge does not set `airborne`, so a player who falls
    /// without jumping can still jump in mid-air.
    pub fn jump(&mut self) -> bool {
        if self.airborne {
            return false;
        }
        self.airborne = true;
        self.body.velocity.y = -self.settings.jump_speed;
        true
    }

    /// Land: no longer airborne, vertical speed cleared.
    pub fn stop_falling(&mut self) {
        self.airborne = false;
        self.body.velocity.y = 0.0;
    }

    /// Push the player out of a wall tile along x. Left walls push right,
    /// right walls push left, anything else is ignored. The push snaps to the
    /// tile edge, so repeating it for the same tile changes nothing.
    pub fn hit_wall(&mut self, tile: &Tile) {
        let rect = tile.rect();
        match tile.kind() {
            TileKind::LeftWall => {
                self.body.velocity.x = 0.0;
                self.body.position.x = rect.right() as f32;
            }
            TileKind::RightWall => {
                self.body.velocity.x = 0.0;
                self.body.position.x = (rect.x - self.size.0) as f32;
            }
            TileKind::Floor | TileKind::Ceiling => return,
        }
        self.last_wall = Some(WallContact {
            kind: tile.kind(),
            rect,
        });
    }

    /// Clap: start a wave at the player's center and queue the clap sound.
    /// Holding the clap key does nothing more until `set_clap(false)`.
    pub fn clap(&mut self, waves: &mut WaveField, events: &mut FrameEvents) -> bool {
        if self.clapping {
            return false;
        }
        self.clapping = true;

        let center = self.rect().center();
        waves.create_wave(center.x, center.y);
        events.push(FrameEvent::WaveCreated { position: center });
        if let Some(sound) = self.clap_sound {
            events.push(FrameEvent::Sound(sound));
        }
        true
    }

    pub fn set_clap(&mut self, clapping: bool) {
        self.clapping = clapping;
    }

    /// Put the player at `position` at rest, as at the start of a level.
    pub fn respawn(&mut self, position: Vec2) {
        self.body.position = position;
        self.body.velocity = Vec2::ZERO;
        self.movement = Movement::Idle;
        self.airborne = false;
        self.last_wall = None;
        self.clapping = false;
        self.visual.follow(position);
    }

    /// Integrate (gravity is always on) and animate.
    pub fn update(&mut self, dt: f32, assets: &AssetManager) {
        self.body.update(dt);

        self.visual.set_animation(match self.movement {
            Movement::Idle => self.animations.stand,
            Movement::Left => self.animations.left,
            Movement::Right => self.animations.right,
        });
        self.visual.update(dt, assets);
        self.visual.follow(self.body.position);
    }

    pub fn render(&self, renderer: &mut dyn Renderer, assets: &AssetManager) {
        self.visual.render(renderer, assets);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::Config;
    use crate::render::Animation;
    use crate::wave::WaveSettings;

    pub(crate) fn player_assets() -> AssetManager {
        let mut assets = AssetManager::new();
        let tex = assets.texture("player.png");
        for name in ["stand", "walkLeft", "walkRight"] {
            assets.insert_animation(name, Animation::from_strip(tex, (32, 32), 2, 0.1));
        }
        let tiles = assets.texture("tiles.png");
        assets.insert_animation("block", Animation::from_strip(tiles, (32, 32), 1, 0.0));
        assets.insert_sound("clap", "clap.wav");
        assets
    }

    pub(crate) fn player_profile(assets: &AssetManager, gravity: f32) -> ActorProfile {
        let cfg = Config::new("player")
            .with("width", 32)
            .with("height", 32)
            .with_list("animations", ["stand", "walkLeft", "walkRight"])
            .with("standAnimation", "stand")
            .with("leftAnimation", "walkLeft")
            .with("rightAnimation", "walkRight")
            .with_list("sounds", ["clap"])
            .with("walkSpeed", 100)
            .with("jumpSpeed", 300)
            .with("gravity", gravity);
        ActorProfile::from_config(&cfg, assets).unwrap()
    }

    fn tile(assets: &AssetManager, kind: TileKind, x: i32, y: i32) -> Tile {
        let cfg = Config::new("tile").with("width", 32).with_list("animations", ["block"]);
        Tile::new(&ActorProfile::from_config(&cfg, assets).unwrap(), kind, x, y)
    }

    #[test]
    fn direction_changes_require_stopping() {
        let assets = player_assets();
        let mut p = Player::new(&player_profile(&assets, 0.0), Vec2::ZERO).unwrap();

        assert!(p.move_left());
        assert_eq!(p.velocity().x, -100.0);
        assert!(!p.move_right());
        assert_eq!(p.movement(), Movement::Left);

        p.stop_moving();
        assert_eq!(p.velocity().x, 0.0);
        assert!(p.move_right());
        assert_eq!(p.velocity().x, 100.0);
    }

    #[test]
    fn jump_only_from_ground() {
        let assets = player_assets();
        let mut p = Player::new(&player_profile(&assets, 900.0), Vec2::ZERO).unwrap();

        assert!(p.jump());
        assert!(p.is_in_air());
        assert_eq!(p.velocity().y, -300.0);
        p.update(0.1, &assets);
        assert!(!p.jump());

        p.stop_falling();
        assert!(!p.is_in_air());
        assert_eq!(p.velocity().y, 0.0);
        assert!(p.jump());
    }

    #[test]
    fn gravity_applies_while_grounded() {
        let assets = player_assets();
        let mut p = Player::new(&player_profile(&assets, 600.0), Vec2::ZERO).unwrap();
        p.update(0.5, &assets);
        assert_eq!(p.velocity().y, 300.0);
        assert_eq!(p.y(), 150.0);
    }

    #[test]
    fn left_wall_pushes_right_and_is_idempotent() {
        let assets = player_assets();
        let mut p = Player::new(&player_profile(&assets, 0.0), Vec2::new(20.0, 0.0)).unwrap();
        p.move_left();
        let wall = tile(&assets, TileKind::LeftWall, 0, 0);

        p.hit_wall(&wall);
        assert_eq!(p.x(), 32.0);
        assert_eq!(p.velocity().x, 0.0);
        p.hit_wall(&wall);
        assert_eq!(p.x(), 32.0);
        assert_eq!(p.last_wall().unwrap().kind, TileKind::LeftWall);
        assert!(!wall.collide(&p.rect()));
    }

    #[test]
    fn right_wall_pushes_left() {
        let assets = player_assets();
        let mut p = Player::new(&player_profile(&assets, 0.0), Vec2::new(80.0, 0.0)).unwrap();
        p.move_right();
        let wall = tile(&assets, TileKind::RightWall, 96, 0);

        p.hit_wall(&wall);
        assert_eq!(p.x(), 64.0);
        assert_eq!(p.velocity().x, 0.0);
        assert!(!wall.collide(&p.rect()));
    }

    #[test]
    fn floors_and_ceilings_are_not_walls() {
        let assets = player_assets();
        let mut p = Player::new(&player_profile(&assets, 0.0), Vec2::new(10.0, 10.0)).unwrap();
        p.move_right();
        p.hit_wall(&tile(&assets, TileKind::Floor, 0, 20));
        p.hit_wall(&tile(&assets, TileKind::Ceiling, 0, 0));
        assert_eq!(p.x(), 10.0);
        assert_eq!(p.velocity().x, 100.0);
        assert!(p.last_wall().is_none());
    }

    #[test]
    fn clap_latches_until_released() {
        let assets = player_assets();
        let mut p = Player::new(&player_profile(&assets, 0.0), Vec2::new(0.0, 0.0)).unwrap();
        let mut waves = WaveField::new(WaveSettings::default());
        let mut events = FrameEvents::new();

        assert!(p.clap(&mut waves, &mut events));
        assert!(!p.clap(&mut waves, &mut events));
        assert_eq!(waves.len(), 1);
        assert_eq!(waves.waves()[0].center, Vec2::new(16.0, 16.0));

        p.set_clap(false);
        assert!(p.clap(&mut waves, &mut events));
        assert_eq!(waves.len(), 2);

        let sounds = events
            .iter()
            .filter(|e| matches!(e, FrameEvent::Sound(s) if *s == assets.sound_id("clap").unwrap()))
            .count();
        assert_eq!(sounds, 2);
    }

    #[test]
    fn respawn_resets_state() {
        let assets = player_assets();
        let mut p = Player::new(&player_profile(&assets, 900.0), Vec2::ZERO).unwrap();
        p.move_left();
        p.jump();
        p.update(0.2, &assets);

        p.respawn(Vec2::new(32.0, 64.0));
        assert_eq!(p.position(), Vec2::new(32.0, 64.0));
        assert_eq!(p.velocity(), Vec2::ZERO);
        assert!(!p.is_moving());
        assert!(!p.is_in_air());
        assert_eq!(p.rect(), Rect::new(32, 64, 32, 32));
    }

    #[test]
    fn walking_switches_animation() {
        let assets = player_assets();
        let mut p = Player::new(&player_profile(&assets, 0.0), Vec2::ZERO).unwrap();
        p.move_right();
        p.update(0.01, &assets);
        assert_eq!(p.visual.animation(), assets.animation_id("walkRight").unwrap());
        p.stop_moving();
        p.update(0.01, &assets);
        assert_eq!(p.visual.animation(), assets.animation_id("stand").unwrap());
    }

    #[test]
    fn missing_stand_animation_uses_profile_default() {
        let assets = player_assets();
        let cfg = Config::new("player")
            .with("width", 32)
            .with_list("animations", ["stand", "walkRight"])
            .with("rightAnimation", "walkRight");
        let profile = ActorProfile::from_config(&cfg, &assets).unwrap();
        let mut p = Player::new(&profile, Vec2::ZERO).unwrap();

        p.move_right();
        p.update(0.01, &assets);
        assert_eq!(p.visual.animation(), assets.animation_id("walkRight").unwrap());
        p.stop_moving();
        p.update(0.01, &assets);
        assert_eq!(p.visual.animation(), profile.default_animation());
    }
}
