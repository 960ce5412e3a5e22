//! A running game: one level, one player, the wave field, and the glue that
//! turns key presses into actions and queued events into sound.

use crate::assets::{AssetManager, SoundId};
use crate::audio::AudioSink;
use crate::config::{Config, ConfigSource};
use crate::engine::{EngineContext, Game};
use crate::error::Result;
use crate::events::{FrameEvent, FrameEvents};
use crate::input::{Action, InputMap, InputState};
use crate::level::{Level, LevelSource, Prototypes};
use crate::player::Player;
use crate::profile::ActorProfile;
use crate::render::{Renderer, Visual};
use crate::wave::{WaveField, WaveSettings};

const DEFAULT_START_LEVEL: &str = "level1";
const DEFAULT_SCREEN_SIZE: (i32, i32) = (800, 600);

pub struct Session {
    assets: AssetManager,
    prototypes: Prototypes,
    input_map: InputMap,
    levels: Box<dyn LevelSource>,
    level: Level,
    player: Player,
    waves: WaveField,
    events: FrameEvents,
    backdrop: Option<Visual>,
    background_music: Option<SoundId>,
}

impl Session {
    /// Load every actor profile, then the start level, and put the player on
    /// its spawn.
    ///
    /// `game_config` supplies `startLevel`, `levels`, `backgroundMusic`,
    /// `backdropAnimation`, `screenW` and `screenH`; the actor sections come
    /// from `config`.
    pub fn new(
        game_config: &Config,
        config: &dyn ConfigSource,
        assets: AssetManager,
        levels: Box<dyn LevelSource>,
    ) -> Result<Self> {
        let prototypes = Prototypes::load(config, &assets)?;
        let player_profile = ActorProfile::from_config(&config.section("player")?, &assets)?;
        let wave_settings = match config.optional_section("wave")? {
            Some(section) => WaveSettings::from_config(&section)?,
            None => WaveSettings::default(),
        };

        let start = game_config
            .get_opt("startLevel")
            .unwrap_or_else(|| DEFAULT_START_LEVEL.to_string());
        let level = Level::load(&start, levels.as_ref(), &prototypes)?;
        let player = Player::new(&player_profile, level.start_position())?;

        let backdrop = match game_config.get_opt("backdropAnimation") {
            Some(name) => {
                let width = game_config.parse_or("screenW", DEFAULT_SCREEN_SIZE.0)?;
                let height = game_config.parse_or("screenH", DEFAULT_SCREEN_SIZE.1)?;
                Some(Visual::new(assets.animation_id(&name)?, width, height))
            }
            None => None,
        };
        let background_music = game_config
            .get_opt("backgroundMusic")
            .map(|name| assets.sound_id(&name))
            .transpose()?;

        log::info!("Session started on level `{}`", level.name());

        Ok(Self {
            assets,
            prototypes,
            input_map: InputMap::from_config(game_config),
            levels,
            level,
            player,
            waves: WaveField::new(wave_settings),
            events: FrameEvents::new(),
            backdrop,
            background_music,
        })
    }

    pub fn assets(&self) -> &AssetManager {
        &self.assets
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn waves(&self) -> &WaveField {
        &self.waves
    }

    pub fn input_map(&self) -> &InputMap {
        &self.input_map
    }

    pub fn background_music(&self) -> Option<SoundId> {
        self.background_music
    }

    /// Carry out one player action. Only a level change can fail.
    pub fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::MoveLeft => {
                self.player.move_left();
            }
            Action::MoveRight => {
                self.player.move_right();
            }
            Action::StopMoving => self.player.stop_moving(),
            Action::Jump => {
                self.player.jump();
            }
            Action::Clap => {
                self.player.clap(&mut self.waves, &mut self.events);
            }
            Action::ReleaseClap => self.player.set_clap(false),
            Action::ChangeLevel(name) => self.level_change(&name)?,
        }
        Ok(())
    }

    /// Apply every action the frame's key presses map to. A level that fails
    /// to load is logged and play continues on the current one.
    pub fn handle_input(&mut self, input: &InputState) {
        for action in self.input_map.actions(input) {
            if let Err(err) = self.apply(action) {
                log::error!("{}", err);
            }
        }
    }

    /// Switch to the level called `name`.
    ///
    /// The new level is fully built before anything else changes, so a
    /// missing or broken level leaves the current one in play.
    pub fn level_change(&mut self, name: &str) -> Result<()> {
        let next = Level::load(name, self.levels.as_ref(), &self.prototypes)?;

        self.player.respawn(next.start_position());
        self.waves.delete_waves();
        let previous = std::mem::replace(&mut self.level, next);
        log::info!("Level `{}` -> `{}`", previous.name(), self.level.name());
        Ok(())
    }

    /// Advance the world by `dt` seconds: the level pipeline first, then the
    /// player's own motion.
    pub fn update(&mut self, dt: f32) {
        self.level.update(
            dt,
            &mut self.player,
            &mut self.waves,
            &self.assets,
            &mut self.events,
        );
        self.player.update(dt, &self.assets);
        if let Some(backdrop) = &mut self.backdrop {
            backdrop.update(dt, &self.assets);
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.clear();
        if let Some(backdrop) = &self.backdrop {
            backdrop.render(renderer, &self.assets);
        }
        self.level
            .render(renderer, &self.player, &self.waves, &self.assets);
        renderer.present();
    }

    /// Take the events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<FrameEvent> {
        self.events.drain()
    }

    /// Drain queued events and play every sound among them. Playback failures
    /// are logged, not returned.
    pub fn play_sounds(&mut self, audio: &mut dyn AudioSink) {
        for event in self.events.drain() {
            match event {
                FrameEvent::Sound(id) => {
                    let Some(clip) = self.assets.sound(id) else {
                        log::warn!("Dropped sound event for unknown clip {:?}", id);
                        continue;
                    };
                    if let Err(err) = audio.play(clip) {
                        log::warn!("Failed to play `{}`: {}", clip.name, err);
                    }
                }
                other => log::debug!("{:?}", other),
            }
        }
    }

    /// Start the configured background track, if any.
    pub fn start_music(&self, audio: &mut dyn AudioSink) {
        let Some(clip) = self.background_music.and_then(|id| self.assets.sound(id)) else {
            return;
        };
        if let Err(err) = audio.play_music_loop(clip) {
            log::warn!("Failed to start music `{}`: {}", clip.name, err);
        }
    }
}

impl Game for Session {
    fn init(&mut self, ctx: &mut EngineContext<'_>) -> anyhow::Result<()> {
        self.start_music(ctx.audio());
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext<'_>) -> anyhow::Result<()> {
        self.handle_input(ctx.input());
        Session::update(self, ctx.delta_seconds());
        self.play_sounds(ctx.audio());
        Ok(())
    }

    fn draw(&mut self, renderer: &mut dyn Renderer) -> anyhow::Result<()> {
        Session::draw(self, renderer);
        Ok(())
    }
}
