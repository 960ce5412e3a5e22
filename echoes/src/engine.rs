use std::time::{Duration, Instant};

use anyhow::Result;

use crate::{
    audio::AudioSink,
    input::{InputSource, InputState, Key},
    render::Renderer,
};

/// Runtime settings for the frame loop.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Stop after this many frames. `None` runs until the game asks to exit.
    pub max_frames: Option<u64>,
    /// Constant frame time instead of measured wall-clock time.
    pub frame_time: Option<Duration>,
}

/// Drives a [`Game`]: polls input, measures the time since the previous
/// frame, updates, draws.
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create a new engine instance with default configuration.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    #[must_use]
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.config.max_frames = Some(frames);
        self
    }

    /// Replace wall-clock timing with a constant step, for replays.
    #[must_use]
    pub fn with_frame_time(mut self, frame_time: Duration) -> Self {
        self.config.frame_time = Some(frame_time);
        self
    }

    /// Run the game until it requests exit, Escape is pressed, or the frame
    /// limit is reached. Returns the number of frames run.
    pub fn run<G: Game>(
        self,
        game: &mut G,
        renderer: &mut dyn Renderer,
        input_source: &mut dyn InputSource,
        audio: &mut dyn AudioSink,
    ) -> Result<u64> {
        let config = self.config;
        let mut input = InputState::new();
        let mut elapsed_time = Duration::ZERO;
        let mut frame: u64 = 0;

        {
            let mut ctx = EngineContext::new(Duration::ZERO, elapsed_time, 0, &input, audio);
            game.init(&mut ctx)?;
        }

        let mut last_frame = Instant::now();
        loop {
            if config.max_frames.is_some_and(|max| frame >= max) {
                break;
            }

            input.begin_frame();
            input_source.poll(frame, &mut input);

            let now = Instant::now();
            let delta_time = config.frame_time.unwrap_or(now - last_frame);
            last_frame = now;
            elapsed_time += delta_time;

            let exit_requested = {
                let mut ctx = EngineContext::new(delta_time, elapsed_time, frame, &input, audio);
                game.update(&mut ctx)?;
                ctx.exit_requested || input.is_key_pressed(Key::Escape)
            };

            game.draw(renderer)?;
            frame += 1;

            if exit_requested {
                log::info!("Exit requested after {} frames", frame);
                break;
            }
        }

        log::debug!("Engine stopped: {} frames, {:.3}s", frame, elapsed_time.as_secs_f32());
        Ok(frame)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared context provided to game code each frame.
pub struct EngineContext<'a> {
    delta_time: Duration,
    elapsed_time: Duration,
    frame: u64,
    exit_requested: bool,
    input: &'a InputState,
    audio: &'a mut dyn AudioSink,
}

impl<'a> EngineContext<'a> {
    fn new(
        delta_time: Duration,
        elapsed_time: Duration,
        frame: u64,
        input: &'a InputState,
        audio: &'a mut dyn AudioSink,
    ) -> Self {
        Self {
            delta_time,
            elapsed_time,
            frame,
            exit_requested: false,
            input,
            audio,
        }
    }

    /// Time elapsed since the previous frame.
    pub fn delta_time(&self) -> Duration {
        self.delta_time
    }

    /// Delta time in seconds, as the simulation expects it.
    pub fn delta_seconds(&self) -> f32 {
        self.delta_time.as_secs_f32()
    }

    /// Total elapsed time since the engine started.
    pub fn elapsed_time(&self) -> Duration {
        self.elapsed_time
    }

    /// Index of the current frame, starting at 0.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Access the current input state.
    pub fn input(&self) -> &InputState {
        self.input
    }

    /// Access the audio sink for playing sounds and music.
    pub fn audio(&mut self) -> &mut dyn AudioSink {
        &mut *self.audio
    }

    /// Request that the engine exit after the current frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }
}

/// Trait implemented by user code to hook into the engine lifecycle.
pub trait Game {
    /// Called once before the first frame.
    fn init(&mut self, _ctx: &mut EngineContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Update game state. Called once per frame before drawing.
    fn update(&mut self, ctx: &mut EngineContext<'_>) -> Result<()>;

    /// Draw the current frame.
    fn draw(&mut self, renderer: &mut dyn Renderer) -> Result<()>;
}
