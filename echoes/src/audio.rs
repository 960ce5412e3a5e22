use std::{fs::File, io::BufReader};

use anyhow::{anyhow, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::assets::SoundClip;

/// Anything that can play sound clips.
pub trait AudioSink {
    /// Play a clip once. Overlapping clips mix.
    fn play(&mut self, clip: &SoundClip) -> Result<()>;

    /// Loop a clip as background music, replacing any current track.
    fn play_music_loop(&mut self, clip: &SoundClip) -> Result<()>;
}

/// Plays sound effects and music on the default output device.
pub struct AudioSystem {
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
    music_sink: Option<Sink>,
    available: bool,
}

impl AudioSystem {
    /// Open the default output device. A machine without one still gets a
    /// working (silent) audio system.
    pub fn new() -> Self {
        match OutputStream::try_default() {
            Ok((stream, stream_handle)) => Self {
                _stream: Some(stream),
                stream_handle: Some(stream_handle),
                music_sink: None,
                available: true,
            },
            Err(e) => {
                log::warn!("Failed to initialize audio: {}. Audio will be unavailable.", e);
                Self::silent()
            }
        }
    }

    /// An audio system that never opens a device.
    pub fn silent() -> Self {
        Self {
            _stream: None,
            stream_handle: None,
            music_sink: None,
            available: false,
        }
    }

    /// Check if audio is available and working.
    pub fn is_available(&self) -> bool {
        self.available
    }

    fn open_sink(&self, clip: &SoundClip) -> Result<(Sink, Decoder<BufReader<File>>)> {
        let stream_handle = self
            .stream_handle
            .as_ref()
            .ok_or_else(|| anyhow!("Audio system is not available"))?;

        let file = File::open(&clip.path)
            .map_err(|e| anyhow!("Failed to open sound `{}` at {:?}: {}", clip.name, clip.path, e))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| anyhow!("Failed to decode sound `{}`: {}", clip.name, e))?;
        let sink = Sink::try_new(stream_handle)
            .map_err(|e| anyhow!("Failed to create audio sink: {}", e))?;
        Ok((sink, source))
    }

    /// Stop the currently playing background music.
    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music_sink.take() {
            sink.stop();
        }
    }

    /// Check if background music is currently playing.
    pub fn is_music_playing(&self) -> bool {
        self.music_sink.is_some()
    }
}

impl AudioSink for AudioSystem {
    fn play(&mut self, clip: &SoundClip) -> Result<()> {
        if !self.available {
            log::trace!("audio unavailable, skipping `{}`", clip.name);
            return Ok(());
        }
        let (sink, source) = self.open_sink(clip)?;
        sink.append(source);
        sink.detach();
        Ok(())
    }

    fn play_music_loop(&mut self, clip: &SoundClip) -> Result<()> {
        if !self.available {
            return Ok(());
        }
        self.stop_music();

        let (sink, source) = self.open_sink(clip)?;
        sink.append(source.repeat_infinite());
        sink.set_volume(0.5);
        self.music_sink = Some(sink);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_system_accepts_everything() {
        let mut audio = AudioSystem::silent();
        let clip = SoundClip {
            name: "clap".into(),
            path: "does/not/exist.wav".into(),
        };
        assert!(!audio.is_available());
        assert!(audio.play(&clip).is_ok());
        assert!(audio.play_music_loop(&clip).is_ok());
        assert!(!audio.is_music_playing());
    }
}
