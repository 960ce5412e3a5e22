use crate::assets::SoundId;
use crate::math::Vec2;
use crate::tile::EntityKind;

/// Something that happened during a frame and that the frame driver may want
/// to react to (play a sound, update a score, ...).
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    Sound(SoundId),
    EntityKilled { kind: EntityKind, position: Vec2 },
    WaveCreated { position: Vec2 },
}

/// Per-frame event queue. Simulation code pushes, the driver drains.
#[derive(Clone, Debug, Default)]
pub struct FrameEvents {
    events: Vec<FrameEvent>,
}

impl FrameEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: FrameEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameEvent> {
        self.events.iter()
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.events)
    }
}
