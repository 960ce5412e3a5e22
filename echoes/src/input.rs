use std::collections::HashSet;

use crate::config::Config;

/// Keys the game reacts to. Backends translate their own key codes into these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    Space,
    E,
    /// Number row, `1..=9`.
    Digit(u8),
    Escape,
}

/// Tracks keyboard state across frames.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    keys_down: HashSet<Key>,
    keys_pressed: Vec<Key>,
    keys_released: Vec<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame pressed/released lists.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// Record a key going down. Auto-repeat of a held key is not a new press.
    pub fn press(&mut self, key: Key) {
        if self.keys_down.insert(key) {
            self.keys_pressed.push(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        if self.keys_down.remove(&key) {
            self.keys_released.push(key);
        }
    }

    /// Returns true if the key is currently held down.
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key was pressed this frame.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the key was released this frame.
    pub fn is_key_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    /// Keys pressed this frame, in arrival order.
    pub fn pressed(&self) -> &[Key] {
        &self.keys_pressed
    }

    /// Keys released this frame, in arrival order.
    pub fn released(&self) -> &[Key] {
        &self.keys_released
    }
}

/// What the player asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    StopMoving,
    Jump,
    Clap,
    ReleaseClap,
    ChangeLevel(String),
}

/// Translates key presses into [`Action`]s.
///
/// Digit keys select levels from the game config's `levels` list, `1` being
/// the first entry.
#[derive(Clone, Debug, Default)]
pub struct InputMap {
    levels: Vec<String>,
}

impl InputMap {
    pub fn new(levels: Vec<String>) -> Self {
        Self { levels }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.get_many_or_empty("levels"))
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn key_down(&self, key: Key) -> Option<Action> {
        match key {
            Key::Left | Key::A => Some(Action::MoveLeft),
            Key::Right | Key::D => Some(Action::MoveRight),
            Key::Space => Some(Action::Jump),
            Key::E => Some(Action::Clap),
            Key::Digit(n) => {
                let index = usize::from(n).checked_sub(1)?;
                self.levels.get(index).cloned().map(Action::ChangeLevel)
            }
            Key::Escape => None,
        }
    }

    pub fn key_up(&self, key: Key) -> Option<Action> {
        match key {
            Key::Left | Key::A | Key::Right | Key::D => Some(Action::StopMoving),
            Key::E => Some(Action::ReleaseClap),
            _ => None,
        }
    }

    /// Actions for one frame. Releases come before presses so that letting go
    /// of one direction and pressing the other in the same frame turns around.
    pub fn actions(&self, input: &InputState) -> Vec<Action> {
        let released = input.released().iter().filter_map(|k| self.key_up(*k));
        let pressed = input.pressed().iter().filter_map(|k| self.key_down(*k));
        released.chain(pressed).collect()
    }
}

/// Feeds key events to the engine once per frame.
pub trait InputSource {
    fn poll(&mut self, frame: u64, input: &mut InputState);
}

/// Replays a fixed list of key events, each tagged with the frame it fires on.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    events: Vec<(u64, Key, bool)>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn press(mut self, frame: u64, key: Key) -> Self {
        self.events.push((frame, key, true));
        self
    }

    #[must_use]
    pub fn release(mut self, frame: u64, key: Key) -> Self {
        self.events.push((frame, key, false));
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, frame: u64, input: &mut InputState) {
        for (_, key, down) in self.events.iter().filter(|(f, _, _)| *f == frame) {
            if *down {
                input.press(*key);
            } else {
                input.release(*key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_is_pressed_once() {
        let mut input = InputState::new();
        input.press(Key::Space);
        input.press(Key::Space);
        assert_eq!(input.pressed(), &[Key::Space]);

        input.begin_frame();
        input.press(Key::Space);
        assert!(input.is_key_down(Key::Space));
        assert!(!input.is_key_pressed(Key::Space));

        input.release(Key::Space);
        assert!(input.is_key_released(Key::Space));
        assert!(!input.is_key_down(Key::Space));
    }

    #[test]
    fn arrows_and_letters_map_alike() {
        let map = InputMap::default();
        assert_eq!(map.key_down(Key::A), map.key_down(Key::Left));
        assert_eq!(map.key_down(Key::D), Some(Action::MoveRight));
        assert_eq!(map.key_up(Key::Right), Some(Action::StopMoving));
        assert_eq!(map.key_down(Key::E), Some(Action::Clap));
        assert_eq!(map.key_up(Key::E), Some(Action::ReleaseClap));
        assert_eq!(map.key_up(Key::Space), None);
    }

    #[test]
    fn digits_pick_levels_from_config() {
        let cfg = Config::new("game").with_list("levels", ["level1", "caves"]);
        let map = InputMap::from_config(&cfg);
        assert_eq!(
            map.key_down(Key::Digit(2)),
            Some(Action::ChangeLevel("caves".into()))
        );
        assert_eq!(map.key_down(Key::Digit(0)), None);
        assert_eq!(map.key_down(Key::Digit(3)), None);
    }

    #[test]
    fn releases_come_before_presses() {
        let map = InputMap::default();
        let mut input = InputState::new();
        input.press(Key::Left);
        input.begin_frame();
        input.press(Key::Right);
        input.release(Key::Left);
        assert_eq!(
            map.actions(&input),
            vec![Action::StopMoving, Action::MoveRight]
        );
    }

    #[test]
    fn script_fires_on_its_frame() {
        let mut script = ScriptedInput::new().press(2, Key::E).release(3, Key::E);
        let mut input = InputState::new();
        script.poll(1, &mut input);
        assert!(input.pressed().is_empty());
        script.poll(2, &mut input);
        assert!(input.is_key_pressed(Key::E));
        input.begin_frame();
        script.poll(3, &mut input);
        assert!(input.is_key_released(Key::E));
    }
}
