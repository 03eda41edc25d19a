//! Keyboard state
//!
//! The simulation only asks "is this key held right now"; there is no event
//! queue. Browser key events (or a script, natively) feed a `KeySet`.

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    W,
    A,
    S,
    D,
}

impl Key {
    /// Parse a key name, ignoring case ("UP", "space", "W", ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "UP" => Some(Key::Up),
            "DOWN" => Some(Key::Down),
            "LEFT" => Some(Key::Left),
            "RIGHT" => Some(Key::Right),
            "SPACE" => Some(Key::Space),
            "W" => Some(Key::W),
            "A" => Some(Key::A),
            "S" => Some(Key::S),
            "D" => Some(Key::D),
            _ => None,
        }
    }

    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "Up" => Some(Key::Up),
            "ArrowDown" | "Down" => Some(Key::Down),
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            " " | "Spacebar" => Some(Key::Space),
            other => Self::from_name(other).filter(|k| k.is_letter()),
        }
    }

    fn is_letter(&self) -> bool {
        matches!(self, Key::W | Key::A | Key::S | Key::D)
    }

    #[inline]
    fn bit(&self) -> u16 {
        1 << (*self as u16)
    }
}

/// "Is key K currently held"
pub trait KeyboardState {
    fn is_down(&self, key: Key) -> bool;
}

/// Set of currently held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet {
    held: u16,
}

impl KeySet {
    pub fn press(&mut self, key: Key) {
        self.held |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.held &= !key.bit();
    }

    /// Press or release
    pub fn set(&mut self, key: Key, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    /// Drop everything (window lost focus, so releases will not arrive)
    pub fn clear(&mut self) {
        self.held = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.held == 0
    }
}

impl KeyboardState for KeySet {
    fn is_down(&self, key: Key) -> bool {
        self.held & key.bit() != 0
    }
}
