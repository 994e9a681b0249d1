//! Keyboard state
//!
//! The platform layer feeds key presses and releases in; the game reads a
//! held-key table for continuous movement and a parallel "processed" table
//! so menu actions fire once per press.

use serde::{Deserialize, Serialize};

/// Keys the game binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Escape,
    Space,
    W,
    A,
    S,
    D,
}

impl Key {
    pub const ALL: [Key; KEY_COUNT] = [
        Key::Enter,
        Key::Escape,
        Key::Space,
        Key::W,
        Key::A,
        Key::S,
        Key::D,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Number of bound keys
pub const KEY_COUNT: usize = 7;

#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    down: [bool; KEY_COUNT],
    processed: [bool; KEY_COUNT],
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.down[key.index()] = true;
    }

    /// Releasing a key re-arms its edge trigger
    pub fn release(&mut self, key: Key) {
        self.down[key.index()] = false;
        self.processed[key.index()] = false;
    }

    pub fn set(&mut self, key: Key, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    /// Key is currently held (level-triggered)
    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }

    /// Consume a fresh press: true once per press, then false until released
    pub fn take_press(&mut self, key: Key) -> bool {
        let i = key.index();
        if self.down[i] && !self.processed[i] {
            self.processed[i] = true;
            true
        } else {
            false
        }
    }

    pub fn release_all(&mut self) {
        for key in Key::ALL {
            self.release(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_key_fires_once() {
        let mut keys = Keyboard::new();
        keys.press(Key::Enter);
        assert!(keys.take_press(Key::Enter));
        assert!(!keys.take_press(Key::Enter));
        assert!(keys.is_down(Key::Enter));

        keys.release(Key::Enter);
        assert!(!keys.take_press(Key::Enter));

        keys.press(Key::Enter);
        assert!(keys.take_press(Key::Enter));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut keys = Keyboard::new();
        keys.press(Key::W);
        keys.press(Key::S);
        assert!(keys.take_press(Key::W));
        assert!(keys.take_press(Key::S));
        assert!(!keys.is_down(Key::A));
    }

    #[test]
    fn test_key_table_covers_all_keys() {
        for (i, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }
}
