//! Input events and held-key tracking.

use std::collections::HashMap;
use std::ops::BitOr;
use std::time::{Duration, Instant};

/// A key, independent of the terminal backend.
///
/// Letters are always stored lowercase; shift is carried in [`Modifiers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Space,
    Tab,
    Escape,
    Enter,
}

impl Key {
    /// Build a key from a typed character, folding case.
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => Key::Space,
            '\t' => Key::Tab,
            c => Key::Char(c.to_ascii_lowercase()),
        }
    }

    /// Short display name.
    pub fn name(&self) -> String {
        match self {
            Key::Char(c) => c.to_string(),
            Key::Space => "space".into(),
            Key::Tab => "tab".into(),
            Key::Escape => "escape".into(),
            Key::Enter => "return".into(),
        }
    }
}

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(0b001);
    pub const CTRL: Modifiers = Modifiers(0b010);
    pub const ALT: Modifiers = Modifiers(0b100);

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn shift(self) -> bool {
        self.contains(Modifiers::SHIFT)
    }

    pub const fn ctrl(self) -> bool {
        self.contains(Modifiers::CTRL)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

/// A key press with the modifiers active at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// An input event delivered to an animated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Quit,
    KeyDown(KeyPress),
}

/// How long a key stays held after its last event when the terminal cannot
/// report releases. Covers the usual delay before auto-repeat starts.
pub const DEFAULT_HOLD: Duration = Duration::from_millis(600);

/// The set of keys currently held down.
///
/// Terminals that report key releases give exact tracking. Others only send
/// presses and auto-repeats, so each key expires once `hold` has passed
/// since its last event.
#[derive(Debug, Clone)]
pub struct KeyboardState {
    held: HashMap<Key, Instant>,
    modifiers: Modifiers,
    hold: Option<Duration>,
}

impl KeyboardState {
    /// Tracking driven by explicit release events.
    pub fn with_releases() -> Self {
        Self {
            held: HashMap::new(),
            modifiers: Modifiers::NONE,
            hold: None,
        }
    }

    /// Tracking where keys expire after `hold` without a press or repeat.
    pub fn with_hold(hold: Duration) -> Self {
        Self {
            held: HashMap::new(),
            modifiers: Modifiers::NONE,
            hold: Some(hold),
        }
    }

    /// Record a press or auto-repeat.
    pub fn press(&mut self, press: KeyPress) {
        self.press_at(press, Instant::now());
    }

    fn press_at(&mut self, press: KeyPress, at: Instant) {
        self.held.insert(press.key, at);
        self.modifiers = press.modifiers;
    }

    /// Record a release.
    pub fn release(&mut self, press: KeyPress) {
        self.held.remove(&press.key);
        self.modifiers = press.modifiers;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Drop keys whose hold ran out by the end of this frame.
    pub fn end_frame(&mut self) {
        self.expire(Instant::now());
    }

    /// Drop keys last seen `hold` or more before `now`.
    pub fn expire(&mut self, now: Instant) {
        let Some(hold) = self.hold else {
            return;
        };
        self.held
            .retain(|_, seen| now.saturating_duration_since(*seen) < hold);
        if self.held.is_empty() {
            self.modifiers = Modifiers::NONE;
        }
    }

    /// Forget every held key.
    pub fn clear(&mut self) {
        self.held.clear();
        self.modifiers = Modifiers::NONE;
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::with_hold(DEFAULT_HOLD)
    }
}
