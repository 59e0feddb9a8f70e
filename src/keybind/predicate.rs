//! Key predicates: one key plus an interaction mode

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::KeybindError;
use super::types::KeyCode;
use crate::input::InputState;

/// How a key must be interacting with this frame for a predicate to hold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyMode {
    /// Key went down this frame
    Down,
    /// Key is held this frame
    Pressed,
    /// Key was released this frame
    Up,
    /// Key is not held this frame
    NotPressed,
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyMode::Down => "Down",
            KeyMode::Pressed => "Pressed",
            KeyMode::Up => "Up",
            KeyMode::NotPressed => "NotPressed",
        };
        f.write_str(name)
    }
}

impl FromStr for KeyMode {
    type Err = KeybindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "down" => Ok(KeyMode::Down),
            "pressed" | "held" => Ok(KeyMode::Pressed),
            "up" => Ok(KeyMode::Up),
            "notpressed" | "not_pressed" | "released" => Ok(KeyMode::NotPressed),
            _ => Err(KeybindError::InvalidMode(s.to_string())),
        }
    }
}

/// A single condition over one key
///
/// Stateless; evaluated fresh against each frame's [`InputState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyPredicate {
    pub mode: KeyMode,
    pub key: KeyCode,
}

impl KeyPredicate {
    pub const fn new(mode: KeyMode, key: KeyCode) -> Self {
        Self { mode, key }
    }

    pub const fn down(key: KeyCode) -> Self {
        Self::new(KeyMode::Down, key)
    }

    pub const fn pressed(key: KeyCode) -> Self {
        Self::new(KeyMode::Pressed, key)
    }

    pub const fn up(key: KeyCode) -> Self {
        Self::new(KeyMode::Up, key)
    }

    pub const fn not_pressed(key: KeyCode) -> Self {
        Self::new(KeyMode::NotPressed, key)
    }

    /// Evaluate this predicate against the current frame
    pub fn evaluate(&self, input: &InputState) -> bool {
        match self.mode {
            KeyMode::Down => input.is_down(self.key),
            KeyMode::Pressed => input.is_pressed(self.key),
            KeyMode::Up => input.is_up(self.key),
            KeyMode::NotPressed => !input.is_pressed(self.key),
        }
    }

    /// Evaluate a predicate set: all must hold, and an empty set never holds
    pub fn evaluate_all(predicates: &[KeyPredicate], input: &InputState) -> bool {
        !predicates.is_empty() && predicates.iter().all(|p| p.evaluate(input))
    }
}

impl fmt::Display for KeyPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            KeyMode::Down | KeyMode::Pressed => write!(f, "{}", self.key),
            KeyMode::Up => write!(f, "{} (release)", self.key),
            KeyMode::NotPressed => write!(f, "!{}", self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(held_before: &[KeyCode], held_now: &[KeyCode]) -> InputState {
        let mut input = InputState::new();
        for key in held_before {
            input.press(*key);
        }
        input.end_frame();
        input.release_all();
        for key in held_now {
            input.press(*key);
        }
        input
    }

    #[test]
    fn test_modes() {
        let s = KeyCode::char('s');
        let input = frame_with(&[], &[s]);
        assert!(KeyPredicate::down(s).evaluate(&input));
        assert!(KeyPredicate::pressed(s).evaluate(&input));
        assert!(!KeyPredicate::up(s).evaluate(&input));
        assert!(!KeyPredicate::not_pressed(s).evaluate(&input));

        let input = frame_with(&[s], &[]);
        assert!(!KeyPredicate::down(s).evaluate(&input));
        assert!(KeyPredicate::up(s).evaluate(&input));
        assert!(KeyPredicate::not_pressed(s).evaluate(&input));
    }

    #[test]
    fn test_empty_set_never_holds() {
        let input = frame_with(&[], &[KeyCode::Space]);
        assert!(!KeyPredicate::evaluate_all(&[], &input));
    }

    #[test]
    fn test_all_must_hold() {
        let ctrl = KeyCode::LeftControl;
        let s = KeyCode::char('s');
        let set = [KeyPredicate::pressed(ctrl), KeyPredicate::down(s)];

        assert!(KeyPredicate::evaluate_all(&set, &frame_with(&[ctrl], &[ctrl, s])));
        assert!(!KeyPredicate::evaluate_all(&set, &frame_with(&[], &[s])));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Down".parse::<KeyMode>().unwrap(), KeyMode::Down);
        assert_eq!("notpressed".parse::<KeyMode>().unwrap(), KeyMode::NotPressed);
        assert!("Sideways".parse::<KeyMode>().is_err());
    }
}
