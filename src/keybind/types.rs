//! Core key types: KeyCode and its canonical text form

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::KeybindError;

/// A key (or pointer button) that a predicate can watch
///
/// Character keys are normalized to lowercase so `S` and `s` compare equal.
/// Only ASCII letters fold; `ß` and `é` are kept and shown as they are.
/// Pointer buttons are keys too, which lets bindings mix keyboard and mouse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum KeyCode {
    /// A character key: letters, digits and punctuation
    Char(char),

    // Named keys
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Function keys
    F(u8), // F1-F24

    // Modifiers, left and right are distinct keys
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftMeta,
    RightMeta,

    // Numpad
    Numpad(u8), // Numpad0-Numpad9
    NumpadAdd,
    NumpadSubtract,
    NumpadMultiply,
    NumpadDivide,
    NumpadEnter,
    NumpadDecimal,

    /// Pointer button by index: 0 primary, 1 secondary, 2 middle
    Mouse(u8),
}

impl KeyCode {
    /// Button that drives and commits drags
    pub const PRIMARY_POINTER: KeyCode = KeyCode::Mouse(0);
    /// Button that aborts drags and cancels key capture
    pub const SECONDARY_POINTER: KeyCode = KeyCode::Mouse(1);

    /// Create a character key, normalized to lowercase
    pub fn char(c: char) -> Self {
        KeyCode::Char(c.to_ascii_lowercase())
    }

    /// Check if this is one of the shift keys
    pub fn is_shift(self) -> bool {
        matches!(self, KeyCode::LeftShift | KeyCode::RightShift)
    }

    /// Check if this is one of the control keys
    pub fn is_control(self) -> bool {
        matches!(self, KeyCode::LeftControl | KeyCode::RightControl)
    }

    /// Check if this is a pointer button
    pub fn is_pointer(self) -> bool {
        matches!(self, KeyCode::Mouse(_))
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::Space => write!(f, "Space"),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Escape => write!(f, "Escape"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Insert => write!(f, "Insert"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::PageUp => write!(f, "PageUp"),
            KeyCode::PageDown => write!(f, "PageDown"),
            KeyCode::Up => write!(f, "Up"),
            KeyCode::Down => write!(f, "Down"),
            KeyCode::Left => write!(f, "Left"),
            KeyCode::Right => write!(f, "Right"),
            KeyCode::F(n) => write!(f, "F{}", n),
            KeyCode::LeftShift => write!(f, "LeftShift"),
            KeyCode::RightShift => write!(f, "RightShift"),
            KeyCode::LeftControl => write!(f, "LeftControl"),
            KeyCode::RightControl => write!(f, "RightControl"),
            KeyCode::LeftAlt => write!(f, "LeftAlt"),
            KeyCode::RightAlt => write!(f, "RightAlt"),
            KeyCode::LeftMeta => write!(f, "LeftMeta"),
            KeyCode::RightMeta => write!(f, "RightMeta"),
            KeyCode::Numpad(n) => write!(f, "Numpad{}", n),
            KeyCode::NumpadAdd => write!(f, "NumpadAdd"),
            KeyCode::NumpadSubtract => write!(f, "NumpadSubtract"),
            KeyCode::NumpadMultiply => write!(f, "NumpadMultiply"),
            KeyCode::NumpadDivide => write!(f, "NumpadDivide"),
            KeyCode::NumpadEnter => write!(f, "NumpadEnter"),
            KeyCode::NumpadDecimal => write!(f, "NumpadDecimal"),
            KeyCode::Mouse(n) => write!(f, "Mouse{}", n),
        }
    }
}

impl FromStr for KeyCode {
    type Err = KeybindError;

    /// Parse a key name, case-insensitively
    ///
    /// Accepts the canonical names written by `Display` plus a few common
    /// aliases (`ctrl`, `esc`, `return`, `UpArrow`, `Alpha1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(KeyCode::char(c));
        }

        let lower = trimmed.to_ascii_lowercase();
        let key = match lower.as_str() {
            "space" => KeyCode::Space,
            "enter" | "return" => KeyCode::Enter,
            "escape" | "esc" => KeyCode::Escape,
            "tab" => KeyCode::Tab,
            "backspace" | "back" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "insert" | "ins" => KeyCode::Insert,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdown" | "pgdn" => KeyCode::PageDown,

            "up" | "uparrow" | "arrowup" => KeyCode::Up,
            "down" | "downarrow" | "arrowdown" => KeyCode::Down,
            "left" | "leftarrow" | "arrowleft" => KeyCode::Left,
            "right" | "rightarrow" | "arrowright" => KeyCode::Right,

            "leftshift" | "shift" | "lshift" => KeyCode::LeftShift,
            "rightshift" | "rshift" => KeyCode::RightShift,
            "leftcontrol" | "control" | "ctrl" | "leftctrl" | "lctrl" => KeyCode::LeftControl,
            "rightcontrol" | "rightctrl" | "rctrl" => KeyCode::RightControl,
            "leftalt" | "alt" | "option" | "lalt" => KeyCode::LeftAlt,
            "rightalt" | "ralt" | "altgr" => KeyCode::RightAlt,
            "leftmeta" | "meta" | "cmd" | "super" | "leftcommand" | "leftwindows" => {
                KeyCode::LeftMeta
            }
            "rightmeta" | "rightcommand" | "rightwindows" => KeyCode::RightMeta,

            "numpadadd" | "numadd" | "keypadplus" => KeyCode::NumpadAdd,
            "numpadsubtract" | "numsub" | "keypadminus" => KeyCode::NumpadSubtract,
            "numpadmultiply" | "nummul" | "keypadmultiply" => KeyCode::NumpadMultiply,
            "numpaddivide" | "numdiv" | "keypaddivide" => KeyCode::NumpadDivide,
            "numpadenter" | "numenter" | "keypadenter" => KeyCode::NumpadEnter,
            "numpaddecimal" | "numdot" | "keypadperiod" => KeyCode::NumpadDecimal,

            "minus" => KeyCode::Char('-'),
            "equals" | "equal" => KeyCode::Char('='),
            "comma" => KeyCode::Char(','),
            "period" => KeyCode::Char('.'),
            "slash" => KeyCode::Char('/'),
            "backslash" => KeyCode::Char('\\'),
            "semicolon" => KeyCode::Char(';'),
            "quote" => KeyCode::Char('\''),
            "backquote" => KeyCode::Char('`'),
            "leftbracket" => KeyCode::Char('['),
            "rightbracket" => KeyCode::Char(']'),

            other => return parse_numbered(other).ok_or_else(|| KeybindError::InvalidKey(s.to_string())),
        };
        Ok(key)
    }
}

/// Parse the numbered key families: F1-F24, Numpad0-9, Mouse0-6, Alpha0-9
fn parse_numbered(lower: &str) -> Option<KeyCode> {
    let digits_at = lower.find(|c: char| c.is_ascii_digit())?;
    let (prefix, number) = lower.split_at(digits_at);
    let n: u8 = number.parse().ok()?;

    match prefix {
        "f" if (1..=24).contains(&n) => Some(KeyCode::F(n)),
        "numpad" | "num" | "keypad" if n <= 9 => Some(KeyCode::Numpad(n)),
        "mouse" if n <= 6 => Some(KeyCode::Mouse(n)),
        "alpha" | "digit" if n <= 9 => Some(KeyCode::Char((b'0' + n) as char)),
        _ => None,
    }
}

impl From<KeyCode> for String {
    fn from(key: KeyCode) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for KeyCode {
    type Error = KeybindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
