//! Errors for keybind parsing and persistence

/// Errors that can occur when loading, parsing or saving keybinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeybindError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    InvalidKey(String),
    InvalidMode(String),
}

impl std::fmt::Display for KeybindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeybindError::IoError(e) => write!(f, "IO error: {}", e),
            KeybindError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeybindError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            KeybindError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeybindError::InvalidMode(m) => write!(f, "Invalid key mode: {}", m),
        }
    }
}

impl std::error::Error for KeybindError {}
