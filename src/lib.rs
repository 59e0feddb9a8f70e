//! levelbind - keybind dispatch and keyframe drag engine for a level editor
//!
//! This crate provides the input core of a timeline level editor: a
//! persisted, user-editable table of compound keybinds, a single-fire
//! per-frame dispatcher, and the constrained drag sessions that the grab
//! actions open on keyframes. The editor itself is reached through the
//! traits in [`editor`].

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod drag;
pub mod editor;
pub mod input;
pub mod keybind;
pub mod tracing;

// Re-export commonly used types
pub use config::{DragConfig, EngineConfig};
pub use drag::{DragEngine, DragMode, DragOutcome};
pub use editor::{EditorHost, EditorRequest, Keyframe, KeyframeTarget};
pub use input::InputState;
pub use keybind::{ActionKind, Dispatcher, FrameReport, Keybind, KeybindRegistry, KeyCode};
