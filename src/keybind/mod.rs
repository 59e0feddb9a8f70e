//! Configurable keybind system for the level editor
//!
//! This module provides a data-driven keybind system that:
//! - Maps compound key conditions (held, pressed, released, not held) to
//!   parameterized editor actions
//! - Fires at most one action per frame, in registry order
//! - Persists bindings to YAML, keeping fields it doesn't understand
//! - Supports rebinding by capturing the next key press
//!
//! # Architecture
//!
//! ```text
//! winit events → InputState → Dispatcher::poll() → Keybind → ActionTable → EditorHost / EditorRequest
//! ```
//!
//! # Loading Keybinds
//!
//! ```ignore
//! // Load from disk, writing defaults the first time
//! let mut registry = KeybindRegistry::load_or_bootstrap(&path);
//! let mut dispatcher = Dispatcher::default();
//!
//! // Once per frame
//! let report = dispatcher.poll(&mut registry, &input, &mut editor);
//! input.end_frame();
//! ```

mod action;
mod binding;
mod capture;
mod config;
mod defaults;
mod dispatcher;
mod error;
mod predicate;
mod registry;
mod settings;
mod table;
mod types;
mod winit_adapter;

pub use action::ActionKind;
pub use binding::{new_keybind_id, Keybind, RawPredicate};
pub use capture::{CaptureEvent, CaptureTarget, KeyCapture};
pub use config::{
    keybinds_to_yaml, load_keybinds_file, parse_keybinds_yaml, save_keybinds_file, KeybindRecord,
    KeybindsFile, PredicateRecord, SettingRecord,
};
pub use defaults::default_keybinds;
pub use dispatcher::{Dispatcher, FiredAction, FrameReport, Suppression};
pub use error::KeybindError;
pub use predicate::{KeyMode, KeyPredicate};
pub use registry::{Diagnostic, KeybindRegistry};
pub use settings::{
    backfill, default_settings, format_bool, parse_bool, ActionSettings, SettingKind, SettingSpec,
    SettingsMap,
};
pub use table::{ActionContext, ActionEntry, ActionHandler, ActionTable, MIN_PITCH};
pub use types::KeyCode;
pub use winit_adapter::{apply_key_event, apply_mouse_event, key_from_mouse_button, key_from_winit};

#[cfg(test)]
mod tests;
