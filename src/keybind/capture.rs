//! Rebind mode: wait for exactly one key press
//!
//! While a capture is pending the dispatcher skips normal keybind firing.
//! The first key that goes down is handed to the capture target and the
//! mode ends. The secondary pointer cancels instead of being captured, and
//! the primary pointer is ignored so clicking UI doesn't rebind to it.

use std::fmt;

use super::predicate::{KeyMode, KeyPredicate};
use super::registry::KeybindRegistry;
use super::types::KeyCode;
use crate::input::InputState;

/// Where a captured key goes
pub enum CaptureTarget {
    /// Report the key once
    Callback(Box<dyn FnOnce(KeyCode)>),
    /// Write the key into a keybind's predicate slot
    ///
    /// The slot keeps its mode. A slot past the end appends a `Down`
    /// predicate.
    Keybind { index: usize, slot: usize },
}

impl fmt::Debug for CaptureTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureTarget::Callback(_) => f.write_str("Callback(..)"),
            CaptureTarget::Keybind { index, slot } => f
                .debug_struct("Keybind")
                .field("index", index)
                .field("slot", slot)
                .finish(),
        }
    }
}

/// What happened to a pending capture this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEvent {
    Captured(KeyCode),
    Cancelled,
}

/// Pending capture state
#[derive(Debug, Default)]
pub struct KeyCapture {
    target: Option<CaptureTarget>,
}

impl KeyCapture {
    pub fn new() -> Self {
        Self { target: None }
    }

    /// Start waiting for a key, replacing any pending capture
    pub fn begin(&mut self, target: CaptureTarget) {
        if self.target.is_some() {
            tracing::debug!("Replacing pending key capture");
        }
        self.target = Some(target);
    }

    pub fn cancel(&mut self) -> bool {
        self.target.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// Keybind being rebound, as `(index, slot)`
    pub fn watched(&self) -> Option<(usize, usize)> {
        match self.target {
            Some(CaptureTarget::Keybind { index, slot }) => Some((index, slot)),
            _ => None,
        }
    }

    /// Look for the captured key in this frame's input
    pub fn poll(
        &mut self,
        input: &InputState,
        registry: &mut KeybindRegistry,
    ) -> Option<CaptureEvent> {
        self.target.as_ref()?;

        if input.is_down(KeyCode::SECONDARY_POINTER) {
            self.target = None;
            tracing::debug!("Key capture cancelled");
            return Some(CaptureEvent::Cancelled);
        }

        let key = input
            .just_pressed()
            .find(|key| *key != KeyCode::PRIMARY_POINTER)?;

        match self.target.take()? {
            CaptureTarget::Callback(callback) => callback(key),
            CaptureTarget::Keybind { index, slot } => write_slot(registry, index, slot, key),
        }

        tracing::debug!("Captured key {}", key);
        Some(CaptureEvent::Captured(key))
    }
}

fn write_slot(registry: &mut KeybindRegistry, index: usize, slot: usize, key: KeyCode) {
    let Some(keybind) = registry.get_mut(index) else {
        tracing::warn!("Captured {} for keybind #{}, which no longer exists", key, index);
        return;
    };

    if keybind.has_unparsed_keys() {
        tracing::debug!("Rebinding #{} replaces its unrecognized keys", index);
        keybind.set_predicates(Vec::new());
    }

    match keybind.predicates.get_mut(slot) {
        Some(predicate) => predicate.key = key,
        None => keybind
            .predicates
            .push(KeyPredicate::new(KeyMode::Down, key)),
    }
}
