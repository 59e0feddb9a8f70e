//! Per-frame dispatcher
//!
//! The host owns one [`Dispatcher`] next to its [`KeybindRegistry`] and calls
//! [`Dispatcher::poll`] once per frame:
//!
//! ```text
//! reset latch → capture mode? → gating → first satisfied keybind fires → drag update
//! ```
//!
//! At most one keybind fires per poll. Registry order decides which.

use super::action::ActionKind;
use super::binding::Keybind;
use super::capture::{CaptureEvent, CaptureTarget, KeyCapture};
use super::registry::KeybindRegistry;
use super::table::{ActionContext, ActionTable};
use super::types::KeyCode;
use crate::config::DragConfig;
use crate::drag::{DragEngine, DragOutcome};
use crate::editor::{EditorHost, EditorRequest};
use crate::input::InputState;

/// Why keybind evaluation was skipped this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppression {
    TextInputFocused,
    Dragging,
    NotEditing,
    WindowUnfocused,
}

/// The keybind that fired this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredAction {
    /// Registry index of the keybind
    pub keybind: usize,
    /// Raw action index (may be out of range)
    pub action: i32,
}

impl FiredAction {
    pub fn kind(&self) -> Option<ActionKind> {
        ActionKind::from_index(self.action)
    }
}

/// Everything that happened in one poll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub fired: Option<FiredAction>,
    pub suppressed: Option<Suppression>,
    pub capture: Option<CaptureEvent>,
    pub drag: DragOutcome,
    /// Work for the host, in the order actions queued it
    pub requests: Vec<EditorRequest>,
}

#[derive(Debug)]
pub struct Dispatcher {
    actions: ActionTable,
    drag: DragEngine,
    capture: KeyCapture,
    is_pressing_key: bool,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl Dispatcher {
    pub fn new(drag: DragConfig) -> Self {
        Self {
            actions: ActionTable::new(),
            drag: DragEngine::new(drag),
            capture: KeyCapture::new(),
            is_pressing_key: false,
        }
    }

    /// Run one frame
    pub fn poll(
        &mut self,
        registry: &mut KeybindRegistry,
        input: &InputState,
        host: &mut dyn EditorHost,
    ) -> FrameReport {
        self.is_pressing_key = false;
        let mut report = FrameReport::default();

        if self.capture.is_active() {
            report.capture = self.capture.poll(input, registry);
        } else if let Some(reason) = self.suppression(input, &*host) {
            report.suppressed = Some(reason);
        } else {
            report.fired = self.dispatch(registry, input, &mut *host, &mut report.requests);
        }

        if self.drag.is_dragging() {
            report.drag = self.drag.update(host, input);
        }

        report
    }

    fn suppression(&self, input: &InputState, host: &dyn EditorHost) -> Option<Suppression> {
        if input.text_input_focused() {
            Some(Suppression::TextInputFocused)
        } else if self.drag.is_dragging() {
            Some(Suppression::Dragging)
        } else if !host.is_editing() {
            Some(Suppression::NotEditing)
        } else if !input.window_focused() {
            Some(Suppression::WindowUnfocused)
        } else {
            None
        }
    }

    /// Fire the first satisfied, eligible keybind
    fn dispatch(
        &mut self,
        registry: &KeybindRegistry,
        input: &InputState,
        host: &mut dyn EditorHost,
        requests: &mut Vec<EditorRequest>,
    ) -> Option<FiredAction> {
        let document_loaded = host.document_loaded();
        let mut fired = None;

        for (index, keybind) in registry.iter().enumerate() {
            if self.is_pressing_key {
                break;
            }
            if !keybind.is_satisfied(input) {
                continue;
            }
            if !document_loaded
                && keybind
                    .action_kind()
                    .is_some_and(|kind| !kind.available_without_document())
            {
                continue;
            }

            self.is_pressing_key = true;
            let mut cx = ActionContext::new(&mut *host, &mut self.drag, requests);
            self.actions.invoke(keybind.action, keybind, &mut cx);
            fired = Some(FiredAction {
                keybind: index,
                action: keybind.action,
            });
        }

        fired
    }

    /// Run a keybind's action outside the poll loop
    ///
    /// Returns the requests it queued.
    pub fn invoke(&mut self, keybind: &Keybind, host: &mut dyn EditorHost) -> Vec<EditorRequest> {
        let mut requests = Vec::new();
        let mut cx = ActionContext::new(host, &mut self.drag, &mut requests);
        self.actions.invoke(keybind.action, keybind, &mut cx);
        requests
    }

    /// Report the next key pressed to `callback`
    pub fn begin_capture(&mut self, callback: impl FnOnce(KeyCode) + 'static) {
        self.capture.begin(CaptureTarget::Callback(Box::new(callback)));
    }

    /// Write the next key pressed into predicate `slot` of keybind `index`
    pub fn watch_keybind(&mut self, index: usize, slot: usize) {
        self.capture.begin(CaptureTarget::Keybind { index, slot });
    }

    pub fn cancel_capture(&mut self) -> bool {
        self.capture.cancel()
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_active()
    }

    /// Keybind and slot currently being rebound
    pub fn watched_keybind(&self) -> Option<(usize, usize)> {
        self.capture.watched()
    }

    /// A keybind fired during the current poll
    pub fn is_pressing_key(&self) -> bool {
        self.is_pressing_key
    }

    pub fn drag(&self) -> &DragEngine {
        &self.drag
    }

    /// Abort the active drag from outside the input loop
    pub fn abort_drag(&mut self, host: &mut dyn EditorHost) -> DragOutcome {
        self.drag.abort(host)
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }
}
