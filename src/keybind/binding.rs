//! Keybind struct: a predicate set mapped to a parameterized action

use std::collections::BTreeMap;

use super::action::ActionKind;
use super::predicate::KeyPredicate;
use super::settings::{backfill, ActionSettings, SettingsMap};
use crate::input::InputState;

/// A `{mode, key}` pair kept exactly as the file spelled it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPredicate {
    pub mode: String,
    pub key: String,
}

/// A persisted rule mapping a compound key condition to an action
#[derive(Debug, Clone, PartialEq)]
pub struct Keybind {
    /// Opaque identifier
    pub id: String,
    /// All must hold for the binding to fire; empty never fires
    pub predicates: Vec<KeyPredicate>,
    /// Index into the action table; may be out of range
    pub action: i32,
    /// String-encoded action parameters
    pub settings: SettingsMap,
    /// Record fields this version doesn't understand, kept for re-saving
    pub extra: BTreeMap<String, serde_yaml::Value>,
    /// The whole key list as loaded, when some key or mode didn't parse.
    /// Non-empty means the binding is inert and `predicates` is empty.
    pub unparsed_keys: Vec<RawPredicate>,
}

impl Keybind {
    /// Create a binding for an action with its default settings
    pub fn new(action: ActionKind, predicates: Vec<KeyPredicate>) -> Self {
        Self {
            id: new_keybind_id(),
            predicates,
            action: action.index(),
            settings: action.default_settings(),
            extra: BTreeMap::new(),
            unparsed_keys: Vec::new(),
        }
    }

    /// Override one setting (builder pattern)
    pub fn with_setting(mut self, name: &str, value: &str) -> Self {
        self.settings.insert(name.to_string(), value.to_string());
        self
    }

    /// Resolve the action index; `None` when out of range
    pub fn action_kind(&self) -> Option<ActionKind> {
        ActionKind::from_index(self.action)
    }

    /// Typed view over the settings, if the action resolves
    pub fn action_settings(&self) -> Option<ActionSettings<'_>> {
        self.action_kind()
            .map(|kind| ActionSettings::new(kind, &self.settings))
    }

    /// Reassign the action, back-filling the new action's defaults
    pub fn set_action(&mut self, action: ActionKind) {
        self.action = action.index();
        backfill(&mut self.settings, action.schema());
    }

    /// Back-fill schema defaults for the current action
    pub fn backfill_settings(&mut self) {
        if let Some(kind) = self.action_kind() {
            backfill(&mut self.settings, kind.schema());
        }
    }

    /// All predicates hold this frame; inert bindings never hold
    pub fn is_satisfied(&self, input: &InputState) -> bool {
        !self.has_unparsed_keys() && KeyPredicate::evaluate_all(&self.predicates, input)
    }

    /// Loaded with keys this version can't read; kept only for re-saving
    pub fn has_unparsed_keys(&self) -> bool {
        !self.unparsed_keys.is_empty()
    }

    /// Replace the key list, dropping any unparsed keys
    pub fn set_predicates(&mut self, predicates: Vec<KeyPredicate>) {
        self.unparsed_keys.clear();
        self.predicates = predicates;
    }

    /// Same predicate set as another binding, ignoring order
    pub fn has_same_predicates(&self, other: &Keybind) -> bool {
        self.predicates.len() == other.predicates.len()
            && self
                .predicates
                .iter()
                .all(|p| other.predicates.contains(p))
    }

    /// Display string like "LeftControl + S"
    pub fn display_string(&self) -> String {
        if self.has_unparsed_keys() {
            let keys: Vec<&str> = self.unparsed_keys.iter().map(|raw| raw.key.as_str()).collect();
            return format!("{} (unrecognized)", keys.join(" + "));
        }
        if self.predicates.is_empty() {
            return "(unbound)".to_string();
        }
        self.predicates
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Name of the bound action, or a placeholder for bad indices
    pub fn action_name(&self) -> String {
        match self.action_kind() {
            Some(kind) => kind.name().to_string(),
            None => format!("<unknown action {}>", self.action),
        }
    }
}

/// Generate a fresh opaque keybind id
pub fn new_keybind_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
