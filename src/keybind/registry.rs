//! KeybindRegistry: the ordered, persisted collection of keybinds

use std::fmt;
use std::path::Path;

use super::action::ActionKind;
use super::binding::Keybind;
use super::config::{keybinds_to_yaml, load_keybinds_file, parse_keybinds_yaml, save_keybinds_file};
use super::defaults::default_keybinds;
use super::error::KeybindError;
use crate::config::EngineConfig;

/// Problems `diagnostics()` can report about a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Binding has no keys and can never fire
    EmptyPredicates { index: usize, id: String },
    /// Binding names keys or modes this version can't read; kept but inert
    UnrecognizedKeys { index: usize, id: String },
    /// Action index doesn't resolve to an action
    UnknownAction { index: usize, id: String, action: i32 },
    /// An earlier binding with the same keys always wins
    Shadowed {
        index: usize,
        id: String,
        shadowed_by: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EmptyPredicates { index, id } => {
                write!(f, "#{} ({}): no keys, can never fire", index, id)
            }
            Diagnostic::UnrecognizedKeys { index, id } => {
                write!(f, "#{} ({}): unrecognized keys, disabled", index, id)
            }
            Diagnostic::UnknownAction { index, id, action } => {
                write!(f, "#{} ({}): unknown action index {}", index, id, action)
            }
            Diagnostic::Shadowed {
                index,
                id,
                shadowed_by,
            } => write!(
                f,
                "#{} ({}): same keys as #{}, which takes priority",
                index, id, shadowed_by
            ),
        }
    }
}

/// The registry owns every keybind; order is dispatch priority
#[derive(Debug, Clone)]
pub struct KeybindRegistry {
    keybinds: Vec<Keybind>,
    warn_duplicates: bool,
}

impl Default for KeybindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            keybinds: Vec::new(),
            warn_duplicates: true,
        }
    }

    /// Create a registry with the given keybinds
    pub fn with_keybinds(keybinds: Vec<Keybind>) -> Self {
        Self {
            keybinds,
            warn_duplicates: true,
        }
    }

    /// Create a registry holding the built-in defaults
    pub fn with_defaults() -> Self {
        Self::with_keybinds(default_keybinds())
    }

    /// Toggle the duplicate-predicate warning on `add`
    pub fn set_warn_duplicates(&mut self, warn: bool) {
        self.warn_duplicates = warn;
    }

    pub fn warns_duplicates(&self) -> bool {
        self.warn_duplicates
    }

    /// Apply the registry-related engine settings
    pub fn apply_config(&mut self, config: &EngineConfig) {
        self.set_warn_duplicates(config.warn_duplicate_predicates);
    }

    /// Replace the contents with the built-in defaults
    pub fn bootstrap_defaults(&mut self) {
        self.keybinds = default_keybinds();
        tracing::info!("Bootstrapped {} default keybinds", self.keybinds.len());
    }

    /// Parse a registry from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, KeybindError> {
        parse_keybinds_yaml(yaml).map(Self::with_keybinds)
    }

    /// Serialize the registry to YAML
    pub fn to_yaml(&self) -> Result<String, KeybindError> {
        keybinds_to_yaml(&self.keybinds)
    }

    /// Load from a file, propagating errors
    pub fn try_load(path: &Path) -> Result<Self, KeybindError> {
        load_keybinds_file(path).map(Self::with_keybinds)
    }

    /// Load from a file; a missing, unreadable or corrupt file yields an
    /// empty registry
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(registry) => {
                tracing::info!(
                    "Loaded {} keybinds from {}",
                    registry.len(),
                    path.display()
                );
                registry
            }
            Err(e) => {
                tracing::warn!("Failed to load keybinds from {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Load from a file, bootstrapping and writing defaults if none exists
    pub fn load_or_bootstrap(path: &Path) -> Self {
        if path.exists() {
            return Self::load(path);
        }

        tracing::info!(
            "No keybinds file at {}, writing defaults",
            path.display()
        );
        let registry = Self::with_defaults();
        if let Err(e) = registry.save(path) {
            tracing::warn!("Failed to write default keybinds: {}", e);
        }
        registry
    }

    /// Save to a file
    pub fn save(&self, path: &Path) -> Result<(), KeybindError> {
        save_keybinds_file(path, &self.keybinds)?;
        tracing::info!("Saved {} keybinds to {}", self.len(), path.display());
        Ok(())
    }

    /// Append a keybind, returning its index
    ///
    /// A binding whose keys match an existing one is still added; the
    /// earlier binding keeps priority, so a warning is logged.
    pub fn add(&mut self, keybind: Keybind) -> usize {
        if self.warn_duplicates {
            if let Some(existing) = self
                .keybinds
                .iter()
                .position(|k| !k.predicates.is_empty() && k.has_same_predicates(&keybind))
            {
                tracing::warn!(
                    "Keybind for {} uses the same keys ({}) as #{} ({}), which takes priority",
                    keybind.action_name(),
                    keybind.display_string(),
                    existing,
                    self.keybinds[existing].action_name()
                );
            }
        }
        self.keybinds.push(keybind);
        self.keybinds.len() - 1
    }

    /// Remove the keybind at `index`
    pub fn remove_at(&mut self, index: usize) -> Option<Keybind> {
        if index < self.keybinds.len() {
            Some(self.keybinds.remove(index))
        } else {
            None
        }
    }

    /// Move a keybind to a new priority position
    pub fn move_binding(&mut self, from: usize, to: usize) -> bool {
        if from >= self.keybinds.len() || to >= self.keybinds.len() {
            return false;
        }
        let keybind = self.keybinds.remove(from);
        self.keybinds.insert(to, keybind);
        true
    }

    /// Reassign a keybind's action, back-filling the new defaults
    pub fn set_action(&mut self, index: usize, action: ActionKind) -> bool {
        match self.keybinds.get_mut(index) {
            Some(keybind) => {
                keybind.set_action(action);
                true
            }
            None => false,
        }
    }

    /// First keybind whose action has the given name
    pub fn find_by_name(&self, action_name: &str) -> Option<&Keybind> {
        let kind = ActionKind::from_name(action_name)?;
        self.binding_for(kind)
    }

    /// First keybind bound to an action
    pub fn binding_for(&self, action: ActionKind) -> Option<&Keybind> {
        self.keybinds
            .iter()
            .find(|k| k.action == action.index())
    }

    /// Display string for an action's first keybind
    pub fn display_for(&self, action: ActionKind) -> Option<String> {
        self.binding_for(action).map(|k| k.display_string())
    }

    pub fn get(&self, index: usize) -> Option<&Keybind> {
        self.keybinds.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Keybind> {
        self.keybinds.get_mut(index)
    }

    /// All keybinds in priority order
    pub fn keybinds(&self) -> &[Keybind] {
        &self.keybinds
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keybind> {
        self.keybinds.iter()
    }

    pub fn len(&self) -> usize {
        self.keybinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keybinds.is_empty()
    }

    /// Report bindings that can't fire or are shadowed
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut found = Vec::new();

        for (index, keybind) in self.keybinds.iter().enumerate() {
            if keybind.has_unparsed_keys() {
                found.push(Diagnostic::UnrecognizedKeys {
                    index,
                    id: keybind.id.clone(),
                });
            } else if keybind.predicates.is_empty() {
                found.push(Diagnostic::EmptyPredicates {
                    index,
                    id: keybind.id.clone(),
                });
            } else if let Some(shadowed_by) = self.keybinds[..index]
                .iter()
                .position(|k| k.has_same_predicates(keybind))
            {
                found.push(Diagnostic::Shadowed {
                    index,
                    id: keybind.id.clone(),
                    shadowed_by,
                });
            }

            if keybind.action_kind().is_none() {
                found.push(Diagnostic::UnknownAction {
                    index,
                    id: keybind.id.clone(),
                    action: keybind.action,
                });
            }
        }

        found
    }
}
