//! YAML persistence for keybinds
//!
//! The on-disk shape is a list of records, each carrying an id, an action
//! index, an ordered key list and a settings list of name/value strings.
//! Record fields this version doesn't know are captured and written back,
//! and so is a key list naming keys or modes this version can't parse.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::binding::{new_keybind_id, Keybind, RawPredicate};
use super::error::KeybindError;
use super::predicate::{KeyMode, KeyPredicate};
use super::settings::format_bool;
use super::types::KeyCode;

/// Root structure of a keybinds YAML file
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct KeybindsFile {
    #[serde(default)]
    pub keybinds: Vec<KeybindRecord>,
}

/// A single keybind entry from YAML
#[derive(Debug, Serialize, Deserialize)]
pub struct KeybindRecord {
    #[serde(default, deserialize_with = "scalar_string")]
    pub id: String,
    pub action: i32,
    #[serde(default)]
    pub keys: Vec<PredicateRecord>,
    #[serde(default)]
    pub settings: Vec<SettingRecord>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A `{mode, key}` pair from YAML
#[derive(Debug, Serialize, Deserialize)]
pub struct PredicateRecord {
    #[serde(deserialize_with = "scalar_string")]
    pub mode: String,
    #[serde(deserialize_with = "scalar_string")]
    pub key: String,
}

/// A `{name, value}` settings pair from YAML
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingRecord {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub value: String,
}

/// Accept any YAML scalar where a string is expected
///
/// Hand-edited files write `value: 0` or `value: true` unquoted.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(String::new()),
        serde_yaml::Value::Bool(b) => Ok(format_bool(b).to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::String(s) => Ok(s),
        other => Err(D::Error::custom(format!("expected a scalar, found {:?}", other))),
    }
}

impl KeybindRecord {
    /// Convert into a keybind, back-filling schema defaults
    ///
    /// A key list that doesn't fully parse is kept verbatim and the keybind
    /// is inert.
    pub fn into_keybind(self) -> Keybind {
        let parsed = self
            .keys
            .iter()
            .map(|record| {
                let mode: KeyMode = record.mode.parse()?;
                let key: KeyCode = record.key.parse()?;
                Ok(KeyPredicate::new(mode, key))
            })
            .collect::<Result<Vec<_>, KeybindError>>();

        let (predicates, unparsed_keys) = match parsed {
            Ok(predicates) => (predicates, Vec::new()),
            Err(e) => {
                tracing::warn!("Keybind {} disabled, keys kept as written: {}", self.id, e);
                let raw = self
                    .keys
                    .into_iter()
                    .map(|record| RawPredicate {
                        mode: record.mode,
                        key: record.key,
                    })
                    .collect();
                (Vec::new(), raw)
            }
        };

        let settings = self
            .settings
            .into_iter()
            .map(|s| (s.name, s.value))
            .collect();

        let id = if self.id.is_empty() {
            new_keybind_id()
        } else {
            self.id
        };

        let mut keybind = Keybind {
            id,
            predicates,
            action: self.action,
            settings,
            extra: self.extra,
            unparsed_keys,
        };
        keybind.backfill_settings();
        keybind
    }

    pub fn from_keybind(keybind: &Keybind) -> Self {
        Self {
            id: keybind.id.clone(),
            action: keybind.action,
            keys: if keybind.has_unparsed_keys() {
                keybind
                    .unparsed_keys
                    .iter()
                    .map(|raw| PredicateRecord {
                        mode: raw.mode.clone(),
                        key: raw.key.clone(),
                    })
                    .collect()
            } else {
                keybind
                    .predicates
                    .iter()
                    .map(|p| PredicateRecord {
                        mode: p.mode.to_string(),
                        key: p.key.to_string(),
                    })
                    .collect()
            },
            settings: keybind
                .settings
                .iter()
                .map(|(name, value)| SettingRecord {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
            extra: keybind.extra.clone(),
        }
    }
}

/// Load keybinds from a YAML file
pub fn load_keybinds_file(path: &Path) -> Result<Vec<Keybind>, KeybindError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| KeybindError::IoError(e.to_string()))?;

    parse_keybinds_yaml(&content)
}

/// Parse keybinds from a YAML string
///
/// A document that isn't valid YAML for this shape is an error. A record
/// with an unknown key or mode loads as an inert keybind, so one bad hand
/// edit costs neither the other bindings nor itself on the next save.
pub fn parse_keybinds_yaml(yaml: &str) -> Result<Vec<Keybind>, KeybindError> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }

    let file: KeybindsFile =
        serde_yaml::from_str(yaml).map_err(|e| KeybindError::ParseError(e.to_string()))?;

    Ok(file
        .keybinds
        .into_iter()
        .map(KeybindRecord::into_keybind)
        .collect())
}

/// Serialize keybinds to a YAML string
pub fn keybinds_to_yaml(keybinds: &[Keybind]) -> Result<String, KeybindError> {
    let file = KeybindsFile {
        keybinds: keybinds.iter().map(KeybindRecord::from_keybind).collect(),
    };
    serde_yaml::to_string(&file).map_err(|e| KeybindError::SerializeError(e.to_string()))
}

/// Write keybinds to a YAML file, creating the parent directory
pub fn save_keybinds_file(path: &Path, keybinds: &[Keybind]) -> Result<(), KeybindError> {
    let content = keybinds_to_yaml(keybinds)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| KeybindError::IoError(e.to_string()))?;
        }
    }

    std::fs::write(path, content).map_err(|e| KeybindError::IoError(e.to_string()))
}
