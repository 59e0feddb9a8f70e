//! Typed access to string-encoded action settings
//!
//! Settings are stored as `name -> string` so unknown keys and odd values
//! survive a load/save cycle untouched. Actions read them through
//! [`ActionSettings`], which validates names against the action's schema
//! and parses values with a fallback to the schema default.

use std::collections::BTreeMap;

use super::action::ActionKind;

/// Value type of a declared setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Bool,
    Int,
    Float,
    Text,
}

/// One declared setting: name, type and default string value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingSpec {
    pub name: &'static str,
    pub kind: SettingKind,
    pub default: &'static str,
}

impl SettingSpec {
    pub const fn flag(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: SettingKind::Bool,
            default,
        }
    }

    pub const fn int(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: SettingKind::Int,
            default,
        }
    }

    pub const fn float(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: SettingKind::Float,
            default,
        }
    }

    pub const fn text(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: SettingKind::Text,
            default,
        }
    }
}

/// Settings map type stored on every keybind
pub type SettingsMap = BTreeMap<String, String>;

/// Build the default settings map for a schema
pub fn default_settings(schema: &[SettingSpec]) -> SettingsMap {
    schema
        .iter()
        .map(|spec| (spec.name.to_string(), spec.default.to_string()))
        .collect()
}

/// Fill in any schema key missing from `settings`
///
/// Existing values win, including ones that do not parse, and keys the
/// schema does not know about are left alone.
pub fn backfill(settings: &mut SettingsMap, schema: &[SettingSpec]) {
    for spec in schema {
        settings
            .entry(spec.name.to_string())
            .or_insert_with(|| spec.default.to_string());
    }
}

/// Parse a bool the way settings files write them ("True"/"False")
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Format a bool the way settings files write them
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Read-only typed view over a keybind's settings for one action
#[derive(Debug, Clone, Copy)]
pub struct ActionSettings<'a> {
    action: ActionKind,
    values: &'a SettingsMap,
}

impl<'a> ActionSettings<'a> {
    pub fn new(action: ActionKind, values: &'a SettingsMap) -> Self {
        Self { action, values }
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }

    /// Look up a declared setting, warning when the action doesn't declare it
    fn spec(&self, name: &str, kind: SettingKind) -> Option<&'static SettingSpec> {
        let spec = self.action.schema().iter().find(|s| s.name == name);
        match spec {
            Some(spec) if spec.kind == kind => Some(spec),
            Some(spec) => {
                tracing::warn!(
                    "Setting '{}' of {} is {:?}, read as {:?}",
                    name,
                    self.action.name(),
                    spec.kind,
                    kind
                );
                Some(spec)
            }
            None => {
                tracing::warn!("{} declares no setting named '{}'", self.action.name(), name);
                None
            }
        }
    }

    /// Raw stored string, falling back to the schema default
    fn raw(&self, spec: &'static SettingSpec) -> &'a str {
        self.values
            .get(spec.name)
            .map(String::as_str)
            .unwrap_or(spec.default)
    }

    fn parsed<T>(&self, name: &str, kind: SettingKind, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        let spec = self.spec(name, kind)?;
        let raw = self.raw(spec);
        parse(raw).or_else(|| {
            tracing::warn!(
                "Malformed value '{}' for '{}' of {}, using default '{}'",
                raw,
                name,
                self.action.name(),
                spec.default
            );
            parse(spec.default)
        })
    }

    pub fn bool(&self, name: &str) -> bool {
        self.parsed(name, SettingKind::Bool, parse_bool)
            .unwrap_or(false)
    }

    pub fn int(&self, name: &str) -> i32 {
        self.parsed(name, SettingKind::Int, |s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn float(&self, name: &str) -> f32 {
        self.parsed(name, SettingKind::Float, |s| {
            s.trim().parse::<f32>().ok().filter(|v| v.is_finite())
        })
        .unwrap_or(0.0)
    }

    pub fn text(&self, name: &str) -> &'a str {
        match self.spec(name, SettingKind::Text) {
            Some(spec) => self.raw(spec),
            None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> SettingsMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_backfill_keeps_existing_and_unknown() {
        let mut settings = map(&[("Use Nearest", "False"), ("Legacy", "x")]);
        backfill(&mut settings, ActionKind::TransformPosition.schema());

        assert_eq!(settings["Use Nearest"], "False");
        assert_eq!(settings["Create Keyframe"], "True");
        assert_eq!(settings["Use Previous"], "False");
        assert_eq!(settings["Legacy"], "x");
    }

    #[test]
    fn test_typed_reads() {
        let settings = map(&[("Layer", "3")]);
        let view = ActionSettings::new(ActionKind::SetLayer, &settings);
        assert_eq!(view.int("Layer"), 3);

        let settings = map(&[("Pitch", "0.25")]);
        let view = ActionSettings::new(ActionKind::AddPitch, &settings);
        assert!((view.float("Pitch") - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_malformed_value_falls_back_without_rewrite() {
        let settings = map(&[("Layer", "three")]);
        let view = ActionSettings::new(ActionKind::SetLayer, &settings);
        assert_eq!(view.int("Layer"), 0);
        assert_eq!(settings["Layer"], "three");
    }

    #[test]
    fn test_missing_value_uses_schema_default() {
        let settings = SettingsMap::new();
        let view = ActionSettings::new(ActionKind::TransformScale, &settings);
        assert!(view.bool("Create Keyframe"));
        assert!(view.bool("Use Nearest"));
        assert!(!view.bool("Use Previous"));
    }

    #[test]
    fn test_undeclared_name_reads_as_type_default() {
        let settings = map(&[("Bogus", "True")]);
        let view = ActionSettings::new(ActionKind::Undo, &settings);
        assert!(!view.bool("Bogus"));
        assert_eq!(view.text("Bogus"), "");
    }

    #[test]
    fn test_parse_bool_variants() {
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(format_bool(true), "True");
    }
}
