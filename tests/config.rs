//! Configuration system tests
//!
//! Tests for config paths and engine config loading/saving.

use std::fs;
use std::path::PathBuf;

use levelbind::config::{DragConfig, EngineConfig};
use levelbind::config_paths;
use levelbind::keybind::KeybindRegistry;
use tempfile::TempDir;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("levelbind"));
    }
}

#[test]
fn test_keybinds_file_ends_with_yaml() {
    if let Some(path) = config_paths::keybinds_file() {
        assert!(path.to_string_lossy().ends_with("keybinds.yaml"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_files_live_in_config_dir() {
    if let (Some(dir), Some(keybinds), Some(logs)) = (
        config_paths::config_dir(),
        config_paths::keybinds_file(),
        config_paths::logs_dir(),
    ) {
        assert_eq!(keybinds.parent(), Some(dir.as_path()));
        assert_eq!(logs.parent(), Some(dir.as_path()));
    }
}

// ========================================================================
// EngineConfig Tests
// ========================================================================

#[test]
fn test_missing_config_is_default() {
    let dir = TempDir::new().unwrap();
    let config = EngineConfig::load_from(&dir.path().join("config.yaml"));
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "drag:\n  rotation_snap_degrees: 45.0\n").unwrap();

    let config = EngineConfig::load_from(&path);
    assert_eq!(config.drag.rotation_snap_degrees, 45.0);
    assert_eq!(config.drag.nearest_epsilon, 0.1);
    assert_eq!(config.drag.uniform_scale_multiplier, 2.0);
    assert!(config.warn_duplicate_predicates);
    assert!(config.keybinds_file.is_none());
}

#[test]
fn test_corrupt_config_is_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "drag: [not, a, map").unwrap();

    assert_eq!(EngineConfig::load_from(&path), EngineConfig::default());
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sub").join("config.yaml");

    let config = EngineConfig {
        keybinds_file: Some(PathBuf::from("/tmp/custom-keybinds.yaml")),
        warn_duplicate_predicates: false,
        drag: DragConfig {
            position_quantum: 0.5,
            ..DragConfig::default()
        },
    };
    config.save_to(&path).unwrap();

    assert_eq!(EngineConfig::load_from(&path), config);
}

#[test]
fn test_keybinds_path_prefers_override() {
    let config = EngineConfig {
        keybinds_file: Some(PathBuf::from("elsewhere.yaml")),
        ..EngineConfig::default()
    };
    assert_eq!(config.keybinds_path(), Some(PathBuf::from("elsewhere.yaml")));

    let fallback = EngineConfig::default().keybinds_path();
    assert_eq!(fallback, config_paths::keybinds_file());
}

#[test]
fn test_duplicate_warning_setting_reaches_registry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "warn_duplicate_predicates: false\n").unwrap();

    let config = EngineConfig::load_from(&path);
    let mut registry = KeybindRegistry::with_defaults();
    assert!(registry.warns_duplicates());

    registry.apply_config(&config);
    assert!(!registry.warns_duplicates());

    registry.apply_config(&EngineConfig::default());
    assert!(registry.warns_duplicates());
}
