//! Cross-module tests for the keybind system

use super::*;
use crate::input::InputState;

#[test]
fn test_defaults_round_trip_through_yaml() {
    let registry = KeybindRegistry::with_defaults();
    let yaml = registry.to_yaml().expect("defaults should serialize");
    let reloaded = KeybindRegistry::from_yaml(&yaml).expect("defaults should parse");

    assert_eq!(reloaded.keybinds(), registry.keybinds());
}

#[test]
fn test_settings_merge_is_idempotent() {
    // Record carries only one of the three grab settings
    let yaml = r#"
keybinds:
  - id: grab
    action: 33
    keys:
      - { mode: Down, key: G }
    settings:
      - { name: Use Previous, value: "True" }
"#;

    let first = KeybindRegistry::from_yaml(yaml).unwrap();
    let settings = &first.get(0).unwrap().settings;
    assert_eq!(settings.len(), 3);
    assert_eq!(settings["Use Previous"], "True");
    assert_eq!(settings["Use Nearest"], "True");
    assert_eq!(settings["Create Keyframe"], "True");

    let second = KeybindRegistry::from_yaml(&first.to_yaml().unwrap()).unwrap();
    assert_eq!(second.get(0).unwrap().settings, *settings);
}

#[test]
fn test_display_for_default_save() {
    let registry = KeybindRegistry::with_defaults();
    assert_eq!(
        registry.display_for(ActionKind::SaveLevel).as_deref(),
        Some("LeftControl + !LeftShift + S")
    );
    assert_eq!(registry.display_for(ActionKind::Quit), None);
}

#[test]
fn test_default_save_requires_ctrl_edge() {
    let registry = KeybindRegistry::with_defaults();
    let save = registry.binding_for(ActionKind::SaveLevel).unwrap();

    let mut input = InputState::new();
    input.press(KeyCode::LeftControl);
    input.press(KeyCode::char('s'));
    assert!(save.is_satisfied(&input));

    // S held over from the last frame: no edge
    input.end_frame();
    assert!(!save.is_satisfied(&input));

    // Shift added turns it into Save As
    let mut input = InputState::new();
    input.press(KeyCode::LeftControl);
    input.press(KeyCode::LeftShift);
    input.press(KeyCode::char('s'));
    assert!(!save.is_satisfied(&input));
    assert!(registry
        .binding_for(ActionKind::SaveLevelAs)
        .unwrap()
        .is_satisfied(&input));
}

#[test]
fn test_typed_settings_fall_back_without_rewriting() {
    let bind = Keybind::new(ActionKind::SetLayer, vec![]).with_setting("Layer", "three");
    let settings = bind.action_settings().unwrap();

    assert_eq!(settings.int("Layer"), 0);
    assert_eq!(bind.settings["Layer"], "three");
}
