//! Default keybindings for the editor
//!
//! These are bootstrapped into the keybinds file the first time the editor
//! runs without one. Registry order is priority order, so more specific
//! combinations sit above the plain keys they extend.

use super::action::ActionKind;
use super::binding::Keybind;
use super::predicate::KeyPredicate;
use super::types::KeyCode;

fn bind(action: ActionKind, predicates: Vec<KeyPredicate>) -> Keybind {
    Keybind::new(action, predicates)
}

fn key(c: char) -> KeyCode {
    KeyCode::char(c)
}

/// Generate the built-in editor keybindings
pub fn default_keybinds() -> Vec<Keybind> {
    let ctrl = KeyPredicate::pressed(KeyCode::LeftControl);
    let no_ctrl = KeyPredicate::not_pressed(KeyCode::LeftControl);
    let shift = KeyPredicate::pressed(KeyCode::LeftShift);
    let no_shift = KeyPredicate::not_pressed(KeyCode::LeftShift);
    let alt = KeyPredicate::pressed(KeyCode::LeftAlt);
    let down = KeyPredicate::down;

    let mut keybinds = vec![
        // ====================================================================
        // Editor / File
        // ====================================================================
        bind(ActionKind::ToggleEditor, vec![down(KeyCode::Tab)]),
        bind(ActionKind::ToggleHelp, vec![down(KeyCode::F(1))]),
        bind(ActionKind::TogglePlaying, vec![no_ctrl, down(KeyCode::Space)]),
        bind(ActionKind::OpenLevel, vec![ctrl, down(key('o'))]),
        bind(ActionKind::SaveLevelAs, vec![ctrl, shift, down(key('s'))]),
        bind(ActionKind::SaveLevel, vec![ctrl, no_shift, down(key('s'))]),
        bind(ActionKind::ToggleProjectPlanner, vec![down(KeyCode::F(10))]),

        // ====================================================================
        // Undo/Redo
        // ====================================================================
        bind(ActionKind::Undo, vec![ctrl, no_shift, down(key('z'))]),
        bind(ActionKind::Redo, vec![ctrl, shift, down(key('z'))]),
        bind(ActionKind::Redo, vec![ctrl, down(key('y'))]),

        // ====================================================================
        // Clipboard / Selection
        // ====================================================================
        bind(ActionKind::Cut, vec![ctrl, down(key('x'))]),
        bind(ActionKind::Copy, vec![ctrl, down(key('c'))]),
        bind(ActionKind::Paste, vec![ctrl, down(key('v'))]),
        bind(ActionKind::Duplicate, vec![ctrl, down(key('d'))]),
        bind(ActionKind::Delete, vec![down(KeyCode::Delete)]),
        bind(ActionKind::SelectAll, vec![ctrl, down(key('a'))]),

        // ====================================================================
        // Markers
        // ====================================================================
        bind(ActionKind::CreateMarker, vec![no_ctrl, down(key('m'))]),
        bind(ActionKind::NextMarker, vec![alt, down(KeyCode::Right)]),
        bind(ActionKind::PreviousMarker, vec![alt, down(KeyCode::Left)]),

        // ====================================================================
        // Keyframe navigation
        // ====================================================================
        bind(ActionKind::FirstKeyframe, vec![shift, down(key(','))]),
        bind(ActionKind::LastKeyframe, vec![shift, down(key('.'))]),
        bind(ActionKind::PreviousKeyframe, vec![no_shift, down(key(','))]),
        bind(ActionKind::NextKeyframe, vec![no_shift, down(key('.'))]),

        // ====================================================================
        // Playback
        // ====================================================================
        bind(ActionKind::AddPitch, vec![ctrl, down(KeyCode::Up)]),
        bind(ActionKind::SubPitch, vec![ctrl, down(KeyCode::Down)]),
        bind(ActionKind::GoToStart, vec![down(KeyCode::Home)]),
        bind(ActionKind::GoToEnd, vec![down(KeyCode::End)]),

        // ====================================================================
        // Drag transforms
        // ====================================================================
        bind(ActionKind::TransformPosition, vec![no_ctrl, down(key('g'))]),
        bind(ActionKind::TransformScale, vec![no_ctrl, down(key('s'))]),
        bind(ActionKind::TransformRotation, vec![no_ctrl, down(key('r'))]),
    ];

    // ====================================================================
    // Layers: number row (1-5), ctrl-free so ctrl+digit stays available
    // ====================================================================
    for layer in 0..5u8 {
        let digit = (b'1' + layer) as char;
        keybinds.push(
            bind(ActionKind::SetLayer, vec![no_ctrl, down(key(digit))])
                .with_setting("Layer", &layer.to_string()),
        );
    }

    keybinds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_core_actions() {
        let binds = default_keybinds();
        assert!(binds.len() >= 30);

        for kind in [
            ActionKind::SaveLevel,
            ActionKind::OpenLevel,
            ActionKind::Undo,
            ActionKind::Redo,
            ActionKind::Cut,
            ActionKind::Copy,
            ActionKind::Paste,
            ActionKind::Duplicate,
            ActionKind::Delete,
            ActionKind::SetLayer,
            ActionKind::NextMarker,
            ActionKind::NextKeyframe,
            ActionKind::AddPitch,
            ActionKind::TransformPosition,
            ActionKind::TransformScale,
            ActionKind::TransformRotation,
        ] {
            assert!(
                binds.iter().any(|b| b.action_kind() == Some(kind)),
                "missing default for {:?}",
                kind
            );
        }
    }

    #[test]
    fn test_defaults_carry_full_settings() {
        for bind in default_keybinds() {
            let kind = bind.action_kind().unwrap();
            for spec in kind.schema() {
                assert!(bind.settings.contains_key(spec.name), "{:?} missing {}", kind, spec.name);
            }
        }
    }

    #[test]
    fn test_layer_bindings_are_numbered() {
        let layers: Vec<_> = default_keybinds()
            .into_iter()
            .filter(|b| b.action_kind() == Some(ActionKind::SetLayer))
            .map(|b| b.settings["Layer"].clone())
            .collect();
        assert_eq!(layers, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_no_identical_predicate_sets() {
        let binds = default_keybinds();
        for (i, a) in binds.iter().enumerate() {
            for b in &binds[i + 1..] {
                assert!(!a.has_same_predicates(b), "{} duplicates {}", a.action_name(), b.action_name());
            }
        }
    }
}
