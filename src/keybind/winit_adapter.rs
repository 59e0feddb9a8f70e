//! Adapter from winit input events to [`InputState`]
//!
//! Keys are mapped by physical position so bindings survive layout changes.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use super::types::KeyCode;
use crate::input::InputState;

/// Convert a winit physical key to our KeyCode
///
/// Returns None for keys that can't be bound
pub fn key_from_winit(physical_key: PhysicalKey) -> Option<KeyCode> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };

    let key = match code {
        WinitKeyCode::KeyA => KeyCode::Char('a'),
        WinitKeyCode::KeyB => KeyCode::Char('b'),
        WinitKeyCode::KeyC => KeyCode::Char('c'),
        WinitKeyCode::KeyD => KeyCode::Char('d'),
        WinitKeyCode::KeyE => KeyCode::Char('e'),
        WinitKeyCode::KeyF => KeyCode::Char('f'),
        WinitKeyCode::KeyG => KeyCode::Char('g'),
        WinitKeyCode::KeyH => KeyCode::Char('h'),
        WinitKeyCode::KeyI => KeyCode::Char('i'),
        WinitKeyCode::KeyJ => KeyCode::Char('j'),
        WinitKeyCode::KeyK => KeyCode::Char('k'),
        WinitKeyCode::KeyL => KeyCode::Char('l'),
        WinitKeyCode::KeyM => KeyCode::Char('m'),
        WinitKeyCode::KeyN => KeyCode::Char('n'),
        WinitKeyCode::KeyO => KeyCode::Char('o'),
        WinitKeyCode::KeyP => KeyCode::Char('p'),
        WinitKeyCode::KeyQ => KeyCode::Char('q'),
        WinitKeyCode::KeyR => KeyCode::Char('r'),
        WinitKeyCode::KeyS => KeyCode::Char('s'),
        WinitKeyCode::KeyT => KeyCode::Char('t'),
        WinitKeyCode::KeyU => KeyCode::Char('u'),
        WinitKeyCode::KeyV => KeyCode::Char('v'),
        WinitKeyCode::KeyW => KeyCode::Char('w'),
        WinitKeyCode::KeyX => KeyCode::Char('x'),
        WinitKeyCode::KeyY => KeyCode::Char('y'),
        WinitKeyCode::KeyZ => KeyCode::Char('z'),

        WinitKeyCode::Digit0 => KeyCode::Char('0'),
        WinitKeyCode::Digit1 => KeyCode::Char('1'),
        WinitKeyCode::Digit2 => KeyCode::Char('2'),
        WinitKeyCode::Digit3 => KeyCode::Char('3'),
        WinitKeyCode::Digit4 => KeyCode::Char('4'),
        WinitKeyCode::Digit5 => KeyCode::Char('5'),
        WinitKeyCode::Digit6 => KeyCode::Char('6'),
        WinitKeyCode::Digit7 => KeyCode::Char('7'),
        WinitKeyCode::Digit8 => KeyCode::Char('8'),
        WinitKeyCode::Digit9 => KeyCode::Char('9'),

        // Punctuation
        WinitKeyCode::Comma => KeyCode::Char(','),
        WinitKeyCode::Period => KeyCode::Char('.'),
        WinitKeyCode::Minus => KeyCode::Char('-'),
        WinitKeyCode::Equal => KeyCode::Char('='),
        WinitKeyCode::Slash => KeyCode::Char('/'),
        WinitKeyCode::Backslash => KeyCode::Char('\\'),
        WinitKeyCode::Semicolon => KeyCode::Char(';'),
        WinitKeyCode::Quote => KeyCode::Char('\''),
        WinitKeyCode::BracketLeft => KeyCode::Char('['),
        WinitKeyCode::BracketRight => KeyCode::Char(']'),
        WinitKeyCode::Backquote => KeyCode::Char('`'),

        WinitKeyCode::Space => KeyCode::Space,
        WinitKeyCode::Enter => KeyCode::Enter,
        WinitKeyCode::Escape => KeyCode::Escape,
        WinitKeyCode::Tab => KeyCode::Tab,
        WinitKeyCode::Backspace => KeyCode::Backspace,
        WinitKeyCode::Delete => KeyCode::Delete,
        WinitKeyCode::Insert => KeyCode::Insert,

        // Navigation
        WinitKeyCode::Home => KeyCode::Home,
        WinitKeyCode::End => KeyCode::End,
        WinitKeyCode::PageUp => KeyCode::PageUp,
        WinitKeyCode::PageDown => KeyCode::PageDown,
        WinitKeyCode::ArrowUp => KeyCode::Up,
        WinitKeyCode::ArrowDown => KeyCode::Down,
        WinitKeyCode::ArrowLeft => KeyCode::Left,
        WinitKeyCode::ArrowRight => KeyCode::Right,

        // Function keys
        WinitKeyCode::F1 => KeyCode::F(1),
        WinitKeyCode::F2 => KeyCode::F(2),
        WinitKeyCode::F3 => KeyCode::F(3),
        WinitKeyCode::F4 => KeyCode::F(4),
        WinitKeyCode::F5 => KeyCode::F(5),
        WinitKeyCode::F6 => KeyCode::F(6),
        WinitKeyCode::F7 => KeyCode::F(7),
        WinitKeyCode::F8 => KeyCode::F(8),
        WinitKeyCode::F9 => KeyCode::F(9),
        WinitKeyCode::F10 => KeyCode::F(10),
        WinitKeyCode::F11 => KeyCode::F(11),
        WinitKeyCode::F12 => KeyCode::F(12),

        // Modifiers
        WinitKeyCode::ShiftLeft => KeyCode::LeftShift,
        WinitKeyCode::ShiftRight => KeyCode::RightShift,
        WinitKeyCode::ControlLeft => KeyCode::LeftControl,
        WinitKeyCode::ControlRight => KeyCode::RightControl,
        WinitKeyCode::AltLeft => KeyCode::LeftAlt,
        WinitKeyCode::AltRight => KeyCode::RightAlt,
        WinitKeyCode::SuperLeft => KeyCode::LeftMeta,
        WinitKeyCode::SuperRight => KeyCode::RightMeta,

        // Numpad
        WinitKeyCode::Numpad0 => KeyCode::Numpad(0),
        WinitKeyCode::Numpad1 => KeyCode::Numpad(1),
        WinitKeyCode::Numpad2 => KeyCode::Numpad(2),
        WinitKeyCode::Numpad3 => KeyCode::Numpad(3),
        WinitKeyCode::Numpad4 => KeyCode::Numpad(4),
        WinitKeyCode::Numpad5 => KeyCode::Numpad(5),
        WinitKeyCode::Numpad6 => KeyCode::Numpad(6),
        WinitKeyCode::Numpad7 => KeyCode::Numpad(7),
        WinitKeyCode::Numpad8 => KeyCode::Numpad(8),
        WinitKeyCode::Numpad9 => KeyCode::Numpad(9),
        WinitKeyCode::NumpadAdd => KeyCode::NumpadAdd,
        WinitKeyCode::NumpadSubtract => KeyCode::NumpadSubtract,
        WinitKeyCode::NumpadMultiply => KeyCode::NumpadMultiply,
        WinitKeyCode::NumpadDivide => KeyCode::NumpadDivide,
        WinitKeyCode::NumpadEnter => KeyCode::NumpadEnter,
        WinitKeyCode::NumpadDecimal => KeyCode::NumpadDecimal,

        _ => return None,
    };

    Some(key)
}

/// Convert a winit mouse button to a pointer KeyCode
///
/// Pointer codes are Mouse0-6. `Other(3)` and `Other(4)` share `Mouse3`
/// and `Mouse4` with `Back`/`Forward`: a platform that reports the side
/// buttons as raw numbers binds the same keys as one that names them.
/// Anything above 6 has no code.
pub fn key_from_mouse_button(button: MouseButton) -> Option<KeyCode> {
    match button {
        MouseButton::Left => Some(KeyCode::Mouse(0)),
        MouseButton::Right => Some(KeyCode::Mouse(1)),
        MouseButton::Middle => Some(KeyCode::Mouse(2)),
        MouseButton::Back => Some(KeyCode::Mouse(3)),
        MouseButton::Forward => Some(KeyCode::Mouse(4)),
        MouseButton::Other(n) => u8::try_from(n)
            .ok()
            .filter(|n| *n <= 6)
            .map(KeyCode::Mouse),
    }
}

/// Feed a keyboard event into the input state
///
/// Returns false when the key has no mapping.
pub fn apply_key_event(input: &mut InputState, physical_key: PhysicalKey, state: ElementState) -> bool {
    match key_from_winit(physical_key) {
        Some(key) => {
            input.set_key(key, state == ElementState::Pressed);
            true
        }
        None => false,
    }
}

/// Feed a mouse button event into the input state
pub fn apply_mouse_event(input: &mut InputState, button: MouseButton, state: ElementState) -> bool {
    match key_from_mouse_button(button) {
        Some(key) => {
            input.set_key(key, state == ElementState::Pressed);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn test_letter_and_digit_keys() {
        assert_eq!(
            key_from_winit(PhysicalKey::Code(WinitKeyCode::KeyS)),
            Some(KeyCode::char('s'))
        );
        assert_eq!(
            key_from_winit(PhysicalKey::Code(WinitKeyCode::Digit3)),
            Some(KeyCode::char('3'))
        );
        assert_eq!(
            key_from_winit(PhysicalKey::Code(WinitKeyCode::Comma)),
            Some(KeyCode::char(','))
        );
    }

    #[test]
    fn test_modifier_keys() {
        assert_eq!(
            key_from_winit(PhysicalKey::Code(WinitKeyCode::ControlLeft)),
            Some(KeyCode::LeftControl)
        );
        assert_eq!(
            key_from_winit(PhysicalKey::Code(WinitKeyCode::ShiftRight)),
            Some(KeyCode::RightShift)
        );
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(
            key_from_winit(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            None
        );
        assert_eq!(key_from_winit(PhysicalKey::Code(WinitKeyCode::CapsLock)), None);
    }

    #[test]
    fn test_mouse_buttons() {
        assert_eq!(key_from_mouse_button(MouseButton::Left), Some(KeyCode::PRIMARY_POINTER));
        assert_eq!(key_from_mouse_button(MouseButton::Right), Some(KeyCode::SECONDARY_POINTER));
        assert_eq!(key_from_mouse_button(MouseButton::Other(5)), Some(KeyCode::Mouse(5)));
        assert_eq!(key_from_mouse_button(MouseButton::Other(300)), None);
        assert_eq!(key_from_mouse_button(MouseButton::Other(7)), None);
    }

    #[test]
    fn test_numbered_side_buttons_alias_named_ones() {
        assert_eq!(
            key_from_mouse_button(MouseButton::Other(3)),
            key_from_mouse_button(MouseButton::Back)
        );
        assert_eq!(
            key_from_mouse_button(MouseButton::Other(4)),
            key_from_mouse_button(MouseButton::Forward)
        );
    }

    #[test]
    fn test_apply_events() {
        let mut input = InputState::new();
        assert!(apply_key_event(
            &mut input,
            PhysicalKey::Code(WinitKeyCode::KeyG),
            ElementState::Pressed
        ));
        assert!(apply_mouse_event(&mut input, MouseButton::Left, ElementState::Pressed));
        assert!(input.is_down(KeyCode::char('g')));
        assert!(input.is_pressed(KeyCode::PRIMARY_POINTER));

        input.end_frame();
        apply_key_event(&mut input, PhysicalKey::Code(WinitKeyCode::KeyG), ElementState::Released);
        assert!(input.is_up(KeyCode::char('g')));
    }
}
