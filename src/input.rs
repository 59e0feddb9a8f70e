//! Per-frame input snapshot
//!
//! The host feeds key and pointer events into an [`InputState`] as they
//! arrive, polls the dispatcher once per frame, then calls
//! [`InputState::end_frame`]. Edges (`Down`/`Up`) are recorded as the
//! events arrive, so a key pressed and released between two polls still
//! reports both edges on the next poll.

use glam::Vec2;

use crate::keybind::KeyCode;

/// Snapshot of keys, pointer and focus for the current frame
#[derive(Debug, Clone)]
pub struct InputState {
    /// Keys held right now, in the order they went down
    held: Vec<KeyCode>,
    /// Keys held at the end of the previous frame
    previous: Vec<KeyCode>,
    /// Press edges since the last `end_frame`, in arrival order
    went_down: Vec<KeyCode>,
    /// Release edges since the last `end_frame`
    went_up: Vec<KeyCode>,
    /// Pointer position in screen space
    pointer: Vec2,
    window_focused: bool,
    text_input_focused: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Create an empty snapshot with the window focused
    pub fn new() -> Self {
        Self {
            held: Vec::new(),
            previous: Vec::new(),
            went_down: Vec::new(),
            went_up: Vec::new(),
            pointer: Vec2::ZERO,
            window_focused: true,
            text_input_focused: false,
        }
    }

    /// Mark a key as held
    ///
    /// Repeats of an already-held key record no new edge.
    pub fn press(&mut self, key: KeyCode) {
        if self.held.contains(&key) {
            return;
        }
        self.held.push(key);
        if !self.went_down.contains(&key) {
            self.went_down.push(key);
        }
    }

    /// Mark a key as released
    pub fn release(&mut self, key: KeyCode) {
        let Some(i) = self.held.iter().position(|k| *k == key) else {
            return;
        };
        self.held.remove(i);
        if !self.went_up.contains(&key) {
            self.went_up.push(key);
        }
    }

    /// Set a key's held state
    pub fn set_key(&mut self, key: KeyCode, held: bool) {
        if held {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        for key in self.held.drain(..) {
            if !self.went_up.contains(&key) {
                self.went_up.push(key);
            }
        }
    }

    /// Close the frame: drop this frame's edges and remember the held set
    pub fn end_frame(&mut self) {
        self.previous.clone_from(&self.held);
        self.went_down.clear();
        self.went_up.clear();
    }

    /// Key is held this frame
    #[inline]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Key was held at the end of the previous frame
    #[inline]
    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.previous.contains(&key)
    }

    /// Key went down this frame, even if it has already been released
    #[inline]
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.went_down.contains(&key)
    }

    /// Key was released this frame
    #[inline]
    pub fn is_up(&self, key: KeyCode) -> bool {
        self.went_up.contains(&key)
    }

    /// Keys that went down this frame, in press order
    pub fn just_pressed(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.went_down.iter().copied()
    }

    /// Either shift key is held
    pub fn shift_held(&self) -> bool {
        self.held.iter().any(|k| k.is_shift())
    }

    /// Either control key is held
    pub fn ctrl_held(&self) -> bool {
        self.held.iter().any(|k| k.is_control())
    }

    /// Pointer position in screen space
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = position;
    }

    pub fn window_focused(&self) -> bool {
        self.window_focused
    }

    pub fn set_window_focused(&mut self, focused: bool) {
        self.window_focused = focused;
    }

    /// A text-entry field owns keyboard input
    pub fn text_input_focused(&self) -> bool {
        self.text_input_focused
    }

    pub fn set_text_input_focused(&mut self, focused: bool) {
        self.text_input_focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_down_only_on_transition_frame() {
        let mut input = InputState::new();
        input.press(KeyCode::char('g'));
        assert!(input.is_down(KeyCode::char('g')));
        assert!(input.is_pressed(KeyCode::char('g')));

        input.end_frame();
        assert!(!input.is_down(KeyCode::char('g')));
        assert!(input.is_pressed(KeyCode::char('g')));
    }

    #[test]
    fn test_up_only_on_release_frame() {
        let mut input = InputState::new();
        input.press(KeyCode::Space);
        input.end_frame();
        input.release(KeyCode::Space);
        assert!(input.is_up(KeyCode::Space));

        input.end_frame();
        assert!(!input.is_up(KeyCode::Space));
        assert!(!input.is_pressed(KeyCode::Space));
    }

    #[test]
    fn test_just_pressed_keeps_press_order() {
        let mut input = InputState::new();
        input.press(KeyCode::LeftControl);
        input.end_frame();
        input.press(KeyCode::char('b'));
        input.press(KeyCode::char('a'));

        let keys: Vec<_> = input.just_pressed().collect();
        assert_eq!(keys, vec![KeyCode::Char('b'), KeyCode::Char('a')]);
    }

    #[test]
    fn test_press_is_idempotent() {
        let mut input = InputState::new();
        input.press(KeyCode::Tab);
        input.press(KeyCode::Tab);
        input.release(KeyCode::Tab);
        assert!(!input.is_pressed(KeyCode::Tab));
    }

    #[test]
    fn test_tap_within_one_frame_reports_both_edges() {
        let mut input = InputState::new();
        input.press(KeyCode::Space);
        input.release(KeyCode::Space);

        assert!(!input.is_pressed(KeyCode::Space));
        assert!(input.is_down(KeyCode::Space));
        assert!(input.is_up(KeyCode::Space));
        assert_eq!(input.just_pressed().collect::<Vec<_>>(), vec![KeyCode::Space]);

        input.end_frame();
        assert!(!input.is_down(KeyCode::Space));
        assert!(!input.is_up(KeyCode::Space));
    }

    #[test]
    fn test_repeat_press_is_not_a_new_edge() {
        let mut input = InputState::new();
        input.press(KeyCode::char('g'));
        input.end_frame();
        input.press(KeyCode::char('g'));
        assert!(!input.is_down(KeyCode::char('g')));
    }

    #[test]
    fn test_release_all_reports_up_edges() {
        let mut input = InputState::new();
        input.press(KeyCode::LeftShift);
        input.end_frame();
        input.release_all();
        assert!(input.is_up(KeyCode::LeftShift));
        assert!(!input.shift_held());
    }

    #[test]
    fn test_modifier_helpers_cover_both_sides() {
        let mut input = InputState::new();
        input.press(KeyCode::RightShift);
        input.press(KeyCode::RightControl);
        assert!(input.shift_held());
        assert!(input.ctrl_held());
    }
}
