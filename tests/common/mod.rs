//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::HashMap;

use glam::Vec2;
use levelbind::editor::{
    Channel, EditorHost, Keyframe, KeyframeStore, KeyframeTarget, Notifier, ObjectId, Playback,
    Viewport,
};
use levelbind::keybind::{
    ActionKind, Dispatcher, FrameReport, KeyCode, KeyPredicate, Keybind, KeybindRegistry,
};
use levelbind::InputState;

/// The single object most tests edit
pub fn object() -> KeyframeTarget {
    KeyframeTarget::Object(ObjectId(1))
}

/// In-memory editor: one keyframe store, a clock, identity viewport
#[derive(Debug, Default)]
pub struct MockEditor {
    pub channels: HashMap<(KeyframeTarget, Channel), Vec<Keyframe>>,
    pub selected: Option<KeyframeTarget>,
    pub live_positions: HashMap<KeyframeTarget, Vec2>,
    pub selected_keyframe: Option<(KeyframeTarget, Channel, usize)>,
    pub time: f32,
    pub length: f32,
    pub pitch: f32,
    pub playing: bool,
    pub editing: bool,
    pub document: bool,
    pub notifications: Vec<String>,
    pub recomputes: usize,
}

impl MockEditor {
    /// Editing a loaded level, nothing selected
    pub fn new() -> Self {
        Self {
            length: 60.0,
            pitch: 1.0,
            editing: true,
            document: true,
            ..Default::default()
        }
    }

    /// One selected object with position keyframes at 0, 2 and 5
    pub fn with_object() -> Self {
        let mut editor = Self::new();
        editor.selected = Some(object());
        editor.set_keyframes(
            Channel::Position,
            vec![
                Keyframe::new(0.0, vec![0.0, 0.0]),
                Keyframe::new(2.0, vec![3.0, 4.0]),
                Keyframe::new(5.0, vec![10.0, 10.0]),
            ],
        );
        editor.set_keyframes(Channel::Scale, vec![Keyframe::new(2.0, vec![1.0, 1.0])]);
        editor.set_keyframes(Channel::Rotation, vec![Keyframe::new(2.0, vec![0.0])]);
        editor
    }

    pub fn set_keyframes(&mut self, channel: Channel, keyframes: Vec<Keyframe>) {
        self.channels.insert((object(), channel), keyframes);
    }

    pub fn channel(&self, channel: Channel) -> &[Keyframe] {
        self.channels
            .get(&(object(), channel))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn values(&self, channel: Channel, index: usize) -> Vec<f32> {
        self.channel(channel)[index].values.clone()
    }
}

impl KeyframeStore for MockEditor {
    fn selection(&self) -> Option<KeyframeTarget> {
        self.selected
    }

    fn keyframes(&self, target: &KeyframeTarget, channel: Channel) -> Option<&[Keyframe]> {
        self.channels.get(&(*target, channel)).map(Vec::as_slice)
    }

    fn keyframes_mut(
        &mut self,
        target: &KeyframeTarget,
        channel: Channel,
    ) -> Option<&mut Vec<Keyframe>> {
        self.channels.get_mut(&(*target, channel))
    }

    fn select_keyframe(&mut self, target: &KeyframeTarget, channel: Channel, index: usize) {
        self.selected_keyframe = Some((*target, channel, index));
    }

    fn live_position(&self, target: &KeyframeTarget) -> Option<Vec2> {
        self.live_positions.get(target).copied()
    }

    fn recompute(&mut self, _target: &KeyframeTarget) {
        self.recomputes += 1;
    }
}

impl Playback for MockEditor {
    fn time(&self) -> f32 {
        self.time
    }

    fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    fn length(&self) -> f32 {
        self.length
    }

    fn pitch(&self) -> f32 {
        self.pitch
    }

    fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }
}

impl Viewport for MockEditor {
    fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen
    }
}

impl Notifier for MockEditor {
    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}

impl EditorHost for MockEditor {
    fn is_editing(&self) -> bool {
        self.editing
    }

    fn document_loaded(&self) -> bool {
        self.document
    }
}

/// Shorthand for a single-key `Down` binding
pub fn on_down(action: ActionKind, key: KeyCode) -> Keybind {
    Keybind::new(action, vec![KeyPredicate::down(key)])
}

/// Registry, dispatcher, input and editor wired together, one frame at a time
pub struct Harness {
    pub registry: KeybindRegistry,
    pub dispatcher: Dispatcher,
    pub input: InputState,
    pub editor: MockEditor,
}

impl Harness {
    pub fn new(keybinds: Vec<Keybind>, editor: MockEditor) -> Self {
        Self {
            registry: KeybindRegistry::with_keybinds(keybinds),
            dispatcher: Dispatcher::default(),
            input: InputState::new(),
            editor,
        }
    }

    /// Grab bindings on G/S/R with default settings
    pub fn with_grabs(editor: MockEditor) -> Self {
        Self::new(
            vec![
                on_down(ActionKind::TransformPosition, KeyCode::char('g')),
                on_down(ActionKind::TransformScale, KeyCode::char('s')),
                on_down(ActionKind::TransformRotation, KeyCode::char('r')),
            ],
            editor,
        )
    }

    /// Poll once and close the frame
    pub fn frame(&mut self) -> FrameReport {
        let report = self
            .dispatcher
            .poll(&mut self.registry, &self.input, &mut self.editor);
        self.input.end_frame();
        report
    }

    pub fn press(&mut self, key: KeyCode) -> &mut Self {
        self.input.press(key);
        self
    }

    pub fn release(&mut self, key: KeyCode) -> &mut Self {
        self.input.release(key);
        self
    }

    pub fn pointer(&mut self, x: f32, y: f32) -> &mut Self {
        self.input.set_pointer(Vec2::new(x, y));
        self
    }

    /// Press then release `key` over two frames, returning both reports
    pub fn tap(&mut self, key: KeyCode) -> (FrameReport, FrameReport) {
        self.press(key);
        let down = self.frame();
        self.release(key);
        let up = self.frame();
        (down, up)
    }

    /// Click-release the primary pointer to confirm a drag
    pub fn confirm(&mut self) -> FrameReport {
        self.press(KeyCode::PRIMARY_POINTER);
        self.frame();
        self.release(KeyCode::PRIMARY_POINTER);
        self.frame()
    }
}
