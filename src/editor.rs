//! Collaborator interfaces the engine reads from and writes to
//!
//! The level editor itself (object store, playback clock, viewport,
//! toasts) lives in the host. The engine only sees it through these traits,
//! and everything else an action wants done is queued as an
//! [`EditorRequest`] for the host to apply after the poll.

use glam::Vec2;

/// Identifier of a timeline object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u64);

/// Identifier of a placed prefab instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrefabInstanceId(pub u64);

/// Something that owns keyframe channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyframeTarget {
    Object(ObjectId),
    PrefabInstance(PrefabInstanceId),
}

/// Animated property channel of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Position,
    Scale,
    Rotation,
    Color,
}

impl Channel {
    /// Resolve the integer channel index used in action settings
    pub fn from_index(index: i32) -> Option<Channel> {
        match index {
            0 => Some(Channel::Position),
            1 => Some(Channel::Scale),
            2 => Some(Channel::Rotation),
            3 => Some(Channel::Color),
            _ => None,
        }
    }

    pub fn index(self) -> i32 {
        match self {
            Channel::Position => 0,
            Channel::Scale => 1,
            Channel::Rotation => 2,
            Channel::Color => 3,
        }
    }
}

/// A timestamped value array on a channel
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    pub values: Vec<f32>,
    /// Easing curve name applied when interpolating into this keyframe
    pub ease: String,
}

impl Keyframe {
    pub fn new(time: f32, values: Vec<f32>) -> Self {
        Self {
            time,
            values,
            ease: "Linear".to_string(),
        }
    }
}

/// Direction for marker/object stepping requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Work an action hands back to the host
///
/// These cover the editor features that live outside the engine (file
/// dialogs, clipboard, layers, markers, prefabs, UI toggles). The host
/// drains them from the frame report and applies them in order.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorRequest {
    ToggleEditor,
    ToggleHelp,
    OpenLevel,
    SaveLevel,
    SaveLevelAs,
    NewLevel,
    ToggleProjectPlanner,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste { regen: bool },
    Duplicate { regen: bool },
    Delete,
    SelectAll,
    DeselectAll,
    SetLayer(i32),
    ShiftLayer(i32),
    ToggleEventLayer,
    CreateMarker { time: f32 },
    JumpToMarker(Direction),
    DeleteKeyframes,
    CreateObject { kind: String },
    SelectObject(Direction),
    ToggleLockSelection,
    ToggleCollapseSelection,
    CollapsePrefab,
    ExpandPrefab,
    OpenPrefabDialog,
    RecomputeAll,
    ToggleZenMode,
    SnapToBeat,
    ToggleObjectDragger,
    Zoom(f32),
    ResetZoom,
    ParentPicker,
    ToggleAutosave,
    Quit,
}

/// Object/keyframe store
pub trait KeyframeStore {
    /// The currently selected keyframe-bearing target, if any
    fn selection(&self) -> Option<KeyframeTarget>;

    fn keyframes(&self, target: &KeyframeTarget, channel: Channel) -> Option<&[Keyframe]>;

    fn keyframes_mut(&mut self, target: &KeyframeTarget, channel: Channel)
        -> Option<&mut Vec<Keyframe>>;

    /// Make a keyframe the selected one in the keyframe editor
    fn select_keyframe(&mut self, target: &KeyframeTarget, channel: Channel, index: usize);

    /// Live world position of the target, if it is currently spawned
    fn live_position(&self, target: &KeyframeTarget) -> Option<Vec2>;

    /// Recompute/re-render the target after its keyframes changed
    fn recompute(&mut self, target: &KeyframeTarget);
}

/// Playback clock
pub trait Playback {
    fn time(&self) -> f32;
    fn set_time(&mut self, time: f32);
    /// Song length; the clock never runs past it
    fn length(&self) -> f32;
    fn pitch(&self) -> f32;
    fn set_pitch(&mut self, pitch: f32);
    fn toggle_playing(&mut self);
}

/// Screen-to-world mapping of the editor camera
pub trait Viewport {
    fn screen_to_world(&self, screen: Vec2) -> Vec2;
}

/// Fire-and-forget user feedback
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Everything the engine needs from the host editor
pub trait EditorHost: KeyframeStore + Playback + Viewport + Notifier {
    /// The editor UI is open and accepting edits
    fn is_editing(&self) -> bool;

    /// A level is loaded
    fn document_loaded(&self) -> bool;
}
