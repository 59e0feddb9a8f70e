//! ActionKind enum: the fixed, ordered table of bindable editor actions
//!
//! The position of each variant in [`ActionKind::ALL`] is the integer action
//! index written to the keybinds file, so new actions are only ever appended.
//! Each action declares its settings schema right next to its name; there is
//! no separate defaults list to keep in step.

use std::str::FromStr;

use super::settings::{default_settings, SettingSpec, SettingsMap};

/// All bindable editor actions, in persisted index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    // ========================================================================
    // Editor / File
    // ========================================================================
    ToggleEditor,
    ToggleHelp,
    TogglePlaying,
    OpenLevel,
    SaveLevel,
    SaveLevelAs,
    NewLevel,
    ToggleProjectPlanner,

    // ========================================================================
    // Undo / Clipboard / Selection
    // ========================================================================
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    Duplicate,
    Delete,
    SelectAll,
    DeselectAll,

    // ========================================================================
    // Layers / Markers
    // ========================================================================
    SetLayer,
    AddLayer,
    SubLayer,
    ToggleEventLayer,
    CreateMarker,
    NextMarker,
    PreviousMarker,

    // ========================================================================
    // Keyframes
    // ========================================================================
    FirstKeyframe,
    LastKeyframe,
    NextKeyframe,
    PreviousKeyframe,
    CreateKeyframe,
    DeleteKeyframe,
    AddKeyframeValue,
    SubKeyframeValue,
    SetKeyframeValue,

    // ========================================================================
    // Drag transforms
    // ========================================================================
    TransformPosition,
    TransformScale,
    TransformRotation,

    // ========================================================================
    // Playback
    // ========================================================================
    AddPitch,
    SubPitch,
    SetPitch,
    GoToStart,
    GoToEnd,
    NudgeForward,
    NudgeBackward,
    SetSongTime,

    // ========================================================================
    // Objects / Prefabs
    // ========================================================================
    CreateObject,
    SelectNextObject,
    SelectPreviousObject,
    ToggleLockSelection,
    ToggleCollapseSelection,
    CollapsePrefab,
    ExpandPrefab,
    OpenPrefabDialog,
    UpdateObject,
    UpdateEverything,

    // ========================================================================
    // View / Misc
    // ========================================================================
    ToggleZenMode,
    SnapToBeat,
    ToggleObjectDragger,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    ParentPicker,
    ToggleAutosave,
    Notify,
    Quit,
}

const GRAB: &[SettingSpec] = &[
    SettingSpec::flag("Create Keyframe", "True"),
    SettingSpec::flag("Use Nearest", "True"),
    SettingSpec::flag("Use Previous", "False"),
];
const REGEN: &[SettingSpec] = &[SettingSpec::flag("Regen", "True")];
const LAYER: &[SettingSpec] = &[SettingSpec::int("Layer", "0")];
const LAYER_AMOUNT: &[SettingSpec] = &[SettingSpec::int("Amount", "1")];
const CHANNEL: &[SettingSpec] = &[SettingSpec::int("Channel", "0")];
const KEYFRAME_AMOUNT: &[SettingSpec] = &[
    SettingSpec::int("Channel", "0"),
    SettingSpec::int("Component", "0"),
    SettingSpec::float("Amount", "1"),
];
const KEYFRAME_VALUE: &[SettingSpec] = &[
    SettingSpec::int("Channel", "0"),
    SettingSpec::int("Component", "0"),
    SettingSpec::float("Value", "0"),
];
const PITCH_STEP: &[SettingSpec] = &[SettingSpec::float("Pitch", "0.1")];
const PITCH: &[SettingSpec] = &[SettingSpec::float("Pitch", "1")];
const TIME_STEP: &[SettingSpec] = &[SettingSpec::float("Amount", "0.1")];
const TIME: &[SettingSpec] = &[SettingSpec::float("Time", "0")];
const OBJECT_TYPE: &[SettingSpec] = &[SettingSpec::text("Type", "Normal")];
const ZOOM_STEP: &[SettingSpec] = &[SettingSpec::float("Amount", "0.1")];
const MESSAGE: &[SettingSpec] = &[SettingSpec::text("Message", "")];

impl ActionKind {
    /// Every action, in persisted index order
    pub const ALL: [ActionKind; 64] = [
        ActionKind::ToggleEditor,
        ActionKind::ToggleHelp,
        ActionKind::TogglePlaying,
        ActionKind::OpenLevel,
        ActionKind::SaveLevel,
        ActionKind::SaveLevelAs,
        ActionKind::NewLevel,
        ActionKind::ToggleProjectPlanner,
        ActionKind::Undo,
        ActionKind::Redo,
        ActionKind::Cut,
        ActionKind::Copy,
        ActionKind::Paste,
        ActionKind::Duplicate,
        ActionKind::Delete,
        ActionKind::SelectAll,
        ActionKind::DeselectAll,
        ActionKind::SetLayer,
        ActionKind::AddLayer,
        ActionKind::SubLayer,
        ActionKind::ToggleEventLayer,
        ActionKind::CreateMarker,
        ActionKind::NextMarker,
        ActionKind::PreviousMarker,
        ActionKind::FirstKeyframe,
        ActionKind::LastKeyframe,
        ActionKind::NextKeyframe,
        ActionKind::PreviousKeyframe,
        ActionKind::CreateKeyframe,
        ActionKind::DeleteKeyframe,
        ActionKind::AddKeyframeValue,
        ActionKind::SubKeyframeValue,
        ActionKind::SetKeyframeValue,
        ActionKind::TransformPosition,
        ActionKind::TransformScale,
        ActionKind::TransformRotation,
        ActionKind::AddPitch,
        ActionKind::SubPitch,
        ActionKind::SetPitch,
        ActionKind::GoToStart,
        ActionKind::GoToEnd,
        ActionKind::NudgeForward,
        ActionKind::NudgeBackward,
        ActionKind::SetSongTime,
        ActionKind::CreateObject,
        ActionKind::SelectNextObject,
        ActionKind::SelectPreviousObject,
        ActionKind::ToggleLockSelection,
        ActionKind::ToggleCollapseSelection,
        ActionKind::CollapsePrefab,
        ActionKind::ExpandPrefab,
        ActionKind::OpenPrefabDialog,
        ActionKind::UpdateObject,
        ActionKind::UpdateEverything,
        ActionKind::ToggleZenMode,
        ActionKind::SnapToBeat,
        ActionKind::ToggleObjectDragger,
        ActionKind::ZoomIn,
        ActionKind::ZoomOut,
        ActionKind::ResetZoom,
        ActionKind::ParentPicker,
        ActionKind::ToggleAutosave,
        ActionKind::Notify,
        ActionKind::Quit,
    ];

    /// Persisted integer index of this action
    pub fn index(self) -> i32 {
        // Variants are declared in the same order as ALL
        self as i32
    }

    /// Resolve a persisted index; out-of-range indices resolve to `None`
    pub fn from_index(index: i32) -> Option<ActionKind> {
        usize::try_from(index)
            .ok()
            .and_then(|i| ActionKind::ALL.get(i).copied())
    }

    /// Human-readable name, also used by `find_by_name`
    pub fn name(self) -> &'static str {
        use ActionKind::*;

        match self {
            ToggleEditor => "Toggle Editor",
            ToggleHelp => "Toggle Help",
            TogglePlaying => "Toggle Playing Song",
            OpenLevel => "Open Level",
            SaveLevel => "Save Level",
            SaveLevelAs => "Save Level As",
            NewLevel => "New Level",
            ToggleProjectPlanner => "Toggle Project Planner",

            Undo => "Undo",
            Redo => "Redo",
            Cut => "Cut",
            Copy => "Copy",
            Paste => "Paste",
            Duplicate => "Duplicate",
            Delete => "Delete",
            SelectAll => "Select All",
            DeselectAll => "Deselect All",

            SetLayer => "Set Layer",
            AddLayer => "Add Layer",
            SubLayer => "Sub Layer",
            ToggleEventLayer => "Toggle Event Layer",
            CreateMarker => "Create Marker",
            NextMarker => "Jump To Next Marker",
            PreviousMarker => "Jump To Previous Marker",

            FirstKeyframe => "First Keyframe",
            LastKeyframe => "Last Keyframe",
            NextKeyframe => "Next Keyframe",
            PreviousKeyframe => "Previous Keyframe",
            CreateKeyframe => "Create Keyframe",
            DeleteKeyframe => "Delete Keyframe",
            AddKeyframeValue => "Add Keyframe Value",
            SubKeyframeValue => "Sub Keyframe Value",
            SetKeyframeValue => "Set Keyframe Value",

            TransformPosition => "Transform Position",
            TransformScale => "Transform Scale",
            TransformRotation => "Transform Rotation",

            AddPitch => "Add Pitch",
            SubPitch => "Sub Pitch",
            SetPitch => "Set Pitch",
            GoToStart => "Go To Start",
            GoToEnd => "Go To End",
            NudgeForward => "Nudge Time Forward",
            NudgeBackward => "Nudge Time Backward",
            SetSongTime => "Set Song Time",

            CreateObject => "Create Object",
            SelectNextObject => "Select Next Object",
            SelectPreviousObject => "Select Previous Object",
            ToggleLockSelection => "Toggle Lock Selection",
            ToggleCollapseSelection => "Toggle Collapse Selection",
            CollapsePrefab => "Collapse Prefab",
            ExpandPrefab => "Expand Prefab",
            OpenPrefabDialog => "Open Prefab Dialog",
            UpdateObject => "Update Object",
            UpdateEverything => "Update Everything",

            ToggleZenMode => "Toggle Zen Mode",
            SnapToBeat => "Snap To Beat",
            ToggleObjectDragger => "Toggle Object Dragger",
            ZoomIn => "Zoom In",
            ZoomOut => "Zoom Out",
            ResetZoom => "Reset Zoom",
            ParentPicker => "Parent Picker",
            ToggleAutosave => "Toggle Autosave",
            Notify => "Notify",
            Quit => "Quit",
        }
    }

    /// Declared settings for this action (empty for most)
    pub fn schema(self) -> &'static [SettingSpec] {
        use ActionKind::*;

        match self {
            Paste | Duplicate => REGEN,
            SetLayer => LAYER,
            AddLayer | SubLayer => LAYER_AMOUNT,
            FirstKeyframe | LastKeyframe | NextKeyframe | PreviousKeyframe | CreateKeyframe => {
                CHANNEL
            }
            AddKeyframeValue | SubKeyframeValue => KEYFRAME_AMOUNT,
            SetKeyframeValue => KEYFRAME_VALUE,
            TransformPosition | TransformScale | TransformRotation => GRAB,
            AddPitch | SubPitch => PITCH_STEP,
            SetPitch => PITCH,
            NudgeForward | NudgeBackward => TIME_STEP,
            SetSongTime => TIME,
            CreateObject => OBJECT_TYPE,
            ZoomIn | ZoomOut => ZOOM_STEP,
            Notify => MESSAGE,
            _ => &[],
        }
    }

    /// Fresh map of this action's default settings
    pub fn default_settings(self) -> SettingsMap {
        default_settings(self.schema())
    }

    /// Actions that stay dispatchable with no level loaded
    pub fn available_without_document(self) -> bool {
        matches!(
            self,
            ActionKind::ToggleEditor
                | ActionKind::ToggleHelp
                | ActionKind::TogglePlaying
                | ActionKind::OpenLevel
                | ActionKind::SaveLevel
                | ActionKind::ToggleProjectPlanner
        )
    }

    /// Actions that open a drag session
    pub fn is_grab(self) -> bool {
        matches!(
            self,
            ActionKind::TransformPosition | ActionKind::TransformScale | ActionKind::TransformRotation
        )
    }

    /// Look up an action by its display name or identifier
    ///
    /// Matching ignores case, spaces, underscores and hyphens, so
    /// "Save Level", "SaveLevel" and "save_level" all resolve.
    pub fn from_name(name: &str) -> Option<ActionKind> {
        let wanted = normalize_name(name);
        ActionKind::ALL
            .iter()
            .copied()
            .find(|kind| normalize_name(kind.name()) == wanted || normalize_name(&format!("{:?}", kind)) == wanted)
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for ActionKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::from_name(s).ok_or(())
    }
}
