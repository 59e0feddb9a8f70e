//! Action table: one handler per action kind, built once at startup
//!
//! Handlers read their parameters through [`ActionSettings`] on every call
//! and never keep state between invocations. Actions that belong to the
//! host (files, clipboard, layers, markers, UI toggles) only queue an
//! [`EditorRequest`]; the rest drive the playback clock, the keyframe
//! store or the drag engine directly.

use super::action::ActionKind;
use super::binding::Keybind;
use super::settings::ActionSettings;
use crate::drag::{active_at, choose_keyframe, next_after, previous_before, DragEngine, DragMode, SelectionPolicy};
use crate::editor::{Channel, Direction, EditorHost, EditorRequest};

/// Lowest playback pitch the pitch actions will set
pub const MIN_PITCH: f32 = 0.1;

/// Everything a handler may touch during one invocation
pub struct ActionContext<'a> {
    pub host: &'a mut dyn EditorHost,
    pub drag: &'a mut DragEngine,
    pub requests: &'a mut Vec<EditorRequest>,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        host: &'a mut dyn EditorHost,
        drag: &'a mut DragEngine,
        requests: &'a mut Vec<EditorRequest>,
    ) -> Self {
        Self {
            host,
            drag,
            requests,
        }
    }

    /// Queue work for the host
    pub fn request(&mut self, request: EditorRequest) {
        self.requests.push(request);
    }
}

pub type ActionHandler = fn(&mut ActionContext<'_>, &ActionSettings<'_>);

/// One row of the action table
#[derive(Clone, Copy)]
pub struct ActionEntry {
    pub kind: ActionKind,
    pub handler: ActionHandler,
}

impl std::fmt::Debug for ActionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionEntry").field("kind", &self.kind).finish()
    }
}

/// Ordered table of every action, indexed by the persisted action index
#[derive(Debug, Clone)]
pub struct ActionTable {
    entries: Vec<ActionEntry>,
}

impl Default for ActionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionTable {
    pub fn new() -> Self {
        let entries = ActionKind::ALL
            .iter()
            .map(|&kind| ActionEntry {
                kind,
                handler: handler_for(kind),
            })
            .collect();
        Self { entries }
    }

    /// Entry for a persisted index; `None` when out of range
    pub fn get(&self, index: i32) -> Option<&ActionEntry> {
        usize::try_from(index).ok().and_then(|i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionEntry> {
        self.entries.iter()
    }

    /// Run the action at `index` with `keybind`'s settings
    ///
    /// An out-of-range index is logged and does nothing. Returns whether a
    /// handler ran.
    pub fn invoke(&self, index: i32, keybind: &Keybind, cx: &mut ActionContext<'_>) -> bool {
        let Some(entry) = self.get(index) else {
            tracing::warn!(
                "Keybind {} refers to unknown action index {}, ignoring",
                keybind.id,
                index
            );
            return false;
        };

        tracing::debug!("Invoking {} via {}", entry.kind.name(), keybind.display_string());
        let settings = ActionSettings::new(entry.kind, &keybind.settings);
        (entry.handler)(cx, &settings);
        true
    }
}

fn handler_for(kind: ActionKind) -> ActionHandler {
    use ActionKind::*;

    match kind {
        TogglePlaying => toggle_playing,
        CreateMarker => create_marker,
        FirstKeyframe | LastKeyframe | NextKeyframe | PreviousKeyframe => jump_to_keyframe,
        CreateKeyframe => create_keyframe,
        AddKeyframeValue | SubKeyframeValue | SetKeyframeValue => edit_keyframe_value,
        TransformPosition | TransformScale | TransformRotation => grab,
        AddPitch | SubPitch | SetPitch => change_pitch,
        GoToStart | GoToEnd | NudgeForward | NudgeBackward | SetSongTime => seek,
        UpdateObject => update_object,
        Notify => notify,
        _ => emit_request,
    }
}

/// Request emitted by host-side actions
fn request_for(settings: &ActionSettings<'_>) -> Option<EditorRequest> {
    use ActionKind::*;

    let request = match settings.action() {
        ToggleEditor => EditorRequest::ToggleEditor,
        ToggleHelp => EditorRequest::ToggleHelp,
        OpenLevel => EditorRequest::OpenLevel,
        SaveLevel => EditorRequest::SaveLevel,
        SaveLevelAs => EditorRequest::SaveLevelAs,
        NewLevel => EditorRequest::NewLevel,
        ToggleProjectPlanner => EditorRequest::ToggleProjectPlanner,
        Undo => EditorRequest::Undo,
        Redo => EditorRequest::Redo,
        Cut => EditorRequest::Cut,
        Copy => EditorRequest::Copy,
        Paste => EditorRequest::Paste {
            regen: settings.bool("Regen"),
        },
        Duplicate => EditorRequest::Duplicate {
            regen: settings.bool("Regen"),
        },
        Delete => EditorRequest::Delete,
        SelectAll => EditorRequest::SelectAll,
        DeselectAll => EditorRequest::DeselectAll,
        SetLayer => EditorRequest::SetLayer(settings.int("Layer")),
        AddLayer => EditorRequest::ShiftLayer(settings.int("Amount")),
        SubLayer => EditorRequest::ShiftLayer(settings.int("Amount").saturating_neg()),
        ToggleEventLayer => EditorRequest::ToggleEventLayer,
        NextMarker => EditorRequest::JumpToMarker(Direction::Next),
        PreviousMarker => EditorRequest::JumpToMarker(Direction::Previous),
        DeleteKeyframe => EditorRequest::DeleteKeyframes,
        CreateObject => EditorRequest::CreateObject {
            kind: settings.text("Type").to_string(),
        },
        SelectNextObject => EditorRequest::SelectObject(Direction::Next),
        SelectPreviousObject => EditorRequest::SelectObject(Direction::Previous),
        ToggleLockSelection => EditorRequest::ToggleLockSelection,
        ToggleCollapseSelection => EditorRequest::ToggleCollapseSelection,
        CollapsePrefab => EditorRequest::CollapsePrefab,
        ExpandPrefab => EditorRequest::ExpandPrefab,
        OpenPrefabDialog => EditorRequest::OpenPrefabDialog,
        UpdateEverything => EditorRequest::RecomputeAll,
        ToggleZenMode => EditorRequest::ToggleZenMode,
        SnapToBeat => EditorRequest::SnapToBeat,
        ToggleObjectDragger => EditorRequest::ToggleObjectDragger,
        ZoomIn => EditorRequest::Zoom(settings.float("Amount")),
        ZoomOut => EditorRequest::Zoom(-settings.float("Amount")),
        ResetZoom => EditorRequest::ResetZoom,
        ParentPicker => EditorRequest::ParentPicker,
        ToggleAutosave => EditorRequest::ToggleAutosave,
        Quit => EditorRequest::Quit,
        _ => return None,
    };
    Some(request)
}

fn emit_request(cx: &mut ActionContext<'_>, settings: &ActionSettings<'_>) {
    match request_for(settings) {
        Some(request) => cx.request(request),
        None => tracing::warn!("{} has no handler", settings.action().name()),
    }
}

fn toggle_playing(cx: &mut ActionContext<'_>, _: &ActionSettings<'_>) {
    cx.host.toggle_playing();
}

fn create_marker(cx: &mut ActionContext<'_>, _: &ActionSettings<'_>) {
    let time = cx.host.time();
    cx.request(EditorRequest::CreateMarker { time });
}

fn channel_setting(settings: &ActionSettings<'_>) -> Option<Channel> {
    let index = settings.int("Channel");
    let channel = Channel::from_index(index);
    if channel.is_none() {
        tracing::warn!("{}: no channel {}", settings.action().name(), index);
    }
    channel
}

fn jump_to_keyframe(cx: &mut ActionContext<'_>, settings: &ActionSettings<'_>) {
    let Some(target) = cx.host.selection() else {
        return;
    };
    let Some(channel) = channel_setting(settings) else {
        return;
    };
    let now = cx.host.time();
    let Some(keyframes) = cx.host.keyframes(&target, channel) else {
        return;
    };

    let index = match settings.action() {
        ActionKind::FirstKeyframe => (!keyframes.is_empty()).then_some(0),
        ActionKind::LastKeyframe => keyframes.len().checked_sub(1),
        ActionKind::NextKeyframe => next_after(keyframes, now),
        _ => previous_before(keyframes, now),
    };
    let Some(index) = index else {
        return;
    };

    let time = keyframes[index].time;
    cx.host.select_keyframe(&target, channel, index);
    cx.host.set_time(time);
}

fn create_keyframe(cx: &mut ActionContext<'_>, settings: &ActionSettings<'_>) {
    let Some(target) = cx.host.selection() else {
        return;
    };
    let Some(channel) = channel_setting(settings) else {
        return;
    };
    let now = cx.host.time();
    let epsilon = cx.drag.config().nearest_epsilon;
    let policy = SelectionPolicy {
        use_nearest: true,
        create_if_missing: true,
        use_previous: false,
    };

    let Some(choice) = cx
        .host
        .keyframes_mut(&target, channel)
        .and_then(|keyframes| choose_keyframe(keyframes, now, epsilon, policy))
    else {
        return;
    };

    if let Some(time) = choice.seek_to {
        cx.host.set_time(time);
    }
    cx.host.select_keyframe(&target, channel, choice.index);
    if choice.created {
        cx.host.recompute(&target);
    }
}

fn edit_keyframe_value(cx: &mut ActionContext<'_>, settings: &ActionSettings<'_>) {
    let Some(target) = cx.host.selection() else {
        return;
    };
    let Some(channel) = channel_setting(settings) else {
        return;
    };
    let component = settings.int("Component");
    let now = cx.host.time();

    let Some(keyframes) = cx.host.keyframes_mut(&target, channel) else {
        return;
    };
    let Some(index) = active_at(keyframes, now) else {
        return;
    };
    let values = &mut keyframes[index].values;
    let Some(slot) = usize::try_from(component).ok().filter(|c| *c < values.len()) else {
        tracing::warn!(
            "{}: keyframe has no component {}",
            settings.action().name(),
            component
        );
        return;
    };
    let value = &mut values[slot];

    match settings.action() {
        ActionKind::AddKeyframeValue => *value += settings.float("Amount"),
        ActionKind::SubKeyframeValue => *value -= settings.float("Amount"),
        _ => *value = settings.float("Value"),
    }
    cx.host.recompute(&target);
}

fn grab(cx: &mut ActionContext<'_>, settings: &ActionSettings<'_>) {
    let Some(mode) = DragMode::from_action(settings.action()) else {
        return;
    };
    let policy = SelectionPolicy::from_settings(settings);
    cx.drag.begin(&mut *cx.host, mode, policy);
}

fn change_pitch(cx: &mut ActionContext<'_>, settings: &ActionSettings<'_>) {
    let step = settings.float("Pitch");
    let pitch = match settings.action() {
        ActionKind::AddPitch => cx.host.pitch() + step,
        ActionKind::SubPitch => cx.host.pitch() - step,
        _ => step,
    }
    .max(MIN_PITCH);

    cx.host.set_pitch(pitch);
    cx.host.notify(&format!("Pitch: {:.2}", pitch));
}

fn seek(cx: &mut ActionContext<'_>, settings: &ActionSettings<'_>) {
    let now = cx.host.time();
    let length = cx.host.length().max(0.0);

    let time = match settings.action() {
        ActionKind::GoToStart => 0.0,
        ActionKind::GoToEnd => length,
        ActionKind::NudgeForward => now + settings.float("Amount"),
        ActionKind::NudgeBackward => now - settings.float("Amount"),
        _ => settings.float("Time"),
    };
    cx.host.set_time(time.clamp(0.0, length));
}

fn update_object(cx: &mut ActionContext<'_>, _: &ActionSettings<'_>) {
    if let Some(target) = cx.host.selection() {
        cx.host.recompute(&target);
    }
}

fn notify(cx: &mut ActionContext<'_>, settings: &ActionSettings<'_>) {
    let message = settings.text("Message");
    if !message.is_empty() {
        cx.host.notify(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_indices() {
        let table = ActionTable::new();
        assert_eq!(table.len(), 64);
        for (i, entry) in table.iter().enumerate() {
            assert_eq!(entry.kind.index(), i as i32);
        }
        assert!(table.get(-1).is_none());
        assert!(table.get(64).is_none());
    }

    #[test]
    fn test_host_side_actions_map_to_requests() {
        let mapped = ActionKind::ALL
            .iter()
            .filter(|kind| {
                let defaults = kind.default_settings();
                request_for(&ActionSettings::new(**kind, &defaults)).is_some()
            })
            .count();
        // 23 actions are handled directly against the host
        assert_eq!(mapped, 41);
    }

    #[test]
    fn test_layer_requests_use_settings() {
        let defaults = ActionKind::SubLayer.default_settings();
        let settings = ActionSettings::new(ActionKind::SubLayer, &defaults);
        assert_eq!(request_for(&settings), Some(EditorRequest::ShiftLayer(-1)));

        let mut layer = ActionKind::SetLayer.default_settings();
        layer.insert("Layer".into(), "3".into());
        let settings = ActionSettings::new(ActionKind::SetLayer, &layer);
        assert_eq!(request_for(&settings), Some(EditorRequest::SetLayer(3)));
    }

    #[test]
    fn test_sub_layer_extreme_amount_saturates() {
        let mut amount = ActionKind::SubLayer.default_settings();
        amount.insert("Amount".into(), i32::MIN.to_string());
        let settings = ActionSettings::new(ActionKind::SubLayer, &amount);
        assert_eq!(
            request_for(&settings),
            Some(EditorRequest::ShiftLayer(i32::MAX))
        );
    }
}
