//! Drag session state machine
//!
//! A grab action opens a session on one keyframe. Each frame the session
//! turns pointer motion into new keyframe values and asks the host to
//! recompute the target. Releasing the primary pointer commits; pressing
//! the secondary pointer restores the snapshot and aborts.

use glam::Vec2;

use super::axis::{
    angle_from, quantize, resolve_axis_lock, snap_angle, wrap_degrees, AxisLock, DragModifiers,
};
use super::selection::{choose_keyframe, SelectionPolicy};
use crate::config::DragConfig;
use crate::editor::{Channel, EditorHost, KeyframeTarget};
use crate::input::InputState;
use crate::keybind::{ActionKind, KeyCode};

/// Which transform a session edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Position,
    Scale,
    Rotation,
}

impl DragMode {
    /// Keyframe channel the mode writes
    pub fn channel(self) -> Channel {
        match self {
            DragMode::Position => Channel::Position,
            DragMode::Scale => Channel::Scale,
            DragMode::Rotation => Channel::Rotation,
        }
    }

    /// Mode opened by a grab action
    pub fn from_action(action: ActionKind) -> Option<DragMode> {
        match action {
            ActionKind::TransformPosition => Some(DragMode::Position),
            ActionKind::TransformScale => Some(DragMode::Scale),
            ActionKind::TransformRotation => Some(DragMode::Rotation),
            _ => None,
        }
    }
}

/// Result of one engine step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragOutcome {
    /// No session
    #[default]
    Idle,
    /// Session active, values written this frame
    Dragging,
    /// Primary pointer released; values kept
    Committed,
    /// Secondary pointer pressed; snapshot restored
    Aborted,
    /// The target keyframe disappeared; session dropped
    Lost,
}

/// A live edit of one keyframe
///
/// Holds a handle (target, channel, index) rather than a reference, so the
/// store stays free to change between frames.
#[derive(Debug, Clone)]
pub struct DragSession {
    mode: DragMode,
    target: KeyframeTarget,
    index: usize,
    /// Values before any mutation, for abort
    snapshot: Vec<f32>,
    /// Values at the first update frame
    start_values: Option<Vec<f32>>,
    /// World sample at the first update frame
    origin: Option<Vec2>,
    axis_lock: AxisLock,
    last_angle: Option<f32>,
    turned: f32,
}

impl DragSession {
    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn target(&self) -> KeyframeTarget {
        self.target
    }

    pub fn channel(&self) -> Channel {
        self.mode.channel()
    }

    /// Index of the edited keyframe within its channel
    pub fn keyframe_index(&self) -> usize {
        self.index
    }

    pub fn axis_lock(&self) -> AxisLock {
        self.axis_lock
    }

    /// Values captured before the drag started
    pub fn snapshot(&self) -> &[f32] {
        &self.snapshot
    }

    /// Degrees turned so far in a rotation drag
    pub fn turned(&self) -> f32 {
        self.turned
    }

    /// Write this frame's values
    fn apply(
        &mut self,
        values: &mut [f32],
        sample: Vec2,
        pivot: Vec2,
        modifiers: DragModifiers,
        config: &DragConfig,
    ) {
        let raw_origin = *self.origin.get_or_insert(sample);
        let start = self.start_values.get_or_insert_with(|| values.to_vec()).clone();

        let (origin, sample) = if modifiers.precise && self.mode != DragMode::Rotation {
            (
                quantize(raw_origin, config.position_quantum),
                quantize(sample, config.position_quantum),
            )
        } else {
            (raw_origin, sample)
        };

        self.axis_lock = resolve_axis_lock(
            self.axis_lock,
            origin,
            sample,
            modifiers,
            config.axis_lock_threshold,
        );

        match self.mode {
            DragMode::Position => {
                let delta = sample - origin;
                let x = if self.axis_lock.is_vertical() { 0.0 } else { delta.x };
                let y = if self.axis_lock.is_horizontal() { 0.0 } else { delta.y };
                set_component(values, &start, 0, x);
                set_component(values, &start, 1, y);
            }
            DragMode::Scale => {
                let mut distance = origin.distance(sample);
                if modifiers.uniform {
                    distance *= config.uniform_scale_multiplier * self.axis_lock.sign();
                }
                set_component(values, &start, 0, distance);
                set_component(values, &start, 1, distance);
            }
            DragMode::Rotation => {
                let Some(angle) = angle_from(pivot, sample) else {
                    return;
                };
                if let Some(last) = self.last_angle {
                    self.turned += wrap_degrees(angle - last);
                }
                self.last_angle = Some(angle);

                let mut rotation = start.first().copied().unwrap_or(0.0) + self.turned;
                if modifiers.precise {
                    rotation = snap_angle(rotation, config.rotation_snap_degrees);
                }
                if let Some(value) = values.first_mut() {
                    *value = rotation;
                }
            }
        }
    }
}

/// `values[i] = start[i] + delta`, skipping missing components
fn set_component(values: &mut [f32], start: &[f32], i: usize, delta: f32) {
    if let (Some(value), Some(base)) = (values.get_mut(i), start.get(i)) {
        *value = base + delta;
    }
}

/// Owner of the (at most one) active drag session
#[derive(Debug, Clone, Default)]
pub struct DragEngine {
    config: DragConfig,
    session: Option<DragSession>,
}

impl DragEngine {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Open a session on the selected target
    ///
    /// Returns false (and does nothing) when a session is already active,
    /// nothing keyframe-bearing is selected, or the channel has no
    /// keyframes.
    pub fn begin(
        &mut self,
        host: &mut dyn EditorHost,
        mode: DragMode,
        policy: SelectionPolicy,
    ) -> bool {
        if self.session.is_some() {
            tracing::debug!("Ignoring {:?} grab: a drag is already active", mode);
            return false;
        }

        let Some(target) = host.selection() else {
            tracing::debug!("Ignoring {:?} grab: no keyframe target selected", mode);
            return false;
        };

        let channel = mode.channel();
        let now = host.time();
        let epsilon = self.config.nearest_epsilon;

        let Some(keyframes) = host.keyframes_mut(&target, channel) else {
            tracing::debug!("Ignoring {:?} grab: target has no {:?} channel", mode, channel);
            return false;
        };
        let Some(choice) = choose_keyframe(keyframes, now, epsilon, policy) else {
            tracing::debug!("Ignoring {:?} grab: no {:?} keyframes", mode, channel);
            return false;
        };
        let snapshot = keyframes[choice.index].values.clone();

        if let Some(time) = choice.seek_to {
            host.set_time(time);
        }
        host.select_keyframe(&target, channel, choice.index);
        if choice.created {
            host.recompute(&target);
        }

        tracing::debug!(
            "Drag {:?} started on {:?} keyframe #{} (created: {})",
            mode,
            channel,
            choice.index,
            choice.created
        );

        self.session = Some(DragSession {
            mode,
            target,
            index: choice.index,
            snapshot,
            start_values: None,
            origin: None,
            axis_lock: AxisLock::None,
            last_angle: None,
            turned: 0.0,
        });
        true
    }

    /// Advance the active session by one frame
    pub fn update(&mut self, host: &mut dyn EditorHost, input: &InputState) -> DragOutcome {
        if self.session.is_none() {
            return DragOutcome::Idle;
        }

        if input.is_down(KeyCode::SECONDARY_POINTER) {
            return self.abort(host);
        }

        let Some(session) = self.session.as_mut() else {
            return DragOutcome::Idle;
        };

        let target = session.target;
        let sample = host.screen_to_world(input.pointer());
        let pivot = if session.mode == DragMode::Rotation {
            rotation_pivot(&*host, &target)
        } else {
            Vec2::ZERO
        };
        let modifiers = DragModifiers::from_input(input);

        let Some(keyframe) = host
            .keyframes_mut(&target, session.channel())
            .and_then(|keyframes| keyframes.get_mut(session.index))
        else {
            tracing::warn!(
                "Drag target keyframe #{} disappeared, ending session",
                session.index
            );
            self.session = None;
            return DragOutcome::Lost;
        };

        session.apply(&mut keyframe.values, sample, pivot, modifiers, &self.config);
        host.recompute(&target);

        if input.is_up(KeyCode::PRIMARY_POINTER) {
            return self.commit();
        }

        DragOutcome::Dragging
    }

    /// Restore the snapshot and end the session
    pub fn abort(&mut self, host: &mut dyn EditorHost) -> DragOutcome {
        let Some(session) = self.session.take() else {
            return DragOutcome::Idle;
        };

        match host
            .keyframes_mut(&session.target, session.channel())
            .and_then(|keyframes| keyframes.get_mut(session.index))
        {
            Some(keyframe) => {
                keyframe.values = session.snapshot;
                host.recompute(&session.target);
                tracing::debug!("Drag {:?} aborted", session.mode);
                DragOutcome::Aborted
            }
            None => {
                tracing::warn!("Drag target keyframe vanished before abort could restore it");
                DragOutcome::Lost
            }
        }
    }

    /// Keep the written values and end the session
    pub fn commit(&mut self) -> DragOutcome {
        match self.session.take() {
            Some(session) => {
                tracing::debug!("Drag {:?} committed", session.mode);
                DragOutcome::Committed
            }
            None => DragOutcome::Idle,
        }
    }
}

/// Rotation pivot: the live position, else the last position keyframe
/// strictly before now, else the origin
fn rotation_pivot(host: &dyn EditorHost, target: &KeyframeTarget) -> Vec2 {
    if let Some(position) = host.live_position(target) {
        return position;
    }

    let now = host.time();
    host.keyframes(target, Channel::Position)
        .and_then(|keyframes| keyframes.iter().rev().find(|k| k.time < now))
        .and_then(|k| match k.values.as_slice() {
            [x, y, ..] => Some(Vec2::new(*x, *y)),
            _ => None,
        })
        .unwrap_or(Vec2::ZERO)
}
