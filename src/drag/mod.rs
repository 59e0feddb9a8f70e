//! Constrained keyframe drags
//!
//! The three grab actions open a [`DragSession`] on one keyframe of the
//! selected target. [`DragEngine::update`] runs once per frame after
//! keybind dispatch and writes new values straight into the keyframe.

pub mod axis;
pub mod selection;
pub mod session;

pub use axis::{
    first_direction, quantize, resolve_axis_lock, snap_angle, wrap_degrees, AxisLock,
    DragModifiers,
};
pub use selection::{
    active_at, choose_keyframe, nearest_within, next_after, previous_before, KeyframeChoice,
    SelectionPolicy,
};
pub use session::{DragEngine, DragMode, DragOutcome, DragSession};
