//! Axis locking and value snapping shared by all three grab modes

use glam::Vec2;

use crate::input::InputState;
use crate::keybind::KeyCode;

/// Session-scoped restriction on which components a drag may change
///
/// The sign records which way the pointer first moved; scale drags use it
/// to shrink instead of grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisLock {
    #[default]
    None,
    PosX,
    NegX,
    PosY,
    NegY,
}

impl AxisLock {
    pub fn is_locked(self) -> bool {
        self != AxisLock::None
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, AxisLock::PosX | AxisLock::NegX)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, AxisLock::PosY | AxisLock::NegY)
    }

    /// -1 for the negative directions, else 1
    pub fn sign(self) -> f32 {
        match self {
            AxisLock::NegX | AxisLock::NegY => -1.0,
            _ => 1.0,
        }
    }

    fn horizontal(dx: f32) -> Self {
        if dx < 0.0 {
            AxisLock::NegX
        } else {
            AxisLock::PosX
        }
    }

    fn vertical(dy: f32) -> Self {
        if dy < 0.0 {
            AxisLock::NegY
        } else {
            AxisLock::PosY
        }
    }
}

/// Modifier keys read once per drag frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragModifiers {
    /// Shift: snap to whole units / rotation increments
    pub precise: bool,
    /// Control: lock to the first direction moved
    pub uniform: bool,
    /// X held: force a horizontal lock
    pub force_x: bool,
    /// Y held: force a vertical lock
    pub force_y: bool,
}

impl DragModifiers {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            precise: input.shift_held(),
            uniform: input.ctrl_held(),
            force_x: input.is_pressed(KeyCode::Char('x')),
            force_y: input.is_pressed(KeyCode::Char('y')),
        }
    }
}

/// First-direction heuristic
///
/// Locks to whichever axis deviates more from the start sample, once that
/// deviation passes `threshold`.
pub fn first_direction(origin: Vec2, sample: Vec2, threshold: f32) -> AxisLock {
    let delta = sample - origin;
    let (ax, ay) = (delta.x.abs(), delta.y.abs());

    if ax >= ay && ax > threshold {
        AxisLock::horizontal(delta.x)
    } else if ay > ax && ay > threshold {
        AxisLock::vertical(delta.y)
    } else {
        AxisLock::None
    }
}

/// Resolve the session's axis lock for this frame
///
/// X/Y force a lock on their axis at any time. Otherwise an existing lock
/// persists for the rest of the session, and a free session locks via
/// [`first_direction`] while the uniform modifier is held.
pub fn resolve_axis_lock(
    current: AxisLock,
    origin: Vec2,
    sample: Vec2,
    modifiers: DragModifiers,
    threshold: f32,
) -> AxisLock {
    let delta = sample - origin;

    if modifiers.force_x && !current.is_horizontal() {
        return AxisLock::horizontal(delta.x);
    }
    if modifiers.force_y && !modifiers.force_x && !current.is_vertical() {
        return AxisLock::vertical(delta.y);
    }
    if current.is_locked() {
        return current;
    }
    if modifiers.uniform {
        return first_direction(origin, sample, threshold);
    }
    AxisLock::None
}

/// Round both components to the nearest multiple of `quantum`
pub fn quantize(sample: Vec2, quantum: f32) -> Vec2 {
    if quantum <= 0.0 {
        return sample;
    }
    (sample / quantum).round() * quantum
}

/// Round an angle to the nearest multiple of `step` degrees
pub fn snap_angle(degrees: f32, step: f32) -> f32 {
    if step <= 0.0 {
        return degrees;
    }
    (degrees / step).round() * step
}

/// Wrap an angle into (-180, 180]
pub fn wrap_degrees(mut degrees: f32) -> f32 {
    while degrees > 180.0 {
        degrees -= 360.0;
    }
    while degrees <= -180.0 {
        degrees += 360.0;
    }
    degrees
}

/// Angle of `point` around `pivot` in degrees
pub fn angle_from(pivot: Vec2, point: Vec2) -> Option<f32> {
    let v = point - pivot;
    if v.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(v.y.atan2(v.x).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform() -> DragModifiers {
        DragModifiers {
            uniform: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_direction() {
        let o = Vec2::ZERO;
        assert_eq!(first_direction(o, Vec2::new(2.0, 0.5), 0.1), AxisLock::PosX);
        assert_eq!(first_direction(o, Vec2::new(-2.0, 0.5), 0.1), AxisLock::NegX);
        assert_eq!(first_direction(o, Vec2::new(0.2, 3.0), 0.1), AxisLock::PosY);
        assert_eq!(first_direction(o, Vec2::new(0.2, -3.0), 0.1), AxisLock::NegY);
        assert_eq!(first_direction(o, Vec2::new(0.05, 0.05), 0.1), AxisLock::None);
    }

    #[test]
    fn test_lock_persists() {
        let lock = resolve_axis_lock(AxisLock::None, Vec2::ZERO, Vec2::new(1.0, 0.0), uniform(), 0.1);
        assert_eq!(lock, AxisLock::PosX);

        // Later diagonal motion, even with the modifier released, keeps the lock
        let later = resolve_axis_lock(lock, Vec2::ZERO, Vec2::new(1.0, 9.0), DragModifiers::default(), 0.1);
        assert_eq!(later, AxisLock::PosX);
    }

    #[test]
    fn test_no_lock_without_modifier() {
        let lock = resolve_axis_lock(
            AxisLock::None,
            Vec2::ZERO,
            Vec2::new(5.0, 0.0),
            DragModifiers::default(),
            0.1,
        );
        assert_eq!(lock, AxisLock::None);
    }

    #[test]
    fn test_force_keys_override() {
        let force_y = DragModifiers {
            force_y: true,
            ..Default::default()
        };
        let lock = resolve_axis_lock(AxisLock::PosX, Vec2::ZERO, Vec2::new(5.0, -0.01), force_y, 0.1);
        assert_eq!(lock, AxisLock::NegY);

        let force_x = DragModifiers {
            force_x: true,
            ..Default::default()
        };
        // Already horizontal: keep the recorded sign
        let lock = resolve_axis_lock(AxisLock::NegX, Vec2::ZERO, Vec2::new(5.0, 0.0), force_x, 0.1);
        assert_eq!(lock, AxisLock::NegX);
    }

    #[test]
    fn test_quantize_and_snap() {
        assert_eq!(quantize(Vec2::new(1.4, -2.6), 1.0), Vec2::new(1.0, -3.0));
        assert_eq!(quantize(Vec2::new(1.4, 2.6), 0.0), Vec2::new(1.4, 2.6));
        assert_eq!(snap_angle(17.0, 15.0), 15.0);
        assert_eq!(snap_angle(23.0, 15.0), 30.0);
        assert_eq!(snap_angle(-8.0, 15.0), -15.0);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
        assert_eq!(wrap_degrees(180.0), 180.0);
        assert_eq!(wrap_degrees(45.0), 45.0);
    }

    #[test]
    fn test_angle_from() {
        let a = angle_from(Vec2::ZERO, Vec2::new(0.0, 1.0)).unwrap();
        assert!((a - 90.0).abs() < 1e-4);
        assert!(angle_from(Vec2::ONE, Vec2::ONE).is_none());
    }
}
