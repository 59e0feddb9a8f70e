//! Which keyframe a grab action edits

use crate::editor::Keyframe;
use crate::keybind::ActionSettings;

/// Rules for picking the drag target, read from a grab binding's settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub use_nearest: bool,
    pub create_if_missing: bool,
    pub use_previous: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            use_nearest: true,
            create_if_missing: true,
            use_previous: false,
        }
    }
}

impl SelectionPolicy {
    pub fn from_settings(settings: &ActionSettings<'_>) -> Self {
        Self {
            use_nearest: settings.bool("Use Nearest"),
            create_if_missing: settings.bool("Create Keyframe"),
            use_previous: settings.bool("Use Previous"),
        }
    }
}

/// Outcome of [`choose_keyframe`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeChoice {
    pub index: usize,
    /// Playback time to jump to, when the choice snapped to a nearby keyframe
    pub seek_to: Option<f32>,
    /// The keyframe was appended by this call
    pub created: bool,
}

/// Closest keyframe whose time is within `epsilon` of `time`
pub fn nearest_within(keyframes: &[Keyframe], time: f32, epsilon: f32) -> Option<usize> {
    keyframes
        .iter()
        .enumerate()
        .map(|(i, k)| (i, (k.time - time).abs()))
        .filter(|(_, distance)| *distance <= epsilon)
        .fold(None, |best: Option<(usize, f32)>, (i, distance)| match best {
            Some((_, d)) if d <= distance => best,
            _ => Some((i, distance)),
        })
        .map(|(i, _)| i)
}

/// Keyframe in effect at `time`: the last one at or before it, else the first
pub fn active_at(keyframes: &[Keyframe], time: f32) -> Option<usize> {
    keyframes
        .iter()
        .rposition(|k| k.time <= time)
        .or(if keyframes.is_empty() { None } else { Some(0) })
}

/// Last keyframe strictly before `time`
pub fn previous_before(keyframes: &[Keyframe], time: f32) -> Option<usize> {
    keyframes.iter().rposition(|k| k.time < time)
}

/// First keyframe strictly after `time`
pub fn next_after(keyframes: &[Keyframe], time: f32) -> Option<usize> {
    keyframes.iter().position(|k| k.time > time)
}

/// Apply the selection policy to a channel's keyframes
///
/// May append a keyframe. Returns `None` only when the channel is empty.
pub fn choose_keyframe(
    keyframes: &mut Vec<Keyframe>,
    time: f32,
    epsilon: f32,
    policy: SelectionPolicy,
) -> Option<KeyframeChoice> {
    if keyframes.is_empty() {
        return None;
    }

    if policy.use_nearest {
        if let Some(index) = nearest_within(keyframes, time, epsilon) {
            return Some(KeyframeChoice {
                index,
                seek_to: Some(keyframes[index].time),
                created: false,
            });
        }
    }

    if policy.create_if_missing {
        if let Some(active) = active_at(keyframes, time) {
            let mut copy = keyframes[active].clone();
            copy.time = time;
            keyframes.push(copy);
            return Some(KeyframeChoice {
                index: keyframes.len() - 1,
                seek_to: None,
                created: true,
            });
        }
    }

    if policy.use_previous {
        if let Some(index) = previous_before(keyframes, time) {
            return Some(KeyframeChoice {
                index,
                seek_to: None,
                created: false,
            });
        }
    }

    Some(KeyframeChoice {
        index: 0,
        seek_to: None,
        created: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(times: &[f32]) -> Vec<Keyframe> {
        times
            .iter()
            .enumerate()
            .map(|(i, t)| Keyframe::new(*t, vec![i as f32, 0.0]))
            .collect()
    }

    #[test]
    fn test_nearest_wins_over_create() {
        let mut keyframes = frames(&[0.0, 2.0, 5.0]);
        let choice = choose_keyframe(&mut keyframes, 2.05, 0.1, SelectionPolicy::default()).unwrap();
        assert_eq!(choice.index, 1);
        assert_eq!(choice.seek_to, Some(2.0));
        assert!(!choice.created);
        assert_eq!(keyframes.len(), 3);
    }

    #[test]
    fn test_create_copies_active_keyframe() {
        let mut keyframes = frames(&[0.0, 2.0, 5.0]);
        keyframes[1].ease = "InSine".to_string();
        let choice = choose_keyframe(&mut keyframes, 3.0, 0.1, SelectionPolicy::default()).unwrap();

        assert!(choice.created);
        assert_eq!(choice.index, 3);
        let created = &keyframes[3];
        assert_eq!(created.time, 3.0);
        assert_eq!(created.values, vec![1.0, 0.0]);
        assert_eq!(created.ease, "InSine");
    }

    #[test]
    fn test_create_before_first_copies_first() {
        let mut keyframes = frames(&[1.0, 2.0]);
        let choice = choose_keyframe(&mut keyframes, 0.5, 0.1, SelectionPolicy::default()).unwrap();
        assert_eq!(keyframes[choice.index].values, vec![0.0, 0.0]);
        assert_eq!(keyframes[choice.index].time, 0.5);
    }

    #[test]
    fn test_previous_then_first() {
        let policy = SelectionPolicy {
            use_nearest: false,
            create_if_missing: false,
            use_previous: true,
        };
        let mut keyframes = frames(&[0.0, 2.0, 5.0]);
        let choice = choose_keyframe(&mut keyframes, 2.0, 0.1, policy).unwrap();
        assert_eq!(choice.index, 0);

        let choice = choose_keyframe(&mut keyframes, 4.0, 0.1, policy).unwrap();
        assert_eq!(choice.index, 1);

        let mut late = frames(&[3.0]);
        let choice = choose_keyframe(&mut late, 1.0, 0.1, policy).unwrap();
        assert_eq!(choice.index, 0);
    }

    #[test]
    fn test_empty_channel() {
        let mut keyframes = Vec::new();
        assert!(choose_keyframe(&mut keyframes, 1.0, 0.1, SelectionPolicy::default()).is_none());
        assert!(keyframes.is_empty());
    }

    #[test]
    fn test_navigation_helpers() {
        let keyframes = frames(&[0.0, 2.0, 5.0]);
        assert_eq!(next_after(&keyframes, 2.0), Some(2));
        assert_eq!(next_after(&keyframes, 5.0), None);
        assert_eq!(previous_before(&keyframes, 0.0), None);
        assert_eq!(active_at(&keyframes, 9.0), Some(2));
        assert_eq!(nearest_within(&keyframes, 4.5, 0.1), None);
    }
}
