//! Keyframe interpolation for clips

use glam::Vec3;

use crate::clip::AnimationClip;
use crate::types::{Lerp, Pose};

/// Find the index of the keyframe at or before the given time
///
/// Returns None if there are no keyframes. Times before the first keyframe
/// map to 0. For interpolation the result is the earlier keyframe of the
/// bracketing pair `[index]`, `[index + 1]`.
pub fn find_keyframe_index(times: &[f32], time: f32) -> Option<usize> {
    if times.is_empty() {
        return None;
    }

    // partition_point gives the first index with times[i] > time
    let next = times.partition_point(|&t| t <= time);
    Some(next.saturating_sub(1))
}

/// Sample a clip at time `t` (seconds)
///
/// Clamps to the first keyframe at or before its time (and for NaN) and to the
/// last keyframe at or after its time. Between keyframes every bone named by either endpoint
/// is ramped linearly per Euler component. A bone missing from one endpoint is
/// taken as `(0, 0, 0)` there rather than holding its previous value.
pub fn evaluate(clip: &AnimationClip, t: f32) -> Pose {
    let keyframes = clip.keyframes();
    let times = clip.times();

    let (Some(first), Some(last)) = (keyframes.first(), keyframes.last()) else {
        return Pose::new();
    };

    // NaN fails every comparison below; treat it as the clip start.
    if t.is_nan() || t <= first.time {
        return first.pose.clone();
    }
    if t >= last.time {
        return last.pose.clone();
    }

    let Some(index) = find_keyframe_index(times, t) else {
        return first.pose.clone();
    };
    let (Some(from), Some(to)) = (keyframes.get(index), keyframes.get(index + 1)) else {
        return last.pose.clone();
    };
    let alpha = (t - from.time) / (to.time - from.time);

    let mut pose = Pose::new();
    for name in from.pose.keys().chain(to.pose.keys()) {
        if pose.contains_key(name) {
            continue;
        }
        let r1 = from.pose.get(name).copied().unwrap_or(Vec3::ZERO);
        let r2 = to.pose.get(name).copied().unwrap_or(Vec3::ZERO);
        pose.insert(name.clone(), Lerp::lerp(&r1, &r2, alpha));
    }
    pose
}
