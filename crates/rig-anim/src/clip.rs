//! Keyframe clips

use std::collections::BTreeSet;

use crate::error::{Result, RigError};
use crate::types::Pose;

/// Snapshot of per-bone rotations at a time offset
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    /// Offset from clip start (seconds)
    pub time: f32,
    /// Rotations for the bones this keyframe animates
    pub pose: Pose,
}

impl Keyframe {
    pub fn new(time: f32, pose: Pose) -> Self {
        Self { time, pose }
    }
}

/// Immutable, validated keyframe table
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    name: String,
    duration: f32,
    keyframes: Vec<Keyframe>,
    times: Vec<f32>,
}

impl AnimationClip {
    /// Create a clip, rejecting malformed data
    ///
    /// Requirements: finite positive duration, at least one keyframe, keyframe
    /// times strictly increasing inside `[0, duration]`, finite rotations.
    pub fn new(name: impl Into<String>, duration: f32, keyframes: Vec<Keyframe>) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: String| RigError::InvalidClip {
            clip: name.clone(),
            reason,
        };

        if !duration.is_finite() || duration <= 0.0 {
            return Err(invalid(format!("duration must be positive, got {duration}")));
        }
        if keyframes.is_empty() {
            return Err(invalid("clip has no keyframes".to_string()));
        }

        let mut previous: Option<f32> = None;
        for keyframe in &keyframes {
            let time = keyframe.time;
            if !time.is_finite() || !(0.0..=duration).contains(&time) {
                return Err(invalid(format!(
                    "keyframe time {time} outside [0, {duration}]"
                )));
            }
            if previous.is_some_and(|p| time <= p) {
                return Err(invalid(format!(
                    "keyframe times must strictly increase, {time} follows {}",
                    previous.unwrap_or_default()
                )));
            }
            if let Some((bone, _)) = keyframe.pose.iter().find(|(_, r)| !r.is_finite()) {
                return Err(invalid(format!(
                    "non-finite rotation for bone '{bone}' at {time}"
                )));
            }
            previous = Some(time);
        }

        let times = keyframes.iter().map(|k| k.time).collect();
        Ok(Self {
            name,
            duration,
            keyframes,
            times,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clip length (seconds)
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Keyframes in ascending time order
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Keyframe times in ascending order
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Names of every bone any keyframe animates
    pub fn animated_bones(&self) -> BTreeSet<&str> {
        self.keyframes
            .iter()
            .flat_map(|k| k.pose.keys().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use test_case::test_case;

    fn pose(bone: &str, x: f32) -> Pose {
        let mut pose = Pose::new();
        pose.insert(bone.to_string(), Vec3::new(x, 0.0, 0.0));
        pose
    }

    #[test]
    fn test_valid_clip() {
        let clip = AnimationClip::new(
            "block",
            0.8,
            vec![
                Keyframe::new(0.0, pose("r_shoulder", 90.0)),
                Keyframe::new(0.4, pose("r_shoulder", 120.0)),
            ],
        )
        .unwrap();

        assert_eq!(clip.name(), "block");
        assert_eq!(clip.times(), &[0.0, 0.4]);
        assert_eq!(clip.keyframe_count(), 2);
        assert_eq!(
            clip.animated_bones().into_iter().collect::<Vec<_>>(),
            vec!["r_shoulder"]
        );
    }

    #[test_case(0.0 ; "zero duration")]
    #[test_case(-1.0 ; "negative duration")]
    #[test_case(f32::NAN ; "nan duration")]
    fn test_bad_duration_rejected(duration: f32) {
        let result = AnimationClip::new("x", duration, vec![Keyframe::new(0.0, Pose::new())]);
        assert!(matches!(result, Err(RigError::InvalidClip { .. })));
    }

    #[test]
    fn test_empty_keyframes_rejected() {
        let result = AnimationClip::new("x", 1.0, Vec::new());
        assert!(matches!(result, Err(RigError::InvalidClip { .. })));
    }

    #[test_case(&[0.0, 0.5, 0.5] ; "repeated time")]
    #[test_case(&[0.5, 0.2] ; "descending")]
    #[test_case(&[0.0, 1.5] ; "past duration")]
    #[test_case(&[-0.1, 0.5] ; "negative time")]
    fn test_bad_keyframe_times_rejected(times: &[f32]) {
        let keyframes = times
            .iter()
            .map(|&t| Keyframe::new(t, pose("spine_1", 0.0)))
            .collect();
        let result = AnimationClip::new("x", 1.0, keyframes);
        assert!(matches!(result, Err(RigError::InvalidClip { .. })));
    }

    #[test]
    fn test_non_finite_rotation_rejected() {
        let result = AnimationClip::new(
            "x",
            1.0,
            vec![Keyframe::new(0.0, pose("spine_1", f32::INFINITY))],
        );
        assert!(matches!(result, Err(RigError::InvalidClip { .. })));
    }
}
