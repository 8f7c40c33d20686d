//! Per-archetype clip collections

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::clip::AnimationClip;
use crate::error::{Result, RigError};

/// Name of the clip every archetype loops while nothing else plays
pub const IDLE_CLIP: &str = "idle";

/// Read-only set of clips belonging to one archetype
///
/// Clip names only have to be unique within a library. Two archetypes can
/// both define `"idle"` with different motion.
#[derive(Debug, Clone)]
pub struct ClipLibrary {
    archetype: String,
    clips: BTreeMap<String, Arc<AnimationClip>>,
}

impl ClipLibrary {
    /// Create a library from validated clips
    pub fn new(archetype: impl Into<String>, clips: Vec<AnimationClip>) -> Result<Self> {
        let archetype = archetype.into();
        let mut map = BTreeMap::new();

        for clip in clips {
            let name = clip.name().to_string();
            if map.insert(name.clone(), Arc::new(clip)).is_some() {
                return Err(RigError::InvalidClip {
                    clip: name,
                    reason: format!("defined more than once in archetype '{archetype}'"),
                });
            }
        }

        if !map.contains_key(IDLE_CLIP) {
            log::warn!(
                "Archetype '{archetype}' has no '{IDLE_CLIP}' clip; finished clips will stop playback"
            );
        }

        Ok(Self {
            archetype,
            clips: map,
        })
    }

    /// Archetype this library belongs to
    pub fn archetype(&self) -> &str {
        &self.archetype
    }

    /// Look up a clip by name
    pub fn get(&self, name: &str) -> Result<&Arc<AnimationClip>> {
        self.clips.get(name).ok_or_else(|| RigError::ClipNotFound {
            archetype: self.archetype.clone(),
            clip: name.to_string(),
        })
    }

    /// The canonical idle clip, if defined
    pub fn idle(&self) -> Option<&Arc<AnimationClip>> {
        self.clips.get(IDLE_CLIP)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Clip names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clips.keys().map(String::as_str)
    }

    /// Clips in name order
    pub fn clips(&self) -> impl Iterator<Item = &Arc<AnimationClip>> {
        self.clips.values()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::Keyframe;
    use crate::types::Pose;

    fn clip(name: &str, duration: f32) -> AnimationClip {
        AnimationClip::new(name, duration, vec![Keyframe::new(0.0, Pose::new())]).unwrap()
    }

    #[test]
    fn test_lookup() {
        let library = ClipLibrary::new("aaron", vec![clip("idle", 2.0), clip("block", 0.8)]).unwrap();

        assert_eq!(library.len(), 2);
        assert_eq!(library.archetype(), "aaron");
        assert_eq!(library.get("block").unwrap().duration(), 0.8);
        assert!(library.idle().is_some());
        assert_eq!(library.names().collect::<Vec<_>>(), vec!["block", "idle"]);
    }

    #[test]
    fn test_missing_clip_reports_archetype() {
        let library = ClipLibrary::new("mani", vec![clip("idle", 2.0)]).unwrap();
        match library.get("scythe_spin") {
            Err(RigError::ClipNotFound { archetype, clip }) => {
                assert_eq!(archetype, "mani");
                assert_eq!(clip, "scythe_spin");
            }
            other => panic!("expected ClipNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_clip_rejected() {
        let result = ClipLibrary::new("aaron", vec![clip("idle", 2.0), clip("idle", 1.0)]);
        assert!(matches!(result, Err(RigError::InvalidClip { .. })));
    }

    #[test]
    fn test_same_name_across_archetypes_is_independent() {
        let aaron = ClipLibrary::new("aaron", vec![clip("idle", 2.0)]).unwrap();
        let mani = ClipLibrary::new("mani", vec![clip("idle", 3.0)]).unwrap();
        assert_eq!(aaron.get("idle").unwrap().duration(), 2.0);
        assert_eq!(mani.get("idle").unwrap().duration(), 3.0);
    }
}
