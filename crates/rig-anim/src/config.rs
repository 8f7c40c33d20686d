//! Archetype definitions supplied by asset/config files
//!
//! A configuration lists archetypes. Each archetype names a skeleton (a preset
//! or an explicit bone table) and its clips. JSON is always available; YAML
//! needs the `yaml` feature.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::bone::BoneDef;
use crate::clip::{AnimationClip, Keyframe};
use crate::effect::EffectCategory;
use crate::error::{Result, RigError};
use crate::presets::humanoid_topology;
use crate::types::Pose;

/// Top-level configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigConfig {
    pub archetypes: Vec<ArchetypeDef>,
}

/// One character preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeDef {
    pub name: String,
    #[serde(default)]
    pub skeleton: SkeletonDef,
    pub clips: Vec<ClipDef>,
}

/// Built-in topologies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkeletonPreset {
    /// 25-bone biped: spine, neck and head, two arms, two legs
    Humanoid,
}

/// Skeleton of an archetype: a preset name or an explicit bone table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkeletonDef {
    Preset(SkeletonPreset),
    Bones(Vec<BoneDef>),
}

impl Default for SkeletonDef {
    fn default() -> Self {
        Self::Preset(SkeletonPreset::Humanoid)
    }
}

impl SkeletonDef {
    /// Resolve to a topology table
    pub fn topology(&self) -> Vec<BoneDef> {
        match self {
            Self::Preset(SkeletonPreset::Humanoid) => humanoid_topology(),
            Self::Bones(bones) => bones.clone(),
        }
    }
}

/// Clip as written in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipDef {
    pub name: String,
    pub duration: f32,
    /// Overrides the default effect category for this clip name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<EffectCategory>,
    pub keyframes: Vec<KeyframeDef>,
}

/// Keyframe as written in configuration: bone name to `[x, y, z]` degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeDef {
    pub time: f32,
    pub bones: BTreeMap<String, [f32; 3]>,
}

impl ClipDef {
    /// Validate and convert into an immutable clip
    ///
    /// Keyframes may be listed in any order; they are sorted by time before
    /// validation, so duplicate times are still rejected.
    pub fn to_clip(&self) -> Result<AnimationClip> {
        let mut keyframes: Vec<Keyframe> = self
            .keyframes
            .iter()
            .map(|k| {
                let pose: Pose = k
                    .bones
                    .iter()
                    .map(|(bone, r)| (bone.clone(), Vec3::from_array(*r)))
                    .collect();
                Keyframe::new(k.time, pose)
            })
            .collect();
        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        AnimationClip::new(self.name.clone(), self.duration, keyframes)
    }
}

impl RigConfig {
    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a YAML document
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| RigError::Yaml(e.to_string()))
    }

    /// Load a configuration file, choosing the parser from its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        log::debug!("Loading rig configuration from {}", path.display());

        match extension.as_str() {
            "json" => Self::from_json_str(&fs::read_to_string(path)?),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Self::from_yaml_str(&fs::read_to_string(path)?),
            _ => Err(RigError::UnsupportedConfigFormat(path.display().to_string())),
        }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r#"{
        "archetypes": [{
            "name": "dummy",
            "skeleton": [
                {"name": "root", "length": 0.0},
                {"name": "arm", "length": 0.5, "parent": "root"}
            ],
            "clips": [{
                "name": "idle",
                "duration": 1.0,
                "keyframes": [
                    {"time": 0.5, "bones": {"arm": [10.0, 0.0, 0.0]}},
                    {"time": 0.0, "bones": {"arm": [0.0, 0.0, 0.0]}}
                ]
            }]
        }]
    }"#;

    #[test]
    fn test_parse_explicit_skeleton() {
        let config = RigConfig::from_json_str(MINIMAL).unwrap();
        let archetype = &config.archetypes[0];
        assert_eq!(archetype.name, "dummy");
        assert_eq!(archetype.skeleton.topology().len(), 2);
    }

    #[test]
    fn test_skeleton_defaults_to_humanoid() {
        let config =
            RigConfig::from_json_str(r#"{"archetypes":[{"name":"x","clips":[]}]}"#).unwrap();
        assert_eq!(
            config.archetypes[0].skeleton,
            SkeletonDef::Preset(SkeletonPreset::Humanoid)
        );
    }

    #[test]
    fn test_preset_by_name() {
        let config = RigConfig::from_json_str(
            r#"{"archetypes":[{"name":"x","skeleton":"humanoid","clips":[]}]}"#,
        )
        .unwrap();
        assert_eq!(config.archetypes[0].skeleton.topology().len(), 25);
    }

    #[test]
    fn test_clip_keyframes_sorted_by_time() {
        let config = RigConfig::from_json_str(MINIMAL).unwrap();
        let clip = config.archetypes[0].clips[0].to_clip().unwrap();
        assert_eq!(clip.times(), &[0.0, 0.5]);
    }

    #[test]
    fn test_invalid_json_reported() {
        assert!(matches!(
            RigConfig::from_json_str("{\"archetypes\": 3}"),
            Err(RigError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = RigConfig::from_json_str(MINIMAL).unwrap();
        let text = config.to_json_string().unwrap();
        assert_eq!(RigConfig::from_json_str(&text).unwrap(), config);
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_parse_yaml() {
        let yaml = r"
archetypes:
  - name: dummy
    skeleton: humanoid
    clips:
      - name: idle
        duration: 2.0
        effect: fast_pulse
        keyframes:
          - time: 0.0
            bones:
              spine_1: [0.0, 0.0, 0.0]
          - time: 1.0
            bones:
              spine_1: [5.0, 0.0, 0.0]
";
        let config = RigConfig::from_yaml_str(yaml).unwrap();
        let clip = &config.archetypes[0].clips[0];
        assert_eq!(clip.effect, Some(EffectCategory::FastPulse));
        assert_eq!(clip.to_clip().unwrap().keyframe_count(), 2);
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            RigConfig::from_path("archetypes.toml"),
            Err(RigError::UnsupportedConfigFormat(_))
        ));
    }
}
