//! Bundled topologies and archetypes

use crate::bone::BoneDef;
use crate::config::RigConfig;
use crate::error::Result;

/// JSON definition of the bundled "aaron" and "mani" archetypes
pub const BUILTIN_ARCHETYPES_JSON: &str = include_str!("../assets/archetypes.json");

/// 25-bone biped rig
///
/// The spine chain and both hips hang off `root`; neck and both shoulder
/// chains hang off `spine_2`. Lengths are in model units.
pub fn humanoid_topology() -> Vec<BoneDef> {
    let mut bones = vec![
        BoneDef::root("root", 0.0),
        BoneDef::child("spine_1", 0.3, "root"),
        BoneDef::child("spine_2", 0.3, "spine_1"),
        BoneDef::child("neck", 0.2, "spine_2"),
        BoneDef::child("head", 0.2, "neck"),
    ];

    for side in ["l", "r"] {
        bones.extend(chain(
            side,
            "spine_2",
            &[
                ("shoulder", 0.2),
                ("upper_arm", 0.3),
                ("elbow", 0.2),
                ("forearm", 0.3),
                ("hand", 0.2),
            ],
        ));
    }
    for side in ["l", "r"] {
        bones.extend(chain(
            side,
            "root",
            &[
                ("hip", 0.3),
                ("thigh", 0.4),
                ("knee", 0.2),
                ("calf", 0.4),
                ("foot", 0.2),
            ],
        ));
    }

    bones
}

fn chain(side: &str, attach: &str, segments: &[(&str, f32)]) -> Vec<BoneDef> {
    let mut parent = attach.to_string();
    segments
        .iter()
        .map(|(segment, length)| {
            let name = format!("{side}_{segment}");
            let def = BoneDef::child(name.clone(), *length, parent.clone());
            parent = name;
            def
        })
        .collect()
}

/// Parse the bundled archetype definitions
pub fn builtin_config() -> Result<RigConfig> {
    RigConfig::from_json_str(BUILTIN_ARCHETYPES_JSON)
}
