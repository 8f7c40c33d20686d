//! Per-character animation handle

use std::sync::Arc;

use glam::{Mat4, Vec3};
use serde::Serialize;

use crate::controller::{PlaybackController, TickOutcome};
use crate::effect::EffectTable;
use crate::error::Result;
use crate::library::ClipLibrary;
use crate::skeleton::Skeleton;

/// One animated character
///
/// Owns its skeleton and playback controller. The clip library and effect
/// table are shared with every other rig of the same archetype.
#[derive(Debug, Clone)]
pub struct Rig {
    archetype: String,
    skeleton: Skeleton,
    controller: PlaybackController,
    placement: Mat4,
}

impl Rig {
    pub(crate) fn new(
        archetype: String,
        skeleton: Skeleton,
        library: Arc<ClipLibrary>,
        effects: Arc<EffectTable>,
    ) -> Self {
        Self {
            archetype,
            skeleton,
            controller: PlaybackController::new(library, effects),
            placement: Mat4::IDENTITY,
        }
    }

    /// Archetype this rig was spawned from
    pub fn archetype(&self) -> &str {
        &self.archetype
    }

    /// Start a clip immediately
    pub fn play(&mut self, clip: &str) -> Result<()> {
        self.controller.play(clip)
    }

    pub fn stop(&mut self) {
        self.controller.stop();
    }

    /// Advance by `dt` seconds and pose the skeleton
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        let outcome = self.controller.tick(dt, &mut self.skeleton);
        log::trace!(
            "[{}] {:?} clip={:?} t={:.3}",
            self.archetype,
            outcome,
            self.controller.current_clip(),
            self.controller.elapsed()
        );
        outcome
    }

    /// World matrix of every bone in depth-first order, including placement
    pub fn world_transforms(&self) -> Vec<(String, Mat4)> {
        self.skeleton.world_transforms_from(self.placement)
    }

    pub fn effect_intensity(&self) -> f32 {
        self.controller.effect_intensity()
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Mutable access for callers that pose bones directly
    pub fn skeleton_mut(&mut self) -> &mut Skeleton {
        &mut self.skeleton
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController {
        &mut self.controller
    }

    /// Model-to-world transform applied above the root bone
    pub fn placement(&self) -> Mat4 {
        self.placement
    }

    pub fn set_placement(&mut self, placement: Mat4) {
        self.placement = placement;
    }

    /// Place the rig at a world position
    pub fn set_translation(&mut self, translation: Vec3) {
        self.placement = Mat4::from_translation(translation);
    }

    /// Capture the current frame
    pub fn snapshot(&self) -> RigSnapshot {
        let bones = self
            .skeleton
            .traverse_from(self.placement)
            .map(|(bone, parent)| BoneSnapshot {
                name: bone.name().to_string(),
                rotation: bone.rotation,
                world: parent * bone.local_transform(),
            })
            .collect();

        RigSnapshot {
            archetype: self.archetype.clone(),
            clip: self.controller.current_clip().map(str::to_string),
            elapsed: self.controller.elapsed(),
            effect_intensity: self.controller.effect_intensity(),
            combo_count: self.controller.combo_count(),
            bones,
        }
    }
}

/// Serializable summary of one rig frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RigSnapshot {
    pub archetype: String,
    pub clip: Option<String>,
    pub elapsed: f32,
    pub effect_intensity: f32,
    pub combo_count: u32,
    pub bones: Vec<BoneSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoneSnapshot {
    pub name: String,
    /// Local Euler rotation in degrees
    pub rotation: Vec3,
    pub world: Mat4,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::ArchetypeRegistry;
    use crate::types::DEFAULT_TICK;

    fn registry() -> ArchetypeRegistry {
        ArchetypeRegistry::builtin().unwrap()
    }

    #[test]
    fn test_rigs_are_independent() {
        let registry = registry();
        let mut first = registry.create_rig("aaron").unwrap();
        let mut second = registry.create_rig("aaron").unwrap();

        first.play("scythe_swing").unwrap();
        second.play("idle").unwrap();
        for _ in 0..12 {
            first.tick(DEFAULT_TICK);
        }

        assert_eq!(first.controller().current_clip(), Some("scythe_swing"));
        assert_eq!(second.controller().current_clip(), Some("idle"));
        assert_eq!(second.controller().elapsed(), 0.0);
        assert_ne!(
            first.skeleton().get("r_elbow").unwrap().rotation,
            second.skeleton().get("r_elbow").unwrap().rotation
        );
    }

    #[test]
    fn test_ticking_one_rig_leaves_twin_untouched() {
        let registry = registry();
        let mut first = registry.create_rig("aaron").unwrap();
        let mut second = registry.create_rig("aaron").unwrap();

        first.play("scythe_swing").unwrap();
        second.play("scythe_swing").unwrap();
        first.tick(0.1);
        second.tick(0.1);
        let before = second.snapshot();

        for _ in 0..30 {
            first.tick(DEFAULT_TICK);
        }

        assert_eq!(second.snapshot(), before);
        assert!((second.controller().elapsed() - 0.1).abs() < 1e-6);
        assert_ne!(first.snapshot().bones, before.bones);
        assert!(first.controller().elapsed() > 0.5);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut rig = registry().create_rig("mani").unwrap();
        rig.play("blade_attack").unwrap();
        rig.tick(0.25);
        rig.controller_mut().set_combo_count(2);

        let snapshot = rig.snapshot();
        assert_eq!(snapshot.archetype, "mani");
        assert_eq!(snapshot.clip.as_deref(), Some("blade_attack"));
        assert!((snapshot.elapsed - 0.25).abs() < 1e-6);
        assert_eq!(snapshot.combo_count, 2);
        assert_eq!(snapshot.bones.len(), 25);
        assert_eq!(snapshot.bones[0].name, "root");
        assert!((0.0..=1.0).contains(&snapshot.effect_intensity));
    }

    #[test]
    fn test_snapshot_matches_world_transforms() {
        let mut rig = registry().create_rig("aaron").unwrap();
        rig.play("scythe_spin").unwrap();
        rig.tick(0.3);

        let transforms = rig.world_transforms();
        let snapshot = rig.snapshot();
        for ((name, world), bone) in transforms.iter().zip(&snapshot.bones) {
            assert_eq!(name, &bone.name);
            assert!(world.abs_diff_eq(bone.world, 1e-6));
        }
    }

    #[test]
    fn test_placement_offsets_root() {
        let mut rig = registry().create_rig("aaron").unwrap();
        rig.set_translation(Vec3::new(-2.0, 0.0, 0.0));
        let (name, root) = &rig.world_transforms()[0];
        assert_eq!(name, "root");
        assert!(
            root.transform_point3(Vec3::ZERO)
                .abs_diff_eq(Vec3::new(-2.0, 0.0, 0.0), 1e-6)
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let rig = registry().create_rig("aaron").unwrap();
        let json = serde_json::to_value(rig.snapshot()).unwrap();
        assert_eq!(json["archetype"], "aaron");
        assert!(json["clip"].is_null());
        assert_eq!(json["bones"].as_array().unwrap().len(), 25);
    }

    #[test]
    fn test_rig_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Rig>();
    }
}
