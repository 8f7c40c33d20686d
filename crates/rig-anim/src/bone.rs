//! Bone nodes stored in a skeleton arena

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::{Rotation, local_transform};

/// Stable handle of a bone inside its skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoneId(pub(crate) u32);

impl BoneId {
    /// Position of the bone in the skeleton arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One row of a topology table: bone name, rest length and parent name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneDef {
    pub name: String,
    pub length: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl BoneDef {
    /// Create a root bone definition
    pub fn root(name: impl Into<String>, length: f32) -> Self {
        Self {
            name: name.into(),
            length,
            parent: None,
        }
    }

    /// Create a bone definition parented to `parent`
    pub fn child(name: impl Into<String>, length: f32, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length,
            parent: Some(parent.into()),
        }
    }
}

/// A rigid segment of the skeleton
///
/// Topology (name, length, parent, children) is fixed at construction. Only the
/// local transform components change during playback.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    name: String,
    length: f32,
    parent: Option<BoneId>,
    children: Vec<BoneId>,
    /// Euler rotation in degrees (X, Y, Z)
    pub rotation: Rotation,
    /// Local offset applied before rotation
    pub position: Vec3,
    /// Local scale applied after rotation
    pub scale: Vec3,
}

impl Bone {
    pub(crate) fn new(name: String, length: f32) -> Self {
        Self {
            name,
            length,
            parent: None,
            children: Vec::new(),
            rotation: Vec3::ZERO,
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: BoneId) {
        self.parent = Some(parent);
    }

    pub(crate) fn push_child(&mut self, child: BoneId) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rest length; children are offset by this along local +Y
    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn parent(&self) -> Option<BoneId> {
        self.parent
    }

    /// Child handles in declared order
    pub fn children(&self) -> &[BoneId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Local transform: translate, rotate X/Y/Z, scale
    pub fn local_transform(&self) -> Mat4 {
        local_transform(self.position, self.rotation, self.scale)
    }

    /// Offset from this bone's frame to where its children attach
    pub fn tip_offset(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.length, 0.0))
    }

    /// Restore rest pose
    pub fn reset(&mut self) {
        self.rotation = Vec3::ZERO;
        self.position = Vec3::ZERO;
        self.scale = Vec3::ONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bone_is_at_rest() {
        let bone = Bone::new("spine_1".to_string(), 0.3);
        assert_eq!(bone.name(), "spine_1");
        assert!(bone.is_root());
        assert!(bone.children().is_empty());
        assert_eq!(bone.rotation, Vec3::ZERO);
        assert_eq!(bone.scale, Vec3::ONE);
        assert!(bone.local_transform().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_tip_offset_uses_length() {
        let bone = Bone::new("l_thigh".to_string(), 0.4);
        let tip = bone.tip_offset().transform_point3(Vec3::ZERO);
        assert!((tip.y - 0.4).abs() < 0.0001);
    }

    #[test]
    fn test_reset_restores_rest_pose() {
        let mut bone = Bone::new("head".to_string(), 0.2);
        bone.rotation = Vec3::new(10.0, 20.0, 30.0);
        bone.position = Vec3::ONE;
        bone.scale = Vec3::splat(2.0);
        bone.reset();
        assert_eq!(bone.rotation, Vec3::ZERO);
        assert_eq!(bone.position, Vec3::ZERO);
        assert_eq!(bone.scale, Vec3::ONE);
    }

    #[test]
    fn test_bone_def_parent_is_optional_in_json() {
        let def: BoneDef = serde_json::from_str(r#"{"name":"root","length":0.0}"#).unwrap();
        assert_eq!(def, BoneDef::root("root", 0.0));
    }
}
