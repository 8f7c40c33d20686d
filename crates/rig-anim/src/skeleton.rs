//! Bone hierarchy and world transform propagation
//!
//! Bones live in an arena addressed by [`BoneId`]. Parent and child links are
//! handles into the same arena, so the tree has no ownership cycles and the
//! declared child order is preserved for traversal.

use std::collections::HashMap;

use glam::Mat4;

use crate::bone::{Bone, BoneDef, BoneId};
use crate::error::{Result, RigError};
use crate::types::{Pose, Rotation};

/// Skeleton built once from a topology table
#[derive(Debug, Clone)]
pub struct Skeleton {
    bones: Vec<Bone>,
    by_name: HashMap<String, BoneId>,
    root: BoneId,
}

impl Skeleton {
    /// Build the bone tree from a topology table
    ///
    /// Parents may be declared after their children. Children keep the order
    /// in which they appear in the table.
    pub fn build(topology: &[BoneDef]) -> Result<Self> {
        if topology.is_empty() {
            return Err(RigError::MalformedTopology(
                "topology table is empty".to_string(),
            ));
        }

        let mut bones = Vec::with_capacity(topology.len());
        let mut by_name = HashMap::with_capacity(topology.len());

        for (index, def) in topology.iter().enumerate() {
            if !def.length.is_finite() || def.length < 0.0 {
                return Err(RigError::MalformedTopology(format!(
                    "bone '{}' has invalid length {}",
                    def.name, def.length
                )));
            }
            let id = BoneId(index as u32);
            if by_name.insert(def.name.clone(), id).is_some() {
                return Err(RigError::MalformedTopology(format!(
                    "bone '{}' is defined more than once",
                    def.name
                )));
            }
            bones.push(Bone::new(def.name.clone(), def.length));
        }

        let mut roots = Vec::new();
        for (index, def) in topology.iter().enumerate() {
            let id = BoneId(index as u32);
            let Some(parent_name) = &def.parent else {
                roots.push(id);
                continue;
            };
            let Some(&parent) = by_name.get(parent_name) else {
                return Err(RigError::MalformedTopology(format!(
                    "bone '{}' references undefined parent '{}'",
                    def.name, parent_name
                )));
            };
            if parent == id {
                return Err(RigError::MalformedTopology(format!(
                    "bone '{}' is its own parent",
                    def.name
                )));
            }
            bones[index].set_parent(parent);
            bones[parent.index()].push_child(id);
        }

        let root = match roots.as_slice() {
            [root] => *root,
            [] => {
                return Err(RigError::MalformedTopology(
                    "no root bone (every bone has a parent, the table contains a cycle)"
                        .to_string(),
                ));
            }
            many => {
                let names: Vec<&str> = many.iter().map(|id| bones[id.index()].name()).collect();
                return Err(RigError::MalformedTopology(format!(
                    "multiple root bones: {}",
                    names.join(", ")
                )));
            }
        };

        // With a single root and one parent per bone, anything the root cannot
        // reach sits on a cycle.
        let mut reached = vec![false; bones.len()];
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            reached[id.index()] = true;
            stack.extend_from_slice(bones[id.index()].children());
        }
        if let Some(index) = reached.iter().position(|r| !r) {
            return Err(RigError::MalformedTopology(format!(
                "bone '{}' is part of a parent cycle",
                bones[index].name()
            )));
        }

        log::debug!(
            "Built skeleton with {} bones rooted at '{}'",
            bones.len(),
            bones[root.index()].name()
        );

        Ok(Self {
            bones,
            by_name,
            root,
        })
    }

    /// Number of bones
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn root(&self) -> &Bone {
        &self.bones[self.root.index()]
    }

    pub fn root_id(&self) -> BoneId {
        self.root
    }

    /// Look up a bone handle by name
    pub fn id_of(&self, name: &str) -> Option<BoneId> {
        self.by_name.get(name).copied()
    }

    /// Get a bone by handle
    pub fn bone(&self, id: BoneId) -> Option<&Bone> {
        self.bones.get(id.index())
    }

    /// Get a bone by name
    pub fn get(&self, name: &str) -> Result<&Bone> {
        self.id_of(name)
            .map(|id| &self.bones[id.index()])
            .ok_or_else(|| RigError::BoneNotFound(name.to_string()))
    }

    /// Get a mutable bone by name
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Bone> {
        match self.id_of(name) {
            Some(id) => Ok(&mut self.bones[id.index()]),
            None => Err(RigError::BoneNotFound(name.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Bones in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Bone> {
        self.bones.iter()
    }

    /// Set the local rotation of a bone
    pub fn set_rotation(&mut self, name: &str, rotation: Rotation) -> Result<()> {
        self.get_mut(name)?.rotation = rotation;
        Ok(())
    }

    /// Write a sampled pose through to the bones
    ///
    /// Entries naming bones this skeleton does not have are skipped. Returns
    /// the number of bones updated.
    pub fn apply_pose(&mut self, pose: &Pose) -> usize {
        let mut applied = 0;
        for (name, rotation) in pose {
            match self.set_rotation(name, *rotation) {
                Ok(()) => applied += 1,
                Err(err) => log::trace!("Skipping pose entry: {err}"),
            }
        }
        applied
    }

    /// Return every bone to its rest pose
    pub fn reset_pose(&mut self) {
        for bone in &mut self.bones {
            bone.reset();
        }
    }

    /// Depth-first traversal from the root with an identity base transform
    pub fn traverse(&self) -> Traversal<'_> {
        self.traverse_from(Mat4::IDENTITY)
    }

    /// Depth-first traversal with the root placed by `base`
    ///
    /// Yields `(bone, parent_transform)` parent-before-children, siblings in
    /// declared order. `parent_transform` already includes the parent's tip
    /// offset, so a bone's world transform is
    /// `parent_transform * bone.local_transform()`.
    pub fn traverse_from(&self, base: Mat4) -> Traversal<'_> {
        Traversal {
            skeleton: self,
            stack: vec![(self.root, base)],
        }
    }

    /// World transform of every bone in traversal order
    pub fn world_transforms(&self) -> Vec<(String, Mat4)> {
        self.world_transforms_from(Mat4::IDENTITY)
    }

    /// World transforms with the root placed by `base`
    pub fn world_transforms_from(&self, base: Mat4) -> Vec<(String, Mat4)> {
        self.traverse_from(base)
            .map(|(bone, parent)| (bone.name().to_string(), parent * bone.local_transform()))
            .collect()
    }
}

/// Lazy depth-first walk over a skeleton
///
/// A clone continues from the same position. Call [`Skeleton::traverse`]
/// again to walk from the root.
#[derive(Debug, Clone)]
pub struct Traversal<'a> {
    skeleton: &'a Skeleton,
    stack: Vec<(BoneId, Mat4)>,
}

impl<'a> Iterator for Traversal<'a> {
    type Item = (&'a Bone, Mat4);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, parent_transform) = self.stack.pop()?;
        let bone = self.skeleton.bone(id)?;

        let child_base = parent_transform * bone.local_transform() * bone.tip_offset();
        // Reverse so the first declared child is popped first.
        self.stack
            .extend(bone.children().iter().rev().map(|&child| (child, child_base)));

        Some((bone, parent_transform))
    }
}
