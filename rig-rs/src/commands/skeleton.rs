//! Bone hierarchy display

use std::path::Path;

use anyhow::{Context, Result};

use super::info::archetype_names;
use super::load_registry;
use crate::utils::{NodeType, TreeNode, TreeOptions, render_tree};

pub fn execute(
    archetype: &str,
    config: Option<&Path>,
    depth: Option<usize>,
    no_color: bool,
) -> Result<()> {
    let registry = load_registry(config)?;
    let archetype = registry
        .get(archetype)
        .with_context(|| format!("Available archetypes: {}", archetype_names(&registry)))?;

    let skeleton = archetype.skeleton();
    let tree = TreeNode::new(archetype.name(), NodeType::Root)
        .with_metadata("bones", skeleton.len().to_string())
        .add_child(TreeNode::from_bone(skeleton, skeleton.root()));

    let options = TreeOptions {
        // The archetype heading sits one level above the root bone.
        max_depth: depth.map(|d| d + 1),
        no_color,
    };
    print!("{}", render_tree(&tree, &options));

    Ok(())
}
