//! Tree rendering for bone hierarchies

use console::Style;
use rig_anim::{Bone, Skeleton};

/// A node in a rendered hierarchy
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub node_type: NodeType,
    pub children: Vec<TreeNode>,
    pub metadata: Vec<(String, String)>,
}

/// Types of nodes in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Archetype heading
    Root,
    /// Bone with children
    Joint,
    /// Bone without children
    Leaf,
}

/// Options for tree rendering
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    pub max_depth: Option<usize>,
    pub no_color: bool,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            name: name.into(),
            node_type,
            children: Vec::new(),
            metadata: Vec::new(),
        }
    }

    pub fn add_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.push((key.to_string(), value.into()));
        self
    }

    /// Build the subtree of `bone`
    pub fn from_bone(skeleton: &Skeleton, bone: &Bone) -> Self {
        let node_type = if bone.children().is_empty() {
            NodeType::Leaf
        } else {
            NodeType::Joint
        };
        let mut node = Self::new(bone.name(), node_type)
            .with_metadata("length", format!("{:.2}", bone.length()));
        for child in bone
            .children()
            .iter()
            .filter_map(|&id| skeleton.bone(id))
        {
            node = node.add_child(Self::from_bone(skeleton, child));
        }
        node
    }
}

impl NodeType {
    /// Get color style for node type
    pub fn style(self, no_color: bool) -> Style {
        if no_color {
            Style::new()
        } else {
            match self {
                Self::Root => Style::new().bold().cyan(),
                Self::Joint => Style::new().yellow(),
                Self::Leaf => Style::new().green(),
            }
        }
    }
}

/// Render a tree structure to string
pub fn render_tree(root: &TreeNode, options: &TreeOptions) -> String {
    let mut output = String::new();
    render_node(root, &mut output, "", true, 0, options);
    output
}

fn render_node(
    node: &TreeNode,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
    options: &TreeOptions,
) {
    if let Some(max_depth) = options.max_depth
        && depth > max_depth
    {
        return;
    }

    let connector = if depth == 0 {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    output.push_str(prefix);
    output.push_str(connector);
    output.push_str(
        &node
            .node_type
            .style(options.no_color)
            .apply_to(&node.name)
            .to_string(),
    );
    if !node.metadata.is_empty() {
        let meta: Vec<String> = node
            .metadata
            .iter()
            .map(|(key, value)| format!("{key}:{value}"))
            .collect();
        let dim = if options.no_color {
            Style::new()
        } else {
            Style::new().dim()
        };
        output.push_str(&format!(" {}", dim.apply_to(format!("[{}]", meta.join(", ")))));
    }
    output.push('\n');

    let new_prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}{}", prefix, if is_last { "    " } else { "│   " })
    };

    for (i, child) in node.children.iter().enumerate() {
        let is_last_child = i + 1 == node.children.len();
        render_node(child, output, &new_prefix, is_last_child, depth + 1, options);
    }
}
