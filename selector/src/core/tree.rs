//! Hierarchical grouping of candidate instructions for display.

use serde::{Deserialize, Serialize};

use crate::core::types::EnumeratedInstruction;

/// Root of a display tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionTree {
    pub children: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Group {
        name: String,
        children: Vec<TreeNode>,
    },
    Instruction {
        name: String,
        instruction: EnumeratedInstruction,
    },
}

impl TreeNode {
    fn is_group(&self, group: &str) -> bool {
        matches!(self, TreeNode::Group { name, .. } if name == group)
    }

    fn is_instruction(&self, leaf: &str) -> bool {
        matches!(self, TreeNode::Instruction { name, .. } if name == leaf)
    }
}

impl InstructionTree {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of instruction leaves in the whole tree.
    pub fn instruction_count(&self) -> usize {
        count_instructions(&self.children)
    }

    /// Names from the root down to the leaf holding `type_id`, leaf included.
    pub fn path_to(&self, type_id: &str) -> Option<Vec<String>> {
        let mut path = Vec::new();
        if path_to_inner(&self.children, type_id, &mut path) {
            return Some(path);
        }
        None
    }

    /// Indented text rendering, two spaces per level, leaves followed by
    /// their type in brackets.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_inner(&self.children, 0, &mut out);
        out
    }
}

fn count_instructions(nodes: &[TreeNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            TreeNode::Group { children, .. } => count_instructions(children),
            TreeNode::Instruction { .. } => 1,
        })
        .sum()
}

fn path_to_inner(nodes: &[TreeNode], type_id: &str, path: &mut Vec<String>) -> bool {
    for node in nodes {
        match node {
            TreeNode::Group { name, children } => {
                path.push(name.clone());
                if path_to_inner(children, type_id, path) {
                    return true;
                }
                path.pop();
            }
            TreeNode::Instruction { name, instruction } => {
                if instruction.type_id == type_id {
                    path.push(name.clone());
                    return true;
                }
            }
        }
    }
    false
}

fn render_inner(nodes: &[TreeNode], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match node {
            TreeNode::Group { name, children } => {
                out.push_str(&format!("{indent}{name}/\n"));
                render_inner(children, depth + 1, out);
            }
            TreeNode::Instruction { name, instruction } => {
                out.push_str(&format!("{indent}{name} [{}]\n", instruction.type_id));
            }
        }
    }
}

/// Builds the display tree of a candidate list.
///
/// Must be deterministic: equal lists give equal trees.
pub trait TreeBuilder {
    fn build(&self, instructions: &[EnumeratedInstruction]) -> InstructionTree;
}

/// Groups instructions under their extension display name, then under the
/// levels of their metadata group split on `separator`.
///
/// Empty levels are dropped, so an instruction without extension name or
/// group lands at the root. Leaves are keyed by display name: a later instruction with the same
/// name in the same group replaces the earlier one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupTreeBuilder {
    separator: char,
}

impl GroupTreeBuilder {
    pub const fn new(separator: char) -> Self {
        Self { separator }
    }
}

impl Default for GroupTreeBuilder {
    fn default() -> Self {
        Self::new('/')
    }
}

impl TreeBuilder for GroupTreeBuilder {
    fn build(&self, instructions: &[EnumeratedInstruction]) -> InstructionTree {
        let mut children = Vec::new();
        for instruction in instructions {
            let path: Vec<&str> = std::iter::once(instruction.extension_full_name.as_str())
                .chain(instruction.metadata.group.split(self.separator))
                .filter(|part| !part.is_empty())
                .collect();
            insert(&mut children, &path, instruction);
        }
        InstructionTree { children }
    }
}

fn insert(nodes: &mut Vec<TreeNode>, path: &[&str], instruction: &EnumeratedInstruction) {
    let Some((group, rest)) = path.split_first() else {
        insert_leaf(nodes, instruction);
        return;
    };

    let index = match nodes.iter().position(|node| node.is_group(group)) {
        Some(index) => index,
        None => {
            nodes.push(TreeNode::Group {
                name: group.to_string(),
                children: Vec::new(),
            });
            nodes.len() - 1
        }
    };
    if let TreeNode::Group { children, .. } = &mut nodes[index] {
        insert(children, rest, instruction);
    }
}

fn insert_leaf(nodes: &mut Vec<TreeNode>, instruction: &EnumeratedInstruction) {
    let leaf = TreeNode::Instruction {
        name: instruction.display_name.clone(),
        instruction: instruction.clone(),
    };
    match nodes
        .iter_mut()
        .find(|node| node.is_instruction(&instruction.display_name))
    {
        Some(existing) => *existing = leaf,
        None => nodes.push(leaf),
    }
}
