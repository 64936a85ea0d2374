//! Selection state of the instruction editor.

use serde::{Deserialize, Serialize};

use crate::core::tree::InstructionTree;
use crate::core::types::EnumeratedInstruction;

/// Candidates for an object chosen in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSelection {
    pub object_name: String,
    /// Instructions of the object, narrowed to the editing scope.
    pub instructions: Vec<EnumeratedInstruction>,
    /// Display tree of `instructions`.
    pub tree: InstructionTree,
}

/// Immutable snapshot of what the editor is choosing from.
///
/// Either nothing is chosen (free instructions are offered), or an object is
/// chosen together with its candidate list and tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Free,
    Object(ObjectSelection),
}

/// Where the editor stands, given its state and the instruction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    Free,
    ChoosingObject,
    ObjectInstructionChosen,
}

impl SelectionState {
    pub fn is_free(&self) -> bool {
        matches!(self, SelectionState::Free)
    }

    pub fn object(&self) -> Option<&ObjectSelection> {
        match self {
            SelectionState::Free => None,
            SelectionState::Object(selection) => Some(selection),
        }
    }

    pub fn chosen_object_name(&self) -> Option<&str> {
        self.object().map(|selection| selection.object_name.as_str())
    }

    pub fn chosen_object_instructions(&self) -> Option<&[EnumeratedInstruction]> {
        self.object().map(|selection| selection.instructions.as_slice())
    }

    pub fn chosen_object_instructions_tree(&self) -> Option<&InstructionTree> {
        self.object().map(|selection| &selection.tree)
    }

    /// An object state with an empty type is still choosing; a non-empty type
    /// means an object instruction was chosen.
    pub fn phase(&self, instruction_type: &str) -> SelectionPhase {
        match self {
            SelectionState::Free => SelectionPhase::Free,
            SelectionState::Object(_) if instruction_type.is_empty() => {
                SelectionPhase::ChoosingObject
            }
            SelectionState::Object(_) => SelectionPhase::ObjectInstructionChosen,
        }
    }
}
