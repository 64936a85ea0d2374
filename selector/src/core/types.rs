//! Shared deterministic types for instruction selection.
//!
//! These types define stable contracts between the catalog, the collaborators
//! and the selection state machine. They carry no references to external state
//! and compare by value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether an instruction is evaluated as a condition or executed as an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionMode {
    Condition,
    Action,
}

impl InstructionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InstructionMode::Condition => "condition",
            InstructionMode::Action => "action",
        }
    }
}

impl fmt::Display for InstructionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstructionMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "condition" => Ok(InstructionMode::Condition),
            "action" => Ok(InstructionMode::Action),
            other => Err(format!(
                "unknown instruction mode '{other}' (expected 'condition' or 'action')"
            )),
        }
    }
}

/// Declared parameter of an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterMetadata {
    /// Parameter type, e.g. `object`, `behavior`, `expression`, `currentScene`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub optional: bool,
}

impl ParameterMetadata {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            description: String::new(),
            optional: false,
        }
    }
}

/// Definition of a single condition or action as declared by an extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionMetadata {
    #[serde(rename = "type")]
    pub type_id: String,
    pub full_name: String,
    #[serde(default)]
    pub description: String,
    /// Group inside the extension (may be empty). Levels are split on the
    /// configured group separator, `/` by default.
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub parameters: Vec<ParameterMetadata>,
    /// Only visible from inside the declaring extension (or behavior/object).
    #[serde(default)]
    pub private: bool,
    /// Never offered in the editor.
    #[serde(default)]
    pub hidden: bool,
}

/// What an enumerated instruction is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstructionScope {
    /// Global instruction, not tied to any object.
    Free,
    /// Instruction of an object type. An empty `object_type` is the base
    /// object, whose instructions apply to every object.
    Object { object_type: String },
    /// Instruction of a behavior type.
    Behavior { behavior_type: String },
}

impl InstructionScope {
    pub fn is_free(&self) -> bool {
        matches!(self, InstructionScope::Free)
    }
}

/// An instruction as offered to the editor: its definition plus where it
/// comes from and how it is displayed.
///
/// Type identifiers are unique within one enumerated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumeratedInstruction {
    #[serde(rename = "type")]
    pub type_id: String,
    pub display_name: String,
    /// Display name of the declaring extension.
    #[serde(default)]
    pub extension_full_name: String,
    /// Extension display name and group joined with `/`, as a single label.
    pub full_group_name: String,
    /// Name of the extension declaring the instruction.
    pub extension: String,
    pub scope: InstructionScope,
    pub is_private: bool,
    pub metadata: InstructionMetadata,
}
