//! The instruction being edited.

use serde::{Deserialize, Serialize};

/// Caller-owned instruction whose declared type the selector reads and writes.
///
/// The selector never owns the handle: it is borrowed for the duration of
/// each transition, and only its type is ever written.
pub trait InstructionHandle {
    /// Declared type identifier. Empty when no instruction is chosen yet.
    fn instruction_type(&self) -> &str;

    fn set_instruction_type(&mut self, type_id: &str);

    /// Parameter value at `index`, or the empty string if there is none.
    fn parameter(&self, index: usize) -> &str;
}

/// Plain instruction as stored in event documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(rename = "type", default)]
    pub type_id: String,
    #[serde(default)]
    pub parameters: Vec<String>,
}

impl Instruction {
    pub fn new(type_id: impl Into<String>, parameters: &[&str]) -> Self {
        Self {
            type_id: type_id.into(),
            parameters: parameters.iter().map(|value| value.to_string()).collect(),
        }
    }
}

impl InstructionHandle for Instruction {
    fn instruction_type(&self) -> &str {
        &self.type_id
    }

    fn set_instruction_type(&mut self, type_id: &str) {
        self.type_id = type_id.to_string();
    }

    fn parameter(&self, index: usize) -> &str {
        self.parameters.get(index).map(String::as_str).unwrap_or("")
    }
}
