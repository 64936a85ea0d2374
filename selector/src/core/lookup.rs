//! Lookups over enumerated instructions and their metadata.

use crate::core::types::{EnumeratedInstruction, InstructionMetadata, ParameterMetadata};

/// Parameter types that designate the object an instruction acts on.
pub const OBJECT_PARAMETER_TYPES: &[&str] = &[
    "object",
    "objectPtr",
    "objectList",
    "objectListOrEmptyIfJustDeclared",
    "objectListOrEmptyWithoutPicking",
];

/// Find the instruction with exactly `type_id` in `list`.
///
/// An empty `type_id` never matches.
pub fn find_instruction<'a>(
    list: &'a [EnumeratedInstruction],
    type_id: &str,
) -> Option<&'a EnumeratedInstruction> {
    if type_id.is_empty() {
        return None;
    }
    list.iter().find(|instruction| instruction.type_id == type_id)
}

pub fn is_object_parameter(parameter: &ParameterMetadata) -> bool {
    OBJECT_PARAMETER_TYPES.contains(&parameter.kind.as_str())
}

/// Resolves which parameter of an instruction names its target object.
pub trait ObjectParameterResolver {
    /// Index of the target object parameter, or `None` if the instruction
    /// has no such parameter.
    fn object_parameter_index(&self, metadata: &InstructionMetadata) -> Option<usize>;
}

/// Looks for the object parameter in the first two positions.
///
/// The second position covers instructions whose first parameter is a
/// code-only one (such as the current scene).
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingObjectParameter;

impl ObjectParameterResolver for LeadingObjectParameter {
    fn object_parameter_index(&self, metadata: &InstructionMetadata) -> Option<usize> {
        metadata
            .parameters
            .iter()
            .take(2)
            .position(is_object_parameter)
    }
}
