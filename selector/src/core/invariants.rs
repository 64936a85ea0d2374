//! Semantic invariants of instruction catalogs not expressible via serde.

use std::collections::HashSet;

use crate::core::types::{EnumeratedInstruction, InstructionMetadata, InstructionMode};
use crate::platform::Platform;

/// Check a candidate list:
/// - No empty type ids
/// - No duplicate type ids
pub fn validate_candidates(list: &[EnumeratedInstruction]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for instruction in list {
        check_type(
            &instruction.type_id,
            &instruction.extension,
            &mut seen,
            &mut errors,
        );
    }
    errors
}

/// Check a platform, per mode, across every extension, object type and
/// behavior type (hidden instructions included):
/// - No empty type ids
/// - No duplicate type ids
/// - No duplicate object or behavior types; every extension may extend the
///   base object (empty type) once
pub fn validate_platform(platform: &Platform) -> Vec<String> {
    let mut errors = Vec::new();

    for mode in [InstructionMode::Condition, InstructionMode::Action] {
        let mut seen = HashSet::new();
        for extension in &platform.extensions {
            let mut definitions: Vec<&InstructionMetadata> =
                extension.instructions(mode).iter().collect();
            for object in &extension.objects {
                definitions.extend(object.instructions(mode));
            }
            for behavior in &extension.behaviors {
                definitions.extend(behavior.instructions(mode));
            }
            for metadata in definitions {
                let path = format!("{}/{}", extension.name, mode);
                check_type(&metadata.type_id, &path, &mut seen, &mut errors);
            }
        }
    }

    let mut object_types = HashSet::new();
    let mut behavior_types = HashSet::new();
    for extension in &platform.extensions {
        let mut base_declared = false;
        for object in &extension.objects {
            let duplicate = if object.type_name.is_empty() {
                std::mem::replace(&mut base_declared, true)
            } else {
                !object_types.insert(object.type_name.as_str())
            };
            if duplicate {
                errors.push(format!(
                    "duplicate object type '{}' in {}",
                    object.type_name, extension.name
                ));
            }
        }
        for behavior in &extension.behaviors {
            if !behavior_types.insert(behavior.type_name.as_str()) {
                errors.push(format!(
                    "duplicate behavior type '{}' in {}",
                    behavior.type_name, extension.name
                ));
            }
        }
    }

    errors
}

fn check_type<'a>(
    type_id: &'a str,
    path: &str,
    seen: &mut HashSet<&'a str>,
    errors: &mut Vec<String>,
) {
    if type_id.is_empty() {
        errors.push(format!("{}: empty instruction type", path));
        return;
    }
    if !seen.insert(type_id) {
        errors.push(format!("duplicate instruction type '{}' at {}", type_id, path));
    }
}
