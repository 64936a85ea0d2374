//! Instruction catalog abstraction and its project-backed implementation.
//!
//! The [`InstructionCatalog`] trait decouples the selection state machine from
//! where instruction definitions and objects come from. Tests and embedders can
//! provide their own catalogs; [`ProjectCatalog`] answers from a [`Platform`]
//! and the object containers of a [`Project`] layout.

use crate::core::types::{EnumeratedInstruction, InstructionMetadata, InstructionMode, InstructionScope};
use crate::platform::Platform;
use crate::project::{ObjectsContainer, resolve_object};

/// Source of candidate instructions.
pub trait InstructionCatalog {
    /// Every free, object and behavior instruction for `mode`, unfiltered.
    fn enumerate(&self, mode: InstructionMode) -> Vec<EnumeratedInstruction>;

    /// Instructions applicable to `object_name`: those of its type and of the
    /// behaviors attached to it. Unknown objects give an empty list.
    fn enumerate_for_object(
        &self,
        mode: InstructionMode,
        object_name: &str,
    ) -> Vec<EnumeratedInstruction>;

    /// Metadata of the instruction `type_id`, if known.
    fn metadata(&self, mode: InstructionMode, type_id: &str) -> Option<InstructionMetadata> {
        if type_id.is_empty() {
            return None;
        }
        self.enumerate(mode)
            .into_iter()
            .find(|instruction| instruction.type_id == type_id)
            .map(|instruction| instruction.metadata)
    }
}

/// Catalog over a platform and the objects visible from one layout.
#[derive(Debug, Clone, Copy)]
pub struct ProjectCatalog<'a> {
    platform: &'a Platform,
    global_objects: &'a ObjectsContainer,
    objects: &'a ObjectsContainer,
}

impl<'a> ProjectCatalog<'a> {
    pub fn new(
        platform: &'a Platform,
        global_objects: &'a ObjectsContainer,
        objects: &'a ObjectsContainer,
    ) -> Self {
        Self {
            platform,
            global_objects,
            objects,
        }
    }
}

impl InstructionCatalog for ProjectCatalog<'_> {
    fn enumerate(&self, mode: InstructionMode) -> Vec<EnumeratedInstruction> {
        self.platform.enumerate(mode)
    }

    fn enumerate_for_object(
        &self,
        mode: InstructionMode,
        object_name: &str,
    ) -> Vec<EnumeratedInstruction> {
        let Some(resolved) = resolve_object(self.global_objects, self.objects, object_name) else {
            return Vec::new();
        };

        let mut instructions = Vec::new();
        for extension in &self.platform.extensions {
            if let Some(base) = extension.object_type("") {
                instructions.extend(extension.enumerate(
                    base.instructions(mode),
                    &InstructionScope::Object {
                        object_type: String::new(),
                    },
                ));
            }
            // The base type was handled above.
            if let Some(object) = extension
                .object_type(&resolved.object_type)
                .filter(|object| !object.type_name.is_empty())
            {
                instructions.extend(extension.enumerate(
                    object.instructions(mode),
                    &InstructionScope::Object {
                        object_type: object.type_name.clone(),
                    },
                ));
            }
            for behavior_type in &resolved.behavior_types {
                if let Some(behavior) = extension.behavior_type(behavior_type) {
                    instructions.extend(extension.enumerate(
                        behavior.instructions(mode),
                        &InstructionScope::Behavior {
                            behavior_type: behavior.type_name.clone(),
                        },
                    ));
                }
            }
        }
        instructions
    }
}
