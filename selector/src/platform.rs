//! Instruction definitions of a platform, grouped by extension.

use serde::{Deserialize, Serialize};

use crate::core::types::{EnumeratedInstruction, InstructionMetadata, InstructionMode, InstructionScope};

/// All extensions available to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    pub name: String,
    /// Display name, used as the first group of every instruction.
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub conditions: Vec<InstructionMetadata>,
    #[serde(default)]
    pub actions: Vec<InstructionMetadata>,
    #[serde(default)]
    pub objects: Vec<ObjectType>,
    #[serde(default)]
    pub behaviors: Vec<BehaviorType>,
}

/// Object type declared by an extension. The empty type is the base object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub conditions: Vec<InstructionMetadata>,
    #[serde(default)]
    pub actions: Vec<InstructionMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorType {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub conditions: Vec<InstructionMetadata>,
    #[serde(default)]
    pub actions: Vec<InstructionMetadata>,
}

fn pick<'a>(
    mode: InstructionMode,
    conditions: &'a [InstructionMetadata],
    actions: &'a [InstructionMetadata],
) -> &'a [InstructionMetadata] {
    match mode {
        InstructionMode::Condition => conditions,
        InstructionMode::Action => actions,
    }
}

impl ObjectType {
    pub fn instructions(&self, mode: InstructionMode) -> &[InstructionMetadata] {
        pick(mode, &self.conditions, &self.actions)
    }
}

impl BehaviorType {
    pub fn instructions(&self, mode: InstructionMode) -> &[InstructionMetadata] {
        pick(mode, &self.conditions, &self.actions)
    }
}

impl Extension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: String::new(),
            conditions: Vec::new(),
            actions: Vec::new(),
            objects: Vec::new(),
            behaviors: Vec::new(),
        }
    }

    /// Free instructions of the extension.
    pub fn instructions(&self, mode: InstructionMode) -> &[InstructionMetadata] {
        pick(mode, &self.conditions, &self.actions)
    }

    pub fn object_type(&self, type_name: &str) -> Option<&ObjectType> {
        self.objects.iter().find(|object| object.type_name == type_name)
    }

    pub fn behavior_type(&self, type_name: &str) -> Option<&BehaviorType> {
        self.behaviors
            .iter()
            .find(|behavior| behavior.type_name == type_name)
    }

    fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.name
        } else {
            &self.full_name
        }
    }

    /// Wrap definitions as enumerated instructions, skipping hidden ones.
    pub fn enumerate(
        &self,
        definitions: &[InstructionMetadata],
        scope: &InstructionScope,
    ) -> Vec<EnumeratedInstruction> {
        definitions
            .iter()
            .filter(|metadata| !metadata.hidden)
            .map(|metadata| EnumeratedInstruction {
                type_id: metadata.type_id.clone(),
                display_name: metadata.full_name.clone(),
                extension_full_name: self.display_name().to_string(),
                full_group_name: full_group_name(self.display_name(), &metadata.group),
                extension: self.name.clone(),
                scope: scope.clone(),
                is_private: metadata.private,
                metadata: metadata.clone(),
            })
            .collect()
    }

    /// Free, object-type and behavior-type instructions, in that order.
    pub fn enumerate_all(&self, mode: InstructionMode) -> Vec<EnumeratedInstruction> {
        let mut all = self.enumerate(self.instructions(mode), &InstructionScope::Free);
        for object in &self.objects {
            all.extend(self.enumerate(
                object.instructions(mode),
                &InstructionScope::Object {
                    object_type: object.type_name.clone(),
                },
            ));
        }
        for behavior in &self.behaviors {
            all.extend(self.enumerate(
                behavior.instructions(mode),
                &InstructionScope::Behavior {
                    behavior_type: behavior.type_name.clone(),
                },
            ));
        }
        all
    }
}

fn full_group_name(extension: &str, group: &str) -> String {
    [extension, group]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}

impl Platform {
    pub fn enumerate(&self, mode: InstructionMode) -> Vec<EnumeratedInstruction> {
        self.extensions
            .iter()
            .flat_map(|extension| extension.enumerate_all(mode))
            .collect()
    }
}
