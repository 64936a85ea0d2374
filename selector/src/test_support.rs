//! Test-only helpers for constructing catalogs, projects and fixture directories.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::types::{
    EnumeratedInstruction, InstructionMetadata, InstructionScope, ParameterMetadata,
};
use crate::io::catalog_store::{write_platform, write_project};
use crate::io::config::{SelectorConfig, write_config};
use crate::platform::{BehaviorType, Extension, ObjectType, Platform};
use crate::project::{BehaviorInstance, Layout, ObjectDefinition, ObjectGroup, ObjectsContainer, Project};

/// Create instruction metadata with the given parameter types.
///
/// The full name is the part of the type after `::`.
pub fn metadata(type_id: &str, parameters: &[&str]) -> InstructionMetadata {
    InstructionMetadata {
        type_id: type_id.to_string(),
        full_name: short_name(type_id).to_string(),
        description: String::new(),
        group: String::new(),
        parameters: parameters.iter().map(|kind| ParameterMetadata::new(*kind)).collect(),
        private: false,
        hidden: false,
    }
}

/// Same as [`metadata`], inside `group`.
pub fn grouped_metadata(type_id: &str, group: &str, parameters: &[&str]) -> InstructionMetadata {
    InstructionMetadata {
        group: group.to_string(),
        ..metadata(type_id, parameters)
    }
}

fn short_name(type_id: &str) -> &str {
    type_id.rsplit("::").next().unwrap_or(type_id)
}

fn extension_of(type_id: &str) -> &str {
    type_id.split("::").next().unwrap_or(type_id)
}

fn descriptor(type_id: &str, scope: InstructionScope, parameters: &[&str]) -> EnumeratedInstruction {
    EnumeratedInstruction {
        type_id: type_id.to_string(),
        display_name: short_name(type_id).to_string(),
        extension_full_name: String::new(),
        full_group_name: String::new(),
        extension: extension_of(type_id).to_string(),
        scope,
        is_private: false,
        metadata: metadata(type_id, parameters),
    }
}

/// Enumerated free instruction without parameters or group.
pub fn free_descriptor(type_id: &str) -> EnumeratedInstruction {
    descriptor(type_id, InstructionScope::Free, &[])
}

/// Enumerated object instruction whose first parameter is the object.
pub fn object_descriptor(type_id: &str, object_type: &str) -> EnumeratedInstruction {
    descriptor(
        type_id,
        InstructionScope::Object {
            object_type: object_type.to_string(),
        },
        &["object"],
    )
}

/// Enumerated behavior instruction taking the object then the behavior.
pub fn behavior_descriptor(type_id: &str, behavior_type: &str) -> EnumeratedInstruction {
    descriptor(
        type_id,
        InstructionScope::Behavior {
            behavior_type: behavior_type.to_string(),
        },
        &["object", "behavior"],
    )
}

/// Override group and display name of an enumerated instruction.
pub fn grouped(
    mut instruction: EnumeratedInstruction,
    group: &str,
    display_name: &str,
) -> EnumeratedInstruction {
    instruction.metadata.group = group.to_string();
    instruction.full_group_name = group.to_string();
    instruction.display_name = display_name.to_string();
    instruction
}

/// Create an object with `(name, type)` behaviors.
pub fn object(name: &str, object_type: &str, behaviors: &[(&str, &str)]) -> ObjectDefinition {
    ObjectDefinition {
        name: name.to_string(),
        object_type: object_type.to_string(),
        behaviors: behaviors
            .iter()
            .map(|(name, behavior_type)| BehaviorInstance {
                name: name.to_string(),
                behavior_type: behavior_type.to_string(),
            })
            .collect(),
    }
}

/// Deterministic platform used across tests.
///
/// ```text
/// Builtin ("Common")   free:   Free::DoSomething (c), Free::Wait (a, Timers)
///                      base:   Object::PosX (c), Object::SetX (a)
/// ObjectA ("Sprite")   ObjectA: Collision, IsAnimating (c), SetAnimation (a)
/// ObjectB ("Text")     ObjectB: IsEmpty (c), SetText (a)
/// Physics              Physics::Body: IsSleeping, InternalStep (c, private), ApplyForce (a)
/// ```
pub fn sample_platform() -> Platform {
    let builtin = Extension {
        full_name: "Common".to_string(),
        conditions: vec![metadata("Free::DoSomething", &[])],
        actions: vec![grouped_metadata("Free::Wait", "Timers", &["expression"])],
        objects: vec![ObjectType {
            type_name: String::new(),
            conditions: vec![grouped_metadata(
                "Object::PosX",
                "Position",
                &["object", "relationalOperator", "expression"],
            )],
            actions: vec![grouped_metadata(
                "Object::SetX",
                "Position",
                &["object", "operator", "expression"],
            )],
        }],
        ..Extension::new("Builtin")
    };

    let object_a = Extension {
        full_name: "Sprite".to_string(),
        objects: vec![ObjectType {
            type_name: "ObjectA".to_string(),
            conditions: vec![
                grouped_metadata("ObjectA::Collision", "Collisions", &["object", "objectList"]),
                grouped_metadata("ObjectA::IsAnimating", "Animations", &["object"]),
            ],
            actions: vec![grouped_metadata(
                "ObjectA::SetAnimation",
                "Animations",
                &["object", "expression"],
            )],
        }],
        ..Extension::new("ObjectA")
    };

    let object_b = Extension {
        full_name: "Text".to_string(),
        objects: vec![ObjectType {
            type_name: "ObjectB".to_string(),
            conditions: vec![metadata("ObjectB::IsEmpty", &["object"])],
            actions: vec![metadata("ObjectB::SetText", &["object", "string"])],
        }],
        ..Extension::new("ObjectB")
    };

    let mut internal_step = metadata("Physics::InternalStep", &["object", "behavior"]);
    internal_step.private = true;
    let physics = Extension {
        behaviors: vec![BehaviorType {
            type_name: "Physics::Body".to_string(),
            conditions: vec![
                metadata("Physics::IsSleeping", &["object", "behavior"]),
                internal_step,
            ],
            actions: vec![metadata(
                "Physics::ApplyForce",
                &["object", "behavior", "expression"],
            )],
        }],
        ..Extension::new("Physics")
    };

    Platform {
        extensions: vec![builtin, object_a, object_b, physics],
    }
}

/// Deterministic project: global `Hud` (ObjectB), and layout `Level1` with
/// `Player` (ObjectA + Physics::Body), `Enemy` (ObjectB) and the group
/// `Characters` of both.
pub fn sample_project() -> Project {
    Project {
        objects: ObjectsContainer {
            objects: vec![object("Hud", "ObjectB", &[])],
            groups: Vec::new(),
        },
        layouts: vec![Layout {
            name: "Level1".to_string(),
            objects: ObjectsContainer {
                objects: vec![
                    object("Player", "ObjectA", &[("Body", "Physics::Body")]),
                    object("Enemy", "ObjectB", &[]),
                ],
                groups: vec![ObjectGroup {
                    name: "Characters".to_string(),
                    objects: vec!["Player".to_string(), "Enemy".to_string()],
                }],
            },
        }],
    }
}

/// Temporary directory holding `selector.toml`, `catalog.json` and
/// `project.json` built from the sample fixtures.
pub struct FixtureDir {
    dir: TempDir,
    pub config_path: PathBuf,
}

impl FixtureDir {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create fixture dir")?;
        let config = SelectorConfig::default();
        let config_path = dir.path().join("selector.toml");
        write_config(&config_path, &config)?;
        write_platform(&dir.path().join(&config.catalog_path), &sample_platform())?;
        write_project(&dir.path().join(&config.project_path), &sample_project())?;
        Ok(Self { dir, config_path })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the fixture root and return its path.
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}
