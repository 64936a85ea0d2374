//! Replay of scripted editing sessions against the selection state machine.
//!
//! A session script describes the instruction being edited and the choices a
//! user makes, in order. Replaying it records the instruction type and the
//! selection state after every choice, which makes editor behavior easy to
//! inspect from the command line and to pin down in tests.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::ProjectCatalog;
use crate::core::instruction::{Instruction, InstructionHandle};
use crate::core::scope::EventsScope;
use crate::core::selection::{SelectionPhase, SelectionState};
use crate::core::tree::TreeBuilder;
use crate::core::types::InstructionMode;
use crate::editor::{Collaborators, InstructionSelector};
use crate::platform::Platform;
use crate::project::{ObjectsContainer, Project};

/// Scripted editing session (TOML).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionScript {
    pub mode: InstructionMode,
    /// Layout whose objects are visible. Only global objects when unset.
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub scope: EventsScope,
    #[serde(default)]
    pub instruction: Instruction,
    #[serde(default)]
    pub steps: Vec<SessionStep>,
}

/// One user choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionStep {
    ChooseFreeInstruction {
        #[serde(rename = "type")]
        type_id: String,
    },
    ChooseObject {
        object: String,
    },
    ChooseObjectInstruction {
        #[serde(rename = "type")]
        type_id: String,
    },
}

/// Instruction type and selection after a step (`step` is `None` for the
/// initial state).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    pub step: Option<SessionStep>,
    pub instruction_type: String,
    pub phase: SelectionPhase,
    pub state: SelectionState,
}

impl SessionRecord {
    fn new(step: Option<SessionStep>, instruction: &Instruction, state: &SelectionState) -> Self {
        let instruction_type = instruction.instruction_type().to_string();
        Self {
            step,
            phase: state.phase(&instruction_type),
            instruction_type,
            state: state.clone(),
        }
    }
}

pub fn load_session(path: &Path) -> Result<SessionScript> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read session {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parse session {}", path.display()))
}

/// Replay `script` and return the initial record followed by one record per step.
pub fn replay_session(
    platform: &Platform,
    project: &Project,
    script: &SessionScript,
    tree_builder: &dyn TreeBuilder,
) -> Result<Vec<SessionRecord>> {
    let layout_objects = layout_objects(project, script.layout.as_deref())?;
    let catalog = ProjectCatalog::new(platform, &project.objects, layout_objects);
    let collaborators = Collaborators::new(&catalog).with_tree_builder(tree_builder);

    let mut scope = script.scope.clone();
    if scope.layout.is_none() {
        scope.layout = script.layout.clone();
    }

    let mut instruction = script.instruction.clone();
    let mut selector = InstructionSelector::new(
        &instruction,
        script.mode,
        script.is_new,
        scope,
        collaborators,
    );

    let mut records = vec![SessionRecord::new(None, &instruction, selector.state())];
    for step in &script.steps {
        let transition = match step {
            SessionStep::ChooseFreeInstruction { type_id } => {
                selector.choose_free_instruction(&mut instruction, type_id)
            }
            SessionStep::ChooseObject { object } => selector.choose_object(&mut instruction, object),
            SessionStep::ChooseObjectInstruction { type_id } => {
                selector.choose_object_instruction(&mut instruction, type_id)
            }
        };
        records.push(SessionRecord::new(
            Some(step.clone()),
            transition.instruction,
            &transition.state,
        ));
    }
    debug!(steps = script.steps.len(), "session replayed");
    Ok(records)
}

fn layout_objects<'a>(project: &'a Project, layout: Option<&str>) -> Result<&'a ObjectsContainer> {
    match layout {
        Some(name) => project
            .layout(name)
            .map(|layout| &layout.objects)
            .ok_or_else(|| anyhow!("layout '{name}' not found in project")),
        None => Ok(&project.objects),
    }
}
