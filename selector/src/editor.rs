//! Selection state machine of an instruction editor.
//!
//! The editor offers free instructions until an object is chosen, then the
//! instructions of that object. [`InstructionSelector`] tracks that choice and
//! keeps the candidate list and its display tree consistent with the
//! instruction's declared type:
//!
//! - Reopening a persisted object instruction selects its object again, and
//!   keeps its type even if the object no longer offers it.
//! - Choosing another object clears a type the new object does not offer.
//!
//! Every transition replaces the [`SelectionState`] wholesale and writes the
//! instruction type before recomputing candidates.

use tracing::{debug, info, warn};

use crate::catalog::InstructionCatalog;
use crate::core::instruction::InstructionHandle;
use crate::core::lookup::{LeadingObjectParameter, ObjectParameterResolver, find_instruction};
use crate::core::scope::{EventsScope, ScopeFilter, VisibilityFilter};
use crate::core::selection::{ObjectSelection, SelectionState};
use crate::core::tree::{GroupTreeBuilder, TreeBuilder};
use crate::core::types::{InstructionMetadata, InstructionMode};

static DEFAULT_SCOPE_FILTER: VisibilityFilter = VisibilityFilter;
static DEFAULT_TREE_BUILDER: GroupTreeBuilder = GroupTreeBuilder::new('/');
static DEFAULT_PARAMETER_RESOLVER: LeadingObjectParameter = LeadingObjectParameter;

/// External services the selector derives its candidates from.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub catalog: &'a dyn InstructionCatalog,
    pub scope_filter: &'a dyn ScopeFilter,
    pub tree_builder: &'a dyn TreeBuilder,
    pub parameter_resolver: &'a dyn ObjectParameterResolver,
}

impl<'a> Collaborators<'a> {
    /// Use `catalog` with the default filter, tree builder and resolver.
    pub fn new(catalog: &'a dyn InstructionCatalog) -> Self {
        Self {
            catalog,
            scope_filter: &DEFAULT_SCOPE_FILTER,
            tree_builder: &DEFAULT_TREE_BUILDER,
            parameter_resolver: &DEFAULT_PARAMETER_RESOLVER,
        }
    }

    pub fn with_scope_filter(mut self, scope_filter: &'a dyn ScopeFilter) -> Self {
        self.scope_filter = scope_filter;
        self
    }

    pub fn with_tree_builder(mut self, tree_builder: &'a dyn TreeBuilder) -> Self {
        self.tree_builder = tree_builder;
        self
    }

    pub fn with_parameter_resolver(
        mut self,
        parameter_resolver: &'a dyn ObjectParameterResolver,
    ) -> Self {
        self.parameter_resolver = parameter_resolver;
        self
    }
}

/// Result of a transition: the (possibly updated) instruction and the new state.
#[derive(Debug)]
pub struct Transition<'i, I: ?Sized> {
    pub instruction: &'i mut I,
    pub state: SelectionState,
}

pub struct InstructionSelector<'a> {
    collaborators: Collaborators<'a>,
    mode: InstructionMode,
    scope: EventsScope,
    state: SelectionState,
}

impl<'a> InstructionSelector<'a> {
    /// Build the selector for `instruction`.
    ///
    /// A new instruction starts free. An existing object or behavior
    /// instruction reselects the object named by its object parameter; its
    /// type is left untouched.
    pub fn new<I: InstructionHandle + ?Sized>(
        instruction: &I,
        mode: InstructionMode,
        is_new: bool,
        scope: EventsScope,
        collaborators: Collaborators<'a>,
    ) -> Self {
        let mut selector = Self {
            collaborators,
            mode,
            scope,
            state: SelectionState::Free,
        };
        if !is_new {
            selector.state = selector.initial_state(instruction);
        }
        debug!(
            %mode,
            is_new,
            object = ?selector.state.chosen_object_name(),
            "instruction selector initialized"
        );
        selector
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Metadata of the instruction's current type, if the catalog knows it.
    pub fn selected_metadata<I: InstructionHandle + ?Sized>(
        &self,
        instruction: &I,
    ) -> Option<InstructionMetadata> {
        self.collaborators
            .catalog
            .metadata(self.mode, instruction.instruction_type())
    }

    /// Pick a free instruction: the object choice, if any, is dropped.
    pub fn choose_free_instruction<'i, I: InstructionHandle + ?Sized>(
        &mut self,
        instruction: &'i mut I,
        type_id: &str,
    ) -> Transition<'i, I> {
        instruction.set_instruction_type(type_id);
        self.state = SelectionState::Free;
        debug!(type_id, "free instruction chosen");
        Transition {
            instruction,
            state: self.state.clone(),
        }
    }

    /// Pick (or switch to) an object. A type the object does not offer is cleared.
    pub fn choose_object<'i, I: InstructionHandle + ?Sized>(
        &mut self,
        instruction: &'i mut I,
        object_name: &str,
    ) -> Transition<'i, I> {
        self.state = self.chosen_object_state(instruction, object_name);
        debug!(object = object_name, "object chosen");
        Transition {
            instruction,
            state: self.state.clone(),
        }
    }

    /// Pick an instruction of the chosen object and refresh its candidates.
    ///
    /// Without a chosen object (or with an empty object name) only the type is
    /// written and the state is returned unchanged.
    pub fn choose_object_instruction<'i, I: InstructionHandle + ?Sized>(
        &mut self,
        instruction: &'i mut I,
        type_id: &str,
    ) -> Transition<'i, I> {
        instruction.set_instruction_type(type_id);
        let object_name = self
            .state
            .chosen_object_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        match object_name {
            Some(object_name) => {
                self.state = self.chosen_object_state(instruction, &object_name);
                debug!(object = %object_name, type_id, "object instruction chosen");
            }
            None => {
                warn!(type_id, "object instruction chosen without an object");
            }
        }
        Transition {
            instruction,
            state: self.state.clone(),
        }
    }

    fn initial_state<I: InstructionHandle + ?Sized>(&self, instruction: &I) -> SelectionState {
        let all = self.collaborators.catalog.enumerate(self.mode);
        let type_id = instruction.instruction_type();
        let Some(enumerated) = find_instruction(&all, type_id) else {
            debug!(type_id, "instruction type not enumerated, starting free");
            return SelectionState::Free;
        };
        if enumerated.scope.is_free() {
            return SelectionState::Free;
        }

        let Some(index) = self
            .collaborators
            .parameter_resolver
            .object_parameter_index(&enumerated.metadata)
        else {
            warn!(type_id, "object instruction without object parameter, starting free");
            return SelectionState::Free;
        };

        SelectionState::Object(self.object_selection(instruction.parameter(index)))
    }

    fn chosen_object_state<I: InstructionHandle + ?Sized>(
        &self,
        instruction: &mut I,
        object_name: &str,
    ) -> SelectionState {
        let selection = self.object_selection(object_name);
        let type_id = instruction.instruction_type();
        if !type_id.is_empty() && find_instruction(&selection.instructions, type_id).is_none() {
            info!(
                type_id,
                object = object_name,
                "instruction not available for object, clearing type"
            );
            instruction.set_instruction_type("");
        }
        SelectionState::Object(selection)
    }

    fn object_selection(&self, object_name: &str) -> ObjectSelection {
        let candidates = self
            .collaborators
            .catalog
            .enumerate_for_object(self.mode, object_name);
        let instructions = self.collaborators.scope_filter.filter(candidates, &self.scope);
        let tree = self.collaborators.tree_builder.build(&instructions);
        ObjectSelection {
            object_name: object_name.to_string(),
            instructions,
            tree,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProjectCatalog;
    use crate::core::instruction::Instruction;
    use crate::core::selection::SelectionPhase;
    use crate::core::tree::{InstructionTree, TreeNode};
    use crate::core::types::EnumeratedInstruction;
    use crate::test_support::{sample_platform, sample_project};

    #[test]
    fn choose_object_instruction_refreshes_object_state() {
        let platform = sample_platform();
        let project = sample_project();
        let layout = project.layout("Level1").expect("layout");
        let catalog = ProjectCatalog::new(&platform, &project.objects, &layout.objects);
        let mut instruction = Instruction::default();
        let mut selector = InstructionSelector::new(
            &instruction,
            InstructionMode::Condition,
            true,
            EventsScope::layout("Level1"),
            Collaborators::new(&catalog),
        );

        let chosen = selector.choose_object(&mut instruction, "Player").state;
        assert_eq!(chosen.phase(""), SelectionPhase::ChoosingObject);

        let transition = selector.choose_object_instruction(&mut instruction, "ObjectA::Collision");
        assert_eq!(transition.instruction.type_id, "ObjectA::Collision");
        assert_eq!(transition.state, chosen);
        assert_eq!(
            transition.state.phase(&transition.instruction.type_id),
            SelectionPhase::ObjectInstructionChosen
        );
    }

    #[test]
    fn selected_metadata_follows_instruction_type() {
        let platform = sample_platform();
        let project = sample_project();
        let catalog = ProjectCatalog::new(&platform, &project.objects, &project.objects);
        let instruction = Instruction::new("Free::Wait", &["1"]);
        let selector = InstructionSelector::new(
            &instruction,
            InstructionMode::Action,
            false,
            EventsScope::default(),
            Collaborators::new(&catalog),
        );

        let metadata = selector.selected_metadata(&instruction).expect("metadata");
        assert_eq!(metadata.type_id, "Free::Wait");
        assert!(selector.selected_metadata(&Instruction::default()).is_none());
    }

    #[test]
    fn object_instruction_without_object_parameter_starts_free() {
        let mut platform = sample_platform();
        platform.extensions[1].objects[0].conditions[1].parameters.clear();
        let project = sample_project();
        let layout = project.layout("Level1").expect("layout");
        let catalog = ProjectCatalog::new(&platform, &project.objects, &layout.objects);
        let instruction = Instruction::new("ObjectA::IsAnimating", &["Player"]);

        let selector = InstructionSelector::new(
            &instruction,
            InstructionMode::Condition,
            false,
            EventsScope::default(),
            Collaborators::new(&catalog),
        );
        assert!(selector.state().is_free());
    }

    /// Puts every candidate at the root, keyed by type.
    struct FlatTreeBuilder;

    impl TreeBuilder for FlatTreeBuilder {
        fn build(&self, instructions: &[EnumeratedInstruction]) -> InstructionTree {
            InstructionTree {
                children: instructions
                    .iter()
                    .map(|instruction| TreeNode::Instruction {
                        name: instruction.type_id.clone(),
                        instruction: instruction.clone(),
                    })
                    .collect(),
            }
        }
    }

    /// Drops one instruction type from every list.
    struct WithoutType(&'static str);

    impl ScopeFilter for WithoutType {
        fn filter(
            &self,
            instructions: Vec<EnumeratedInstruction>,
            _scope: &EventsScope,
        ) -> Vec<EnumeratedInstruction> {
            instructions
                .into_iter()
                .filter(|instruction| instruction.type_id != self.0)
                .collect()
        }
    }

    /// Always designates the same parameter as the object.
    struct FixedParameter(usize);

    impl ObjectParameterResolver for FixedParameter {
        fn object_parameter_index(&self, _metadata: &InstructionMetadata) -> Option<usize> {
            Some(self.0)
        }
    }

    #[test]
    fn custom_tree_builder_is_used() {
        let platform = sample_platform();
        let project = sample_project();
        let layout = project.layout("Level1").expect("layout");
        let catalog = ProjectCatalog::new(&platform, &project.objects, &layout.objects);
        let mut instruction = Instruction::default();
        let mut selector = InstructionSelector::new(
            &instruction,
            InstructionMode::Condition,
            true,
            EventsScope::default(),
            Collaborators::new(&catalog).with_tree_builder(&FlatTreeBuilder),
        );

        let state = selector.choose_object(&mut instruction, "Player").state;
        let tree = state.chosen_object_instructions_tree().expect("tree");
        assert_eq!(
            tree.path_to("ObjectA::Collision"),
            Some(vec!["ObjectA::Collision".to_string()])
        );
        assert_eq!(
            tree.instruction_count(),
            state.chosen_object_instructions().map_or(0, <[_]>::len)
        );
    }

    #[test]
    fn custom_scope_filter_decides_what_an_object_offers() {
        let platform = sample_platform();
        let project = sample_project();
        let layout = project.layout("Level1").expect("layout");
        let catalog = ProjectCatalog::new(&platform, &project.objects, &layout.objects);
        let filter = WithoutType("ObjectA::Collision");
        let mut instruction = Instruction::new("ObjectA::Collision", &["Player"]);
        let mut selector = InstructionSelector::new(
            &instruction,
            InstructionMode::Condition,
            false,
            EventsScope::layout("Level1"),
            Collaborators::new(&catalog).with_scope_filter(&filter),
        );
        assert_eq!(instruction.type_id, "ObjectA::Collision");

        let transition = selector.choose_object(&mut instruction, "Player");
        assert_eq!(transition.instruction.type_id, "");
        let offered = transition.state.chosen_object_instructions().expect("list");
        assert!(!offered.is_empty());
        assert!(offered.iter().all(|i| i.type_id != "ObjectA::Collision"));
    }

    #[test]
    fn custom_parameter_resolver_picks_the_object_parameter() {
        let platform = sample_platform();
        let project = sample_project();
        let layout = project.layout("Level1").expect("layout");
        let catalog = ProjectCatalog::new(&platform, &project.objects, &layout.objects);
        let resolver = FixedParameter(1);
        let instruction = Instruction::new("ObjectA::Collision", &["Player", "Enemy"]);

        let selector = InstructionSelector::new(
            &instruction,
            InstructionMode::Condition,
            false,
            EventsScope::layout("Level1"),
            Collaborators::new(&catalog).with_parameter_resolver(&resolver),
        );
        assert_eq!(selector.state().chosen_object_name(), Some("Enemy"));
    }

    #[test]
    fn empty_object_name_keeps_chosen_object_instruction() {
        let platform = sample_platform();
        let project = sample_project();
        let layout = project.layout("Level1").expect("layout");
        let catalog = ProjectCatalog::new(&platform, &project.objects, &layout.objects);
        let mut instruction = Instruction::new("ObjectA::Collision", &[]);
        let mut selector = InstructionSelector::new(
            &instruction,
            InstructionMode::Condition,
            false,
            EventsScope::layout("Level1"),
            Collaborators::new(&catalog),
        );
        let initial = selector.state().clone();
        assert_eq!(initial.chosen_object_name(), Some(""));

        let transition = selector.choose_object_instruction(&mut instruction, "ObjectA::IsAnimating");
        assert_eq!(transition.instruction.type_id, "ObjectA::IsAnimating");
        assert_eq!(transition.state, initial);
    }
}
