//! Editing scope and the visibility filter applied to candidate lists.

use serde::{Deserialize, Serialize};

use crate::core::types::{EnumeratedInstruction, InstructionScope};

/// Where the edited events live.
///
/// All fields are optional: events of a plain layout only set `layout`, events
/// of an extension function set `extension` and `function`, and so on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsScope {
    pub layout: Option<String>,
    /// Extension whose functions are being edited.
    pub extension: Option<String>,
    pub function: Option<String>,
    /// Type of the events-based behavior being edited.
    pub behavior: Option<String>,
    /// Type of the events-based object being edited.
    pub object: Option<String>,
}

impl EventsScope {
    pub fn layout(name: impl Into<String>) -> Self {
        Self {
            layout: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Narrows a candidate list to the instructions visible in a scope.
///
/// Implementations must preserve order and only remove entries.
pub trait ScopeFilter {
    fn filter(
        &self,
        instructions: Vec<EnumeratedInstruction>,
        scope: &EventsScope,
    ) -> Vec<EnumeratedInstruction>;
}

/// Hides private instructions outside of the extension (or the events-based
/// behavior/object) that declares them.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityFilter;

impl VisibilityFilter {
    pub fn is_visible(instruction: &EnumeratedInstruction, scope: &EventsScope) -> bool {
        if !instruction.is_private {
            return true;
        }
        if scope.extension.as_deref() == Some(instruction.extension.as_str()) {
            return true;
        }
        match &instruction.scope {
            InstructionScope::Behavior { behavior_type } => {
                scope.behavior.as_deref() == Some(behavior_type.as_str())
            }
            InstructionScope::Object { object_type } => {
                scope.object.as_deref() == Some(object_type.as_str())
            }
            InstructionScope::Free => false,
        }
    }
}

impl ScopeFilter for VisibilityFilter {
    fn filter(
        &self,
        mut instructions: Vec<EnumeratedInstruction>,
        scope: &EventsScope,
    ) -> Vec<EnumeratedInstruction> {
        instructions.retain(|instruction| Self::is_visible(instruction, scope));
        instructions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{behavior_descriptor, free_descriptor, object_descriptor};

    fn private(mut instruction: EnumeratedInstruction) -> EnumeratedInstruction {
        instruction.is_private = true;
        instruction.metadata.private = true;
        instruction
    }

    #[test]
    fn public_instructions_are_always_visible() {
        let list = vec![
            free_descriptor("Free::Wait"),
            object_descriptor("ObjectA::Collision", "ObjectA"),
        ];
        let filtered = VisibilityFilter.filter(list.clone(), &EventsScope::layout("Level1"));
        assert_eq!(filtered, list);
    }

    #[test]
    fn private_instructions_need_their_extension_in_scope() {
        let hidden = private(free_descriptor("Physics::InternalStep"));
        let list = vec![free_descriptor("Free::Wait"), hidden.clone()];

        let outside = VisibilityFilter.filter(list.clone(), &EventsScope::layout("Level1"));
        assert_eq!(outside, vec![free_descriptor("Free::Wait")]);

        let scope = EventsScope {
            extension: Some(hidden.extension.clone()),
            function: Some("DoStep".to_string()),
            ..EventsScope::default()
        };
        let inside = VisibilityFilter.filter(list.clone(), &scope);
        assert_eq!(inside, list);
    }

    #[test]
    fn private_behavior_instructions_visible_inside_their_behavior() {
        let list = vec![private(behavior_descriptor(
            "Physics::IsSleeping",
            "Physics::Body",
        ))];
        let scope = EventsScope {
            behavior: Some("Physics::Body".to_string()),
            ..EventsScope::default()
        };
        assert_eq!(VisibilityFilter.filter(list.clone(), &scope).len(), 1);

        let other = EventsScope {
            behavior: Some("Platformer::Character".to_string()),
            ..EventsScope::default()
        };
        assert!(VisibilityFilter.filter(list, &other).is_empty());
    }

    #[test]
    fn filter_preserves_order() {
        let list = vec![
            free_descriptor("Free::C"),
            private(free_descriptor("Free::Hidden")),
            free_descriptor("Free::A"),
            free_descriptor("Free::B"),
        ];
        let types: Vec<String> = VisibilityFilter
            .filter(list, &EventsScope::default())
            .into_iter()
            .map(|instruction| instruction.type_id)
            .collect();
        assert_eq!(types, vec!["Free::C", "Free::A", "Free::B"]);
    }
}
