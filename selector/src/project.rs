//! Objects of a project: the global container and one container per layout.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorInstance {
    pub name: String,
    #[serde(rename = "type")]
    pub behavior_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(default)]
    pub behaviors: Vec<BehaviorInstance>,
}

/// Named set of objects, usable wherever an object name is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectGroup {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectsContainer {
    #[serde(default)]
    pub objects: Vec<ObjectDefinition>,
    #[serde(default)]
    pub groups: Vec<ObjectGroup>,
}

impl ObjectsContainer {
    pub fn object(&self, name: &str) -> Option<&ObjectDefinition> {
        self.objects.iter().find(|object| object.name == name)
    }

    pub fn group(&self, name: &str) -> Option<&ObjectGroup> {
        self.groups.iter().find(|group| group.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    #[serde(default)]
    pub objects: ObjectsContainer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Global objects, visible from every layout.
    #[serde(default)]
    pub objects: ObjectsContainer,
    #[serde(default)]
    pub layouts: Vec<Layout>,
}

impl Project {
    pub fn layout(&self, name: &str) -> Option<&Layout> {
        self.layouts.iter().find(|layout| layout.name == name)
    }
}

/// Type and behavior types an object name stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedObject {
    /// Empty for the base object (mixed or empty groups).
    pub object_type: String,
    /// Distinct behavior types, in declaration order.
    pub behavior_types: Vec<String>,
}

impl ResolvedObject {
    fn of(object: &ObjectDefinition) -> Self {
        let mut behavior_types: Vec<String> = Vec::new();
        for behavior in &object.behaviors {
            if !behavior_types.contains(&behavior.behavior_type) {
                behavior_types.push(behavior.behavior_type.clone());
            }
        }
        Self {
            object_type: object.object_type.clone(),
            behavior_types,
        }
    }
}

/// Resolve `name` against the layout container first, then the global one.
///
/// Objects take precedence over groups. A group resolves to the type shared
/// by all of its members (or the base type) and to the behavior types every
/// member carries. Unknown members are skipped; unknown names give `None`.
pub fn resolve_object(
    global: &ObjectsContainer,
    layout: &ObjectsContainer,
    name: &str,
) -> Option<ResolvedObject> {
    if let Some(object) = find_object(global, layout, name) {
        return Some(ResolvedObject::of(object));
    }

    let group = layout.group(name).or_else(|| global.group(name))?;
    let members: Vec<ResolvedObject> = group
        .objects
        .iter()
        .filter_map(|member| find_object(global, layout, member))
        .map(ResolvedObject::of)
        .collect();

    let Some((first, rest)) = members.split_first() else {
        return Some(ResolvedObject {
            object_type: String::new(),
            behavior_types: Vec::new(),
        });
    };

    let object_type = if rest
        .iter()
        .all(|member| member.object_type == first.object_type)
    {
        first.object_type.clone()
    } else {
        String::new()
    };
    let behavior_types = first
        .behavior_types
        .iter()
        .filter(|behavior| {
            rest.iter()
                .all(|member| member.behavior_types.contains(behavior))
        })
        .cloned()
        .collect();

    Some(ResolvedObject {
        object_type,
        behavior_types,
    })
}

fn find_object<'a>(
    global: &'a ObjectsContainer,
    layout: &'a ObjectsContainer,
    name: &str,
) -> Option<&'a ObjectDefinition> {
    layout.object(name).or_else(|| global.object(name))
}
