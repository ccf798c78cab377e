use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use constants::meshes::{BLOCKED_MESH_NAMES, COMPANION_SUFFIX, UNNAMED_MESH};

/// Name lookup over the meshes of the loaded model.
///
/// Blocked names and names missing from the scene are indistinguishable to
/// callers of [`MeshIndex::lookup`]: both are simply "not present".
#[derive(Resource, Debug)]
pub struct MeshIndex {
    root: Option<Entity>,
    by_name: HashMap<String, Entity>,
    names: HashMap<Entity, String>,
    ordered: Vec<String>,
    blocked: HashSet<&'static str>,
}

impl Default for MeshIndex {
    fn default() -> Self {
        Self {
            root: None,
            by_name: HashMap::new(),
            names: HashMap::new(),
            ordered: Vec::new(),
            blocked: BLOCKED_MESH_NAMES.iter().copied().collect(),
        }
    }
}

impl MeshIndex {
    /// Start a fresh index for a newly loaded scene root.
    pub fn reset(&mut self, root: Entity) {
        self.root = Some(root);
        self.by_name.clear();
        self.names.clear();
        self.ordered.clear();
    }

    /// Register a mesh. The first entity seen for a name wins lookups.
    pub fn insert(&mut self, name: Option<&str>, entity: Entity) {
        let name = name.filter(|n| !n.is_empty()).unwrap_or(UNNAMED_MESH);
        self.by_name.entry(name.to_string()).or_insert(entity);
        self.names.insert(entity, name.to_string());
        self.ordered.push(name.to_string());
    }

    pub fn root(&self) -> Option<Entity> {
        self.root
    }

    pub fn is_ready(&self) -> bool {
        self.root.is_some()
    }

    pub fn is_blocked(&self, name: &str) -> bool {
        self.blocked.contains(name)
    }

    /// Entity for an unblocked mesh name present in the scene.
    pub fn lookup(&self, name: &str) -> Option<Entity> {
        if self.is_blocked(name) {
            return None;
        }
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, entity: Entity) -> Option<&str> {
        self.names.get(&entity).map(String::as_str)
    }

    /// Every mesh name in traversal order, duplicates included.
    pub fn names(&self) -> &[String] {
        &self.ordered
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.names.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &str)> + '_ {
        self.names
            .iter()
            .map(|(&entity, name)| (entity, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

/// Companion of a mesh: `X` pairs with `X_1` and `X_1` pairs back with `X`.
pub fn companion_name(name: &str) -> String {
    match name.strip_suffix(COMPANION_SUFFIX) {
        Some(base) => base.to_string(),
        None => format!("{name}{COMPANION_SUFFIX}"),
    }
}

/// Metadata key of a mesh: the companion suffix is stripped.
pub fn base_mesh_name(name: &str) -> &str {
    name.strip_suffix(COMPANION_SUFFIX).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(names: &[&str]) -> (MeshIndex, Vec<Entity>) {
        let mut world = World::new();
        let mut index = MeshIndex::default();
        index.reset(world.spawn_empty().id());
        let entities: Vec<Entity> = names
            .iter()
            .map(|&name| {
                let entity = world.spawn_empty().id();
                index.insert(Some(name), entity);
                entity
            })
            .collect();
        (index, entities)
    }

    #[test]
    fn companion_name_is_bidirectional() {
        assert_eq!(companion_name("Foo"), "Foo_1");
        assert_eq!(companion_name("Foo_1"), "Foo");
        assert_eq!(companion_name("Foo_2"), "Foo_2_1");
    }

    #[test]
    fn base_name_strips_only_companion_suffix() {
        assert_eq!(base_mesh_name("Plane100_1"), "Plane100");
        assert_eq!(base_mesh_name("Plane100"), "Plane100");
        assert_eq!(base_mesh_name("Plane100_2"), "Plane100_2");
    }

    #[test]
    fn blocked_and_missing_names_are_not_present() {
        let (index, entities) = index_with(&["Plane100", "SKY_Ground001"]);
        assert_eq!(index.lookup("Plane100"), Some(entities[0]));
        assert_eq!(index.lookup("SKY_Ground001"), None);
        assert_eq!(index.lookup("Plane999"), None);
        assert!(index.is_blocked("Material21134_57"));
    }

    #[test]
    fn first_entity_wins_and_unnamed_meshes_get_placeholder() {
        let mut world = World::new();
        let mut index = MeshIndex::default();
        index.reset(world.spawn_empty().id());
        let first = world.spawn_empty().id();
        let second = world.spawn_empty().id();
        let unnamed = world.spawn_empty().id();
        index.insert(Some("Dup"), first);
        index.insert(Some("Dup"), second);
        index.insert(None, unnamed);

        assert_eq!(index.lookup("Dup"), Some(first));
        assert_eq!(index.name_of(second), Some("Dup"));
        assert_eq!(index.name_of(unnamed), Some(UNNAMED_MESH));
        assert_eq!(index.names().len(), 3);
    }
}
