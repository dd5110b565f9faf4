//! Parent/child hierarchy with bidirectional indices.
//!
//! Maintains two mappings for O(1) traversal in either direction:
//! - Forward: parent -> set of children
//! - Reverse: child -> parent
//!
//! The two indices always agree; every mutation updates both sides.

use std::collections::{HashMap, HashSet};

use tessera_foundation::EntityId;

/// Stores parent/child edges between entities.
///
/// An entity has at most one parent at a time; attaching a child that
/// already has a parent replaces the old edge.
#[derive(Clone, Debug, Default)]
pub struct HierarchyStore {
    /// Forward index: parent -> set of children.
    children: HashMap<EntityId, HashSet<EntityId>>,
    /// Reverse index: child -> parent.
    parents: HashMap<EntityId, EntityId>,
}

impl HierarchyStore {
    /// Creates a new empty hierarchy store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `child` a child of `parent`.
    ///
    /// Any existing parent edge for `child` is detached first, so the
    /// at-most-one-parent invariant holds across re-parenting.
    pub fn attach(&mut self, child: EntityId, parent: EntityId) {
        self.detach(child);
        self.children.entry(parent).or_default().insert(child);
        self.parents.insert(child, parent);
    }

    /// Removes the parent edge for `child`, if any. Idempotent.
    pub fn detach(&mut self, child: EntityId) {
        if let Some(parent) = self.parents.remove(&child) {
            if let Some(set) = self.children.get_mut(&parent) {
                set.remove(&child);
                if set.is_empty() {
                    self.children.remove(&parent);
                }
            }
        }
    }

    /// Gets the parent of `child`.
    ///
    /// Returns `None` for roots and for ids with no hierarchy state.
    #[must_use]
    pub fn parent(&self, child: EntityId) -> Option<EntityId> {
        self.parents.get(&child).copied()
    }

    /// Iterates the direct children of `parent`.
    ///
    /// Empty for entities without children and for unknown ids.
    pub fn children(&self, parent: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.children
            .get(&parent)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Checks if a specific parent -> child edge exists.
    #[must_use]
    pub fn has_edge(&self, parent: EntityId, child: EntityId) -> bool {
        self.children
            .get(&parent)
            .is_some_and(|set| set.contains(&child))
    }

    /// Clears all edges touching `entity`.
    ///
    /// Detaches it from its parent and returns its direct children with
    /// their reverse edges already removed; the caller decides their fate
    /// (the store cascades removal to them).
    pub fn on_entity_destroyed(&mut self, entity: EntityId) -> Vec<EntityId> {
        self.detach(entity);

        let victims: Vec<EntityId> = self
            .children
            .remove(&entity)
            .map(|set| set.into_iter().collect())
            .unwrap_or_default();
        for child in &victims {
            self.parents.remove(child);
        }
        victims
    }

    /// Drops every edge.
    pub fn clear(&mut self) {
        self.children.clear();
        self.parents.clear();
    }
}
