//! The entity-component store.
//!
//! The `Store` is the unified interface to all storage subsystems: the
//! entity registry, the type-indexed component tables, the hierarchy index,
//! and the deferred-removal buffers. It owns all entity and component data;
//! handles returned from it are transient, non-owning views.

use std::collections::HashMap;

use tessera_foundation::{EntityId, Error, Result};

use crate::bundle::{Bundle, ComponentSet};
use crate::component::{Component, ComponentKey, ComponentStore, TypeSet};
use crate::handle::{EntityMut, EntityRef};
use crate::hierarchy::HierarchyStore;
use crate::removal::RemovalBuffer;

/// In-memory entity-component store with hierarchy and deferred removal.
///
/// All operations are synchronous calls against shared mutable state; the
/// store has no internal synchronization. Callers that share a store across
/// threads must wrap it in a lock.
///
/// Query results are sorted by entity id so iteration order is deterministic
/// for a fixed store state.
#[derive(Debug, Default)]
pub struct Store {
    /// Authoritative existence record: entity -> set of attached type keys.
    registry: HashMap<EntityId, TypeSet>,
    /// Component data, indexed by type and then by entity.
    components: ComponentStore,
    /// Parent/child edges.
    hierarchy: HierarchyStore,
    /// Buffered removals awaiting [`Store::apply_removals`].
    removals: RemovalBuffer,
}

impl Store {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Spawning ---

    /// Spawns a new entity with the components of `bundle`, returning its id.
    pub fn spawn<B: Bundle>(&mut self, bundle: B) -> EntityId {
        let entity = EntityId::random();
        self.register(entity, bundle);
        entity
    }

    /// Spawns a new entity with a single component.
    pub fn spawn_one<C: Component>(&mut self, component: C) -> EntityId {
        self.spawn((component,))
    }

    /// Spawns a new entity with no components.
    pub fn spawn_empty(&mut self) -> EntityId {
        self.spawn(())
    }

    /// Spawns an entity with a caller-chosen id.
    ///
    /// # Errors
    ///
    /// Returns `IdInUse` if the id is already registered.
    pub fn spawn_with_id<B: Bundle>(&mut self, entity: EntityId, bundle: B) -> Result<EntityId> {
        if self.registry.contains_key(&entity) {
            return Err(Error::id_in_use(entity));
        }
        self.register(entity, bundle);
        Ok(entity)
    }

    /// Spawns a new entity as a child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if the parent is not registered.
    pub fn spawn_child<B: Bundle>(&mut self, parent: EntityId, bundle: B) -> Result<EntityId> {
        self.validate(parent)?;
        Ok(self.spawn_attached(parent, bundle))
    }

    /// Spawns a child under a parent already known to be registered.
    pub(crate) fn spawn_attached<B: Bundle>(&mut self, parent: EntityId, bundle: B) -> EntityId {
        let child = self.spawn(bundle);
        self.hierarchy.attach(child, parent);
        child
    }

    fn register<B: Bundle>(&mut self, entity: EntityId, bundle: B) {
        self.registry.insert(entity, TypeSet::from_keys(B::keys()));
        bundle.insert_into(&mut self.components, entity);
    }

    // --- Registry ---

    /// Checks if an entity id is registered.
    #[must_use]
    pub fn exists(&self, entity: EntityId) -> bool {
        self.registry.contains_key(&entity)
    }

    /// Validates that an entity id is registered.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if it is not.
    pub fn validate(&self, entity: EntityId) -> Result<()> {
        if self.registry.contains_key(&entity) {
            Ok(())
        } else {
            Err(Error::unknown_entity(entity))
        }
    }

    /// Returns the number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if no entities are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    // --- Components ---

    /// Adds the components of `bundle` to an existing entity.
    ///
    /// Existing entries of the same types are overwritten.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if the id is not registered.
    pub fn insert<B: Bundle>(&mut self, entity: EntityId, bundle: B) -> Result<()> {
        self.validate(entity)?;
        self.insert_registered(entity, bundle);
        Ok(())
    }

    /// Adds a single component to an existing entity.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if the id is not registered.
    pub fn insert_one<C: Component>(&mut self, entity: EntityId, component: C) -> Result<()> {
        self.insert(entity, (component,))
    }

    /// Inserts a bundle for an entity already known to be registered.
    pub(crate) fn insert_registered<B: Bundle>(&mut self, entity: EntityId, bundle: B) {
        if let Some(set) = self.registry.get_mut(&entity) {
            for key in B::keys() {
                set.insert(key);
            }
            bundle.insert_into(&mut self.components, entity);
        }
    }

    /// Gets a component of an entity.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if the id is not registered, or
    /// `MissingComponent` if the entity lacks the requested type.
    pub fn get<C: Component>(&self, entity: EntityId) -> Result<&C> {
        self.validate(entity)?;
        self.components
            .get::<C>(entity)
            .ok_or_else(|| Error::missing_component(entity, std::any::type_name::<C>()))
    }

    /// Gets a mutable component of an entity.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if the id is not registered, or
    /// `MissingComponent` if the entity lacks the requested type.
    pub fn get_mut<C: Component>(&mut self, entity: EntityId) -> Result<&mut C> {
        self.validate(entity)?;
        self.components
            .get_mut::<C>(entity)
            .ok_or_else(|| Error::missing_component(entity, std::any::type_name::<C>()))
    }

    /// Gets several components of an entity at once, in tuple order.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if the id is not registered. Fails on the
    /// first missing component type; nothing is partially returned.
    pub fn get_many<Q: ComponentSet>(&self, entity: EntityId) -> Result<Q::Refs<'_>> {
        self.validate(entity)?;
        Q::fetch(self, entity)
    }

    /// Checks if an entity has a component of type `C`.
    #[must_use]
    pub fn has<C: Component>(&self, entity: EntityId) -> bool {
        self.components.has(entity, ComponentKey::of::<C>())
    }

    /// Removes one component from an entity, returning it if it was present.
    ///
    /// Removing an absent component (or from an unknown id) is a no-op that
    /// returns `None`.
    pub fn remove<C: Component>(&mut self, entity: EntityId) -> Option<C> {
        let removed = self.components.remove::<C>(entity);
        if removed.is_some() {
            if let Some(set) = self.registry.get_mut(&entity) {
                set.remove(ComponentKey::of::<C>());
            }
        }
        removed
    }

    /// Removes every component type named by `Q` from an entity. Idempotent.
    pub fn remove_many<Q: ComponentSet>(&mut self, entity: EntityId) {
        for key in Q::keys() {
            self.remove_by_key(entity, key);
        }
    }

    fn remove_by_key(&mut self, entity: EntityId, key: ComponentKey) {
        if self.components.remove_key(entity, key) {
            if let Some(set) = self.registry.get_mut(&entity) {
                set.remove(key);
            }
        }
    }

    // --- Hierarchy ---

    /// Gets the parent of an entity.
    ///
    /// Returns `None` for roots and for unknown ids.
    #[must_use]
    pub fn parent(&self, entity: EntityId) -> Option<EntityRef<'_>> {
        self.hierarchy
            .parent(entity)
            .map(|id| EntityRef::new(self, id))
    }

    /// Gets the direct children of an entity, sorted by id.
    ///
    /// Empty for entities without children and for unknown ids.
    #[must_use]
    pub fn children(&self, entity: EntityId) -> Vec<EntityRef<'_>> {
        let mut ids: Vec<EntityId> = self.hierarchy.children(entity).collect();
        ids.sort_unstable();
        ids.into_iter().map(|id| EntityRef::new(self, id)).collect()
    }

    /// Gets the direct children of an entity that have every component type
    /// named by `Q`, sorted by id.
    #[must_use]
    pub fn children_with<Q: ComponentSet>(&self, entity: EntityId) -> Vec<EntityRef<'_>> {
        let keys = Q::keys();
        self.filter_candidates(self.hierarchy.children(entity), &keys)
            .into_iter()
            .map(|id| EntityRef::new(self, id))
            .collect()
    }

    /// Re-parents an existing entity under `parent`.
    ///
    /// The previous parent edge, if any, is detached first.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if either id is not registered.
    pub fn set_parent(&mut self, child: EntityId, parent: EntityId) -> Result<()> {
        self.validate(child)?;
        self.validate(parent)?;
        self.hierarchy.attach(child, parent);
        Ok(())
    }

    // --- Queries ---

    /// Gets the ids of all entities holding every keyed component type,
    /// sorted by id.
    ///
    /// With zero keys this is every registered entity. The candidate set is
    /// seeded from the first key's table and narrowed against the registry
    /// type sets for the remaining keys.
    #[must_use]
    pub fn entities_with_keys(&self, keys: &[ComponentKey]) -> Vec<EntityId> {
        match keys.split_first() {
            None => {
                let mut ids: Vec<EntityId> = self.registry.keys().copied().collect();
                ids.sort_unstable();
                ids
            }
            Some((first, rest)) => {
                self.filter_candidates(self.components.entities_with(*first), rest)
            }
        }
    }

    /// Gets all entities holding every component type named by `Q`, sorted
    /// by id.
    #[must_use]
    pub fn entities_with<Q: ComponentSet>(&self) -> Vec<EntityRef<'_>> {
        self.entities_with_keys(&Q::keys())
            .into_iter()
            .map(|id| EntityRef::new(self, id))
            .collect()
    }

    /// Gets all matching entities together with their components of `Q`,
    /// fetched in tuple order and sorted by id.
    #[must_use]
    pub fn query<Q: ComponentSet>(&self) -> Vec<(EntityRef<'_>, Q::Refs<'_>)> {
        self.entities_with_keys(&Q::keys())
            .into_iter()
            .filter_map(|id| {
                Q::fetch(self, id)
                    .ok()
                    .map(|refs| (EntityRef::new(self, id), refs))
            })
            .collect()
    }

    /// Narrows a candidate id set to those whose registry type set holds
    /// every key, sorted by id.
    fn filter_candidates(
        &self,
        candidates: impl Iterator<Item = EntityId>,
        keys: &[ComponentKey],
    ) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = candidates
            .filter(|id| {
                self.registry
                    .get(id)
                    .is_some_and(|set| set.contains_all(keys))
            })
            .collect();
        ids.sort_unstable();
        ids
    }

    // --- Entity access ---

    /// Gets a shared handle to an entity.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if the id is not registered.
    pub fn entity(&self, entity: EntityId) -> Result<EntityRef<'_>> {
        self.validate(entity)?;
        Ok(EntityRef::new(self, entity))
    }

    /// Gets an exclusive handle to an entity.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if the id is not registered.
    pub fn entity_mut(&mut self, entity: EntityId) -> Result<EntityMut<'_>> {
        self.validate(entity)?;
        Ok(EntityMut::new(self, entity))
    }

    /// Gets handles to every registered entity, sorted by id.
    #[must_use]
    pub fn entities(&self) -> Vec<EntityRef<'_>> {
        let mut ids: Vec<EntityId> = self.registry.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter().map(|id| EntityRef::new(self, id)).collect()
    }

    // --- Removal ---

    /// Immediately removes an entity, all of its components, its hierarchy
    /// edges, and — cascading — all of its descendants.
    ///
    /// Returns `false` if the id was not registered. Idempotent.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        if !self.registry.contains_key(&entity) {
            return false;
        }
        let mut pending = vec![entity];
        while let Some(current) = pending.pop() {
            // The registry guard also terminates on cyclic edges.
            if self.registry.remove(&current).is_none() {
                continue;
            }
            self.components.remove_entity(current);
            pending.extend(self.hierarchy.on_entity_destroyed(current));
        }
        true
    }

    /// Marks an entity for removal at the next [`Store::apply_removals`].
    ///
    /// The entity stays fully queryable until then.
    pub fn defer_despawn(&mut self, entity: EntityId) {
        self.removals.defer_entity(entity);
    }

    /// Marks the component types named by `Q` for removal from an entity at
    /// the next [`Store::apply_removals`].
    pub fn defer_remove<Q: ComponentSet>(&mut self, entity: EntityId) {
        for key in Q::keys() {
            self.removals.defer_component(entity, key);
        }
    }

    /// Returns true if any removals are buffered.
    #[must_use]
    pub fn has_pending_removals(&self) -> bool {
        !self.removals.is_empty()
    }

    /// Applies all buffered removals and clears both buffers.
    ///
    /// Whole-entity removals are applied first, so they take precedence over
    /// component removals buffered for the same entity. Safe to call with
    /// empty buffers, and idempotent: applying the same buffered item twice
    /// is a no-op the second time.
    pub fn apply_removals(&mut self) {
        let (entities, components) = self.removals.take();
        for entity in entities {
            self.despawn(entity);
        }
        for (entity, key) in components {
            self.remove_by_key(entity, key);
        }
    }

    /// Drops every entity, component, hierarchy edge, and buffered removal.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.components.clear();
        self.hierarchy.clear();
        self.removals.clear();
    }
}
