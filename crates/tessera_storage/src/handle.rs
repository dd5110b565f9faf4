//! Lightweight entity handles.
//!
//! A handle bundles a store reference with an entity id and forwards every
//! entity-scoped operation to the store. Handles hold no state of their own;
//! the store remains the sole owner of all data.
//!
//! [`EntityRef`] is a shared view carrying the read operations. [`EntityMut`]
//! borrows the store exclusively and adds the mutating operations; while it
//! lives, nothing else can remove the entity out from under it.

use std::fmt;

use tessera_foundation::{EntityId, Result};

use crate::bundle::{Bundle, ComponentSet};
use crate::component::Component;
use crate::store::Store;

/// Shared view of one entity in a store.
///
/// `Copy`; equality compares entity ids only, so two handles to the same
/// entity are interchangeable.
#[derive(Clone, Copy)]
pub struct EntityRef<'w> {
    store: &'w Store,
    id: EntityId,
}

impl<'w> EntityRef<'w> {
    pub(crate) fn new(store: &'w Store, id: EntityId) -> Self {
        Self { store, id }
    }

    /// The id of this entity.
    #[must_use]
    pub fn id(self) -> EntityId {
        self.id
    }

    /// Gets a component of this entity.
    ///
    /// # Errors
    ///
    /// Returns `MissingComponent` if the entity lacks the requested type,
    /// or `UnknownEntity` if it has been removed since the handle was made.
    pub fn get<C: Component>(self) -> Result<&'w C> {
        self.store.get::<C>(self.id)
    }

    /// Gets several components of this entity at once, in tuple order.
    ///
    /// # Errors
    ///
    /// Fails on the first missing component type.
    pub fn get_many<Q: ComponentSet>(self) -> Result<Q::Refs<'w>> {
        self.store.get_many::<Q>(self.id)
    }

    /// Checks if this entity has a component of type `C`.
    #[must_use]
    pub fn has<C: Component>(self) -> bool {
        self.store.has::<C>(self.id)
    }

    /// Gets the parent of this entity, if any.
    #[must_use]
    pub fn parent(self) -> Option<EntityRef<'w>> {
        self.store.parent(self.id)
    }

    /// Gets the direct children of this entity, sorted by id.
    #[must_use]
    pub fn children(self) -> Vec<EntityRef<'w>> {
        self.store.children(self.id)
    }

    /// Gets the direct children holding every component type named by `Q`.
    #[must_use]
    pub fn children_with<Q: ComponentSet>(self) -> Vec<EntityRef<'w>> {
        self.store.children_with::<Q>(self.id)
    }
}

impl fmt::Debug for EntityRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityRef({:?})", self.id)
    }
}

impl PartialEq for EntityRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EntityRef<'_> {}

impl PartialEq<EntityId> for EntityRef<'_> {
    fn eq(&self, other: &EntityId) -> bool {
        self.id == *other
    }
}

/// Exclusive view of one entity in a store.
///
/// Forwards the read operations of [`EntityRef`] and adds the mutating ones.
pub struct EntityMut<'w> {
    store: &'w mut Store,
    id: EntityId,
}

impl<'w> EntityMut<'w> {
    pub(crate) fn new(store: &'w mut Store, id: EntityId) -> Self {
        Self { store, id }
    }

    /// The id of this entity.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Downgrades to a shared view.
    #[must_use]
    pub fn as_readonly(&self) -> EntityRef<'_> {
        EntityRef::new(self.store, self.id)
    }

    /// Gets a component of this entity.
    ///
    /// # Errors
    ///
    /// Returns `MissingComponent` if the entity lacks the requested type.
    pub fn get<C: Component>(&self) -> Result<&C> {
        self.store.get::<C>(self.id)
    }

    /// Gets a mutable component of this entity.
    ///
    /// # Errors
    ///
    /// Returns `MissingComponent` if the entity lacks the requested type.
    pub fn get_mut<C: Component>(&mut self) -> Result<&mut C> {
        self.store.get_mut::<C>(self.id)
    }

    /// Gets several components of this entity at once, in tuple order.
    ///
    /// # Errors
    ///
    /// Fails on the first missing component type.
    pub fn get_many<Q: ComponentSet>(&self) -> Result<Q::Refs<'_>> {
        self.store.get_many::<Q>(self.id)
    }

    /// Checks if this entity has a component of type `C`.
    #[must_use]
    pub fn has<C: Component>(&self) -> bool {
        self.store.has::<C>(self.id)
    }

    /// Adds the components of `bundle` to this entity, overwriting entries
    /// of the same types.
    pub fn insert<B: Bundle>(&mut self, bundle: B) {
        self.store.insert_registered(self.id, bundle);
    }

    /// Adds a single component to this entity.
    pub fn insert_one<C: Component>(&mut self, component: C) {
        self.store.insert_registered(self.id, (component,));
    }

    /// Spawns a new entity as a child of this one, returning the child's id.
    pub fn add_child<B: Bundle>(&mut self, bundle: B) -> EntityId {
        self.store.spawn_attached(self.id, bundle)
    }

    /// Removes one component from this entity, returning it if present.
    pub fn remove<C: Component>(&mut self) -> Option<C> {
        self.store.remove::<C>(self.id)
    }

    /// Removes every component type named by `Q` from this entity.
    pub fn remove_many<Q: ComponentSet>(&mut self) {
        self.store.remove_many::<Q>(self.id);
    }

    /// Marks the component types named by `Q` for deferred removal.
    pub fn defer_remove<Q: ComponentSet>(&mut self) {
        self.store.defer_remove::<Q>(self.id);
    }

    /// Marks this entity for deferred removal. The handle stays usable until
    /// the store applies its removals.
    pub fn defer_despawn(&mut self) {
        self.store.defer_despawn(self.id);
    }

    /// Consumes the handle and immediately removes the entity together with
    /// its components, hierarchy edges, and descendants.
    pub fn despawn(self) -> bool {
        self.store.despawn(self.id)
    }

    /// Gets the parent of this entity, if any.
    #[must_use]
    pub fn parent(&self) -> Option<EntityRef<'_>> {
        self.store.parent(self.id)
    }

    /// Gets the direct children of this entity, sorted by id.
    #[must_use]
    pub fn children(&self) -> Vec<EntityRef<'_>> {
        self.store.children(self.id)
    }

    /// Gets the direct children holding every component type named by `Q`.
    #[must_use]
    pub fn children_with<Q: ComponentSet>(&self) -> Vec<EntityRef<'_>> {
        self.store.children_with::<Q>(self.id)
    }
}

impl fmt::Debug for EntityMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityMut({:?})", self.id)
    }
}
