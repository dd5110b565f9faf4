//! Type-indexed component storage.
//!
//! Components are stored per type first, then per entity, so "all entities
//! having type T" is a single table scan rather than a full-registry scan.
//! The per-entity type sets track which tables hold an entry for an entity.

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use tessera_foundation::EntityId;

/// Marker for values that can be attached to entities as components.
///
/// Blanket-implemented for every `Send + Sync + 'static` type; components
/// carry no identity of their own and are owned by the store.
pub trait Component: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Component for T {}

/// Identifies a component type inside the store.
///
/// Identity, ordering, and hashing use the `TypeId` alone; the type name is
/// carried only for diagnostics.
#[derive(Clone, Copy)]
pub struct ComponentKey {
    id: TypeId,
    name: &'static str,
}

impl ComponentKey {
    /// Returns the key for a component type.
    #[must_use]
    pub fn of<C: Component>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub fn type_id(self) -> TypeId {
        self.id
    }

    /// Returns the component type name, for diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.name
    }
}

impl PartialEq for ComponentKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentKey {}

impl PartialOrd for ComponentKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComponentKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for ComponentKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentKey({})", self.name)
    }
}

/// The set of component types attached to one entity.
///
/// Keys are kept sorted for consistent identity and binary-search lookups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeSet {
    keys: Vec<ComponentKey>,
}

impl TypeSet {
    /// Creates an empty type set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a type set from a list of keys.
    #[must_use]
    pub fn from_keys(mut keys: Vec<ComponentKey>) -> Self {
        keys.sort_unstable();
        keys.dedup();
        Self { keys }
    }

    /// Returns the keys in this set, sorted.
    #[must_use]
    pub fn keys(&self) -> &[ComponentKey] {
        &self.keys
    }

    /// Checks if this set contains a key.
    #[must_use]
    pub fn contains(&self, key: ComponentKey) -> bool {
        self.keys.binary_search(&key).is_ok()
    }

    /// Adds a key to the set. Idempotent.
    pub fn insert(&mut self, key: ComponentKey) {
        if let Err(pos) = self.keys.binary_search(&key) {
            self.keys.insert(pos, key);
        }
    }

    /// Removes a key from the set. Idempotent.
    pub fn remove(&mut self, key: ComponentKey) {
        if let Ok(pos) = self.keys.binary_search(&key) {
            self.keys.remove(pos);
        }
    }

    /// Checks if this set contains every given key.
    #[must_use]
    pub fn contains_all(&self, keys: &[ComponentKey]) -> bool {
        keys.iter().all(|k| self.contains(*k))
    }

    /// Returns the number of keys in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

type BoxedComponent = Box<dyn Any + Send + Sync>;

/// Stores all component data, indexed by type and then by entity.
///
/// Values are type-erased; the typed accessors downcast back to the concrete
/// component type. At most one entry exists per (type, entity) pair, and
/// inserting a second component of the same type overwrites the first.
#[derive(Default)]
pub struct ComponentStore {
    tables: HashMap<ComponentKey, HashMap<EntityId, BoxedComponent>>,
}

impl ComponentStore {
    /// Creates a new empty component store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a component for an entity, overwriting any existing entry of
    /// the same type.
    pub fn insert<C: Component>(&mut self, entity: EntityId, component: C) {
        self.tables
            .entry(ComponentKey::of::<C>())
            .or_default()
            .insert(entity, Box::new(component));
    }

    /// Gets a component for an entity.
    #[must_use]
    pub fn get<C: Component>(&self, entity: EntityId) -> Option<&C> {
        self.tables
            .get(&ComponentKey::of::<C>())?
            .get(&entity)?
            .downcast_ref::<C>()
    }

    /// Gets a mutable component for an entity.
    #[must_use]
    pub fn get_mut<C: Component>(&mut self, entity: EntityId) -> Option<&mut C> {
        self.tables
            .get_mut(&ComponentKey::of::<C>())?
            .get_mut(&entity)?
            .downcast_mut::<C>()
    }

    /// Checks if an entity has a component of the keyed type.
    #[must_use]
    pub fn has(&self, entity: EntityId, key: ComponentKey) -> bool {
        self.tables
            .get(&key)
            .is_some_and(|table| table.contains_key(&entity))
    }

    /// Removes a component from an entity, returning it if it existed.
    pub fn remove<C: Component>(&mut self, entity: EntityId) -> Option<C> {
        let boxed = self
            .tables
            .get_mut(&ComponentKey::of::<C>())?
            .remove(&entity)?;
        boxed.downcast::<C>().ok().map(|c| *c)
    }

    /// Removes a component by key. Returns true if an entry was removed.
    pub fn remove_key(&mut self, entity: EntityId, key: ComponentKey) -> bool {
        self.tables
            .get_mut(&key)
            .is_some_and(|table| table.remove(&entity).is_some())
    }

    /// Removes all components for an entity.
    ///
    /// Called when an entity is destroyed.
    pub fn remove_entity(&mut self, entity: EntityId) {
        for table in self.tables.values_mut() {
            table.remove(&entity);
        }
    }

    /// Iterates entities holding a component of the keyed type.
    pub fn entities_with(&self, key: ComponentKey) -> impl Iterator<Item = EntityId> + '_ {
        self.tables
            .get(&key)
            .into_iter()
            .flat_map(|table| table.keys().copied())
    }

    /// Drops every table entry.
    pub fn clear(&mut self) {
        self.tables.clear();
    }
}

impl fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, table) in &self.tables {
            map.entry(&key.name(), &table.len());
        }
        map.finish()
    }
}
