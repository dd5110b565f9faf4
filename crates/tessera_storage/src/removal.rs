//! Deferred-removal buffers.
//!
//! Entities and (entity, component type) pairs marked for removal are held
//! here until the store applies them. Buffering performs no validation and
//! no immediate mutation; duplicates are allowed because the apply path is
//! idempotent.

use tessera_foundation::EntityId;

use crate::component::ComponentKey;

/// Holds pending entity and component removals.
#[derive(Clone, Debug, Default)]
pub struct RemovalBuffer {
    entities: Vec<EntityId>,
    components: Vec<(EntityId, ComponentKey)>,
}

impl RemovalBuffer {
    /// Creates a new empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an entity for removal.
    pub fn defer_entity(&mut self, entity: EntityId) {
        self.entities.push(entity);
    }

    /// Marks one component of an entity for removal.
    pub fn defer_component(&mut self, entity: EntityId, key: ComponentKey) {
        self.components.push((entity, key));
    }

    /// Returns true if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.components.is_empty()
    }

    /// Number of buffered whole-entity removals.
    #[must_use]
    pub fn pending_entities(&self) -> usize {
        self.entities.len()
    }

    /// Number of buffered component removals.
    #[must_use]
    pub fn pending_components(&self) -> usize {
        self.components.len()
    }

    /// Drains both buffers, leaving them empty.
    pub fn take(&mut self) -> (Vec<EntityId>, Vec<(EntityId, ComponentKey)>) {
        (
            std::mem::take(&mut self.entities),
            std::mem::take(&mut self.components),
        )
    }

    /// Discards everything buffered.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.components.clear();
    }
}
