//! Error types for Tessera operations.
//!
//! Uses `thiserror` for ergonomic error definition.

use thiserror::Error;

use crate::entity::EntityId;

/// The main error type for store operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an unknown-entity error.
    #[must_use]
    pub fn unknown_entity(entity: EntityId) -> Self {
        Self::new(ErrorKind::UnknownEntity(entity))
    }

    /// Creates a missing-component error.
    #[must_use]
    pub fn missing_component(entity: EntityId, component: &'static str) -> Self {
        Self::new(ErrorKind::MissingComponent { entity, component })
    }

    /// Creates an id-in-use error.
    #[must_use]
    pub fn id_in_use(entity: EntityId) -> Self {
        Self::new(ErrorKind::IdInUse(entity))
    }
}

/// Categorized error kinds for pattern matching.
///
/// `UnknownEntity` signals a caller bug (a stale or fabricated id) and is
/// deliberately distinct from `MissingComponent`, which means the entity
/// exists but lacks the requested optional data.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Operation referenced an entity id that is not registered.
    #[error("unknown entity: {0:?}")]
    UnknownEntity(EntityId),

    /// Entity exists but does not have the requested component type.
    #[error("missing component: {component} on {entity:?}")]
    MissingComponent {
        /// The entity that was queried.
        entity: EntityId,
        /// Name of the component type that was not found.
        component: &'static str,
    },

    /// Explicit-id spawn collided with an already registered entity.
    #[error("entity id already in use: {0:?}")]
    IdInUse(EntityId),
}

/// Result alias used throughout Tessera.
pub type Result<T> = std::result::Result<T, Error>;
