//! Entity identifiers backed by random 128-bit values.

use std::fmt;

use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque entity identifier.
///
/// Backed by a random 128-bit value (UUID v4), so freshly generated ids are
/// globally unique with overwhelming probability. Collisions are neither
/// detected nor recovered from.
///
/// `Ord` is implemented only so result sets can be sorted into a
/// deterministic iteration order; the ordering carries no meaning beyond
/// equality.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Builds an identifier from an explicit 128-bit value.
    ///
    /// Useful for tests and for embedders that persist ids themselves.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Returns the raw 128-bit value.
    #[must_use]
    pub const fn as_u128(self) -> u128 {
        self.0.as_u128()
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 8 hex digits are plenty for log output.
        let full = self.0.simple().to_string();
        write!(f, "Entity({})", &full[..8])
    }
}
