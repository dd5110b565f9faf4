//! Tessera - In-memory entity-component store
//!
//! This crate re-exports all layers of the Tessera system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: tessera_storage    — Store, component tables, hierarchy, removal
//! Layer 0: tessera_foundation — Core types (EntityId, Error)
//! ```

pub use tessera_foundation as foundation;
pub use tessera_storage as storage;
