//! End-to-end workflows across the Tessera layers.
//!
//! These tests drive the store the way an external tick-based scheduler
//! would: query, mutate, buffer removals, then apply at the tick boundary.

mod scenario;
