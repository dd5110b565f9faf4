//! Integration tests for entity lifecycle.

use tessera_foundation::{EntityId, ErrorKind};
use tessera_storage::Store;

use crate::fixtures::{Health, Name};

// =============================================================================
// Spawning
// =============================================================================

#[test]
fn spawn_single_entity() {
    let mut store = Store::new();
    let entity = store.spawn((Health(10),));

    assert!(store.exists(entity));
    assert_eq!(store.len(), 1);
}

#[test]
fn spawn_multiple_entities() {
    let mut store = Store::new();
    let e1 = store.spawn((Health(1),));
    let e2 = store.spawn((Health(2),));
    let e3 = store.spawn_empty();

    assert!(store.exists(e1));
    assert!(store.exists(e2));
    assert!(store.exists(e3));
    assert_eq!(store.len(), 3);

    // Entities should have different ids
    assert_ne!(e1, e2);
    assert_ne!(e2, e3);
    assert_ne!(e1, e3);
}

#[test]
fn spawn_one_wraps_single_component() {
    let mut store = Store::new();
    let entity = store.spawn_one(Name("solo"));

    assert_eq!(store.get::<Name>(entity).unwrap(), &Name("solo"));
}

#[test]
fn spawn_with_explicit_id() {
    let mut store = Store::new();
    let id = EntityId::from_u128(0xCAFE);

    let spawned = store.spawn_with_id(id, (Health(5),)).unwrap();

    assert_eq!(spawned, id);
    assert!(store.exists(id));
}

#[test]
fn spawn_with_taken_id_fails() {
    let mut store = Store::new();
    let id = EntityId::from_u128(0xCAFE);
    store.spawn_with_id(id, ()).unwrap();

    let result = store.spawn_with_id(id, (Health(1),));

    assert!(matches!(result.unwrap_err().kind, ErrorKind::IdInUse(e) if e == id));
    // The collision must not have disturbed the original entity.
    assert_eq!(store.len(), 1);
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn entity_returns_handle_for_registered_id() {
    let mut store = Store::new();
    let id = store.spawn((Name("findable"),));

    let handle = store.entity(id).unwrap();
    assert_eq!(handle.id(), id);
    assert_eq!(handle.get::<Name>().unwrap(), &Name("findable"));
}

#[test]
fn entity_fails_for_unregistered_id() {
    let store = Store::new();
    let result = store.entity(EntityId::from_u128(1));

    assert!(matches!(
        result.unwrap_err().kind,
        ErrorKind::UnknownEntity(_)
    ));
}

#[test]
fn entities_lists_everything_in_deterministic_order() {
    let mut store = Store::new();
    let mut spawned: Vec<EntityId> = (0..8).map(|_| store.spawn_empty()).collect();
    spawned.sort_unstable();

    let listed: Vec<EntityId> = store.entities().iter().map(|e| e.id()).collect();

    assert_eq!(listed, spawned);
}

// =============================================================================
// Destruction
// =============================================================================

#[test]
fn despawn_removes_entity_and_components() {
    let mut store = Store::new();
    let entity = store.spawn((Health(10), Name("doomed")));

    assert!(store.despawn(entity));

    assert!(!store.exists(entity));
    assert!(store.is_empty());
    assert!(store.entities_with::<(Health,)>().is_empty());
    assert!(store.entities_with::<(Name,)>().is_empty());
}

#[test]
fn despawn_one_of_many() {
    let mut store = Store::new();
    let e1 = store.spawn((Health(1),));
    let e2 = store.spawn((Health(2),));
    let e3 = store.spawn((Health(3),));

    store.despawn(e2);

    assert!(store.exists(e1));
    assert!(!store.exists(e2));
    assert!(store.exists(e3));
    assert_eq!(store.len(), 2);
}

#[test]
fn despawn_unknown_is_a_noop() {
    let mut store = Store::new();
    let entity = store.spawn_empty();

    assert!(!store.despawn(EntityId::from_u128(99)));
    assert!(store.exists(entity));
}

#[test]
fn despawn_twice_returns_false_second_time() {
    let mut store = Store::new();
    let entity = store.spawn_empty();

    assert!(store.despawn(entity));
    assert!(!store.despawn(entity));
}

#[test]
fn clear_empties_the_store() {
    let mut store = Store::new();
    for i in 0..4 {
        store.spawn((Health(i),));
    }

    store.clear();

    assert!(store.is_empty());
    assert!(store.entities().is_empty());
}
