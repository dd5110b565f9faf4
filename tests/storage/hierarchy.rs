//! Integration tests for parent/child hierarchy.

use tessera_foundation::{EntityId, ErrorKind};
use tessera_storage::Store;

use crate::fixtures::{Health, Name};

#[test]
fn parent_and_children_agree() {
    let mut store = Store::new();
    let parent = store.spawn((Name("parent"),));
    let child = store.spawn_child(parent, (Name("child"),)).unwrap();

    assert_eq!(store.parent(child).unwrap().id(), parent);
    let children = store.children(parent);
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id(), child);
}

#[test]
fn roots_have_no_parent() {
    let mut store = Store::new();
    let root = store.spawn_empty();

    assert!(store.parent(root).is_none());
}

#[test]
fn unknown_ids_read_as_empty_hierarchy() {
    let store = Store::new();
    let ghost = EntityId::from_u128(1);

    assert!(store.parent(ghost).is_none());
    assert!(store.children(ghost).is_empty());
}

#[test]
fn reparenting_moves_the_edge() {
    let mut store = Store::new();
    let p1 = store.spawn_empty();
    let p2 = store.spawn_empty();
    let child = store.spawn_child(p1, ()).unwrap();

    store.set_parent(child, p2).unwrap();

    assert_eq!(store.parent(child).unwrap().id(), p2);
    assert!(store.children(p1).is_empty());
    assert!(store.children(p2).iter().any(|e| e.id() == child));
}

#[test]
fn set_parent_validates_both_ids() {
    let mut store = Store::new();
    let known = store.spawn_empty();
    let ghost = EntityId::from_u128(9);

    assert!(matches!(
        store.set_parent(ghost, known).unwrap_err().kind,
        ErrorKind::UnknownEntity(_)
    ));
    assert!(matches!(
        store.set_parent(known, ghost).unwrap_err().kind,
        ErrorKind::UnknownEntity(_)
    ));
}

#[test]
fn children_with_intersects_component_filter() {
    let mut store = Store::new();
    let parent = store.spawn_empty();
    let armored = store.spawn_child(parent, (Health(10), Name("armored"))).unwrap();
    let named = store.spawn_child(parent, (Name("named"),)).unwrap();
    let _plain = store.spawn_child(parent, ()).unwrap();

    let with_health = store.children_with::<(Health,)>(parent);
    assert_eq!(with_health.len(), 1);
    assert_eq!(with_health[0].id(), armored);

    let with_name = store.children_with::<(Name,)>(parent);
    assert_eq!(with_name.len(), 2);
    assert!(with_name.iter().any(|e| e.id() == armored));
    assert!(with_name.iter().any(|e| e.id() == named));

    // Zero requested types: every child matches.
    assert_eq!(store.children_with::<()>(parent).len(), 3);
}

#[test]
fn removing_a_child_leaves_the_parent_intact() {
    let mut store = Store::new();
    let parent = store.spawn_empty();
    let child = store.spawn_child(parent, ()).unwrap();

    store.despawn(child);

    assert!(store.exists(parent));
    assert!(store.children(parent).is_empty());
}

#[test]
fn removing_a_parent_cascades_to_descendants() {
    let mut store = Store::new();
    let root = store.spawn_empty();
    let child = store.spawn_child(root, ()).unwrap();
    let grandchild = store.spawn_child(child, ()).unwrap();
    let bystander = store.spawn_empty();

    store.despawn(root);

    assert!(!store.exists(root));
    assert!(!store.exists(child));
    assert!(!store.exists(grandchild));
    assert!(store.exists(bystander));
}

#[test]
fn handle_add_child_matches_store_spawn_child() {
    let mut store = Store::new();
    let parent = store.spawn_empty();

    let via_handle = store.entity_mut(parent).unwrap().add_child((Name("kid"),));

    assert_eq!(store.parent(via_handle).unwrap().id(), parent);
    assert_eq!(store.get::<Name>(via_handle).unwrap(), &Name("kid"));
}
