//! The canonical hierarchy-and-deferred-removal scenario.

use tessera::storage::Store;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

#[test]
fn parented_entities_with_deferred_cascade() {
    let mut store = Store::new();

    let e1 = store.spawn((Position { x: 0.0, y: 0.0 },));
    let e2 = store
        .spawn_child(e1, (Position { x: 1.0, y: 1.0 },))
        .unwrap();

    // Hierarchy is symmetric.
    let children = store.children(e1);
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id(), e2);
    assert_eq!(store.parent(e2).unwrap().id(), e1);

    // Buffered removal leaves e1 fully queryable.
    store.defer_despawn(e1);
    assert!(store.exists(e1));
    assert_eq!(
        store.get::<Position>(e1).unwrap(),
        &Position { x: 0.0, y: 0.0 }
    );
    assert_eq!(store.entities_with::<(Position,)>().len(), 2);

    // Applying removals drops e1 and, by the cascade policy, e2 as well.
    store.apply_removals();
    assert!(!store.exists(e1));
    assert!(!store.exists(e2));
    assert!(store.entities().is_empty());
}
