//! Integration tests for the error taxonomy.

use tessera_foundation::{EntityId, Error, ErrorKind};

#[test]
fn unknown_entity_carries_the_id() {
    let id = EntityId::from_u128(42);
    let err = Error::unknown_entity(id);

    match err.kind {
        ErrorKind::UnknownEntity(e) => assert_eq!(e, id),
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn missing_component_names_the_type() {
    let id = EntityId::from_u128(7);
    let err = Error::missing_component(id, "demo::Position");

    match &err.kind {
        ErrorKind::MissingComponent { entity, component } => {
            assert_eq!(*entity, id);
            assert_eq!(*component, "demo::Position");
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn display_messages_are_descriptive() {
    let id = EntityId::from_u128(1);

    assert!(format!("{}", Error::unknown_entity(id)).contains("unknown entity"));
    assert!(format!("{}", Error::missing_component(id, "Health")).contains("Health"));
    assert!(format!("{}", Error::id_in_use(id)).contains("already in use"));
}

#[test]
fn errors_are_std_errors() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&Error::unknown_entity(EntityId::from_u128(1)));
}
