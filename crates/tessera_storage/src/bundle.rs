//! Tuple traits for spawning and fetching groups of components.
//!
//! [`Bundle`] moves component *values* into the tables together;
//! [`ComponentSet`] names component *types* for queries and batch reads.
//! Both are implemented for tuples of up to eight components and for `()`.

use tessera_foundation::{EntityId, Result};

use crate::component::{Component, ComponentKey, ComponentStore};
use crate::store::Store;

/// A group of component values spawned or inserted together.
pub trait Bundle {
    /// Component keys of the bundle, in tuple order.
    fn keys() -> Vec<ComponentKey>;

    /// Moves every component of the bundle into the tables for `entity`.
    fn insert_into(self, components: &mut ComponentStore, entity: EntityId);
}

impl Bundle for () {
    fn keys() -> Vec<ComponentKey> {
        Vec::new()
    }

    fn insert_into(self, _components: &mut ComponentStore, _entity: EntityId) {}
}

macro_rules! impl_bundle {
    ($($T:ident),+) => {
        impl<$($T: Component),+> Bundle for ($($T,)+) {
            fn keys() -> Vec<ComponentKey> {
                vec![$(ComponentKey::of::<$T>()),+]
            }

            #[allow(non_snake_case)]
            fn insert_into(self, components: &mut ComponentStore, entity: EntityId) {
                let ($($T,)+) = self;
                $(components.insert(entity, $T);)+
            }
        }
    };
}

impl_bundle!(A);
impl_bundle!(A, B);
impl_bundle!(A, B, C);
impl_bundle!(A, B, C, D);
impl_bundle!(A, B, C, D, E);
impl_bundle!(A, B, C, D, E, F);
impl_bundle!(A, B, C, D, E, F, G);
impl_bundle!(A, B, C, D, E, F, G, H);

/// A tuple of component types naming the requirement of a query or batch
/// read.
///
/// Fetch results preserve tuple order regardless of insertion order.
pub trait ComponentSet {
    /// References to each component, in tuple order.
    type Refs<'w>;

    /// Component keys of the set, in tuple order.
    fn keys() -> Vec<ComponentKey>;

    /// Fetches a reference to each component of `entity`.
    ///
    /// # Errors
    ///
    /// Fails on the first missing component; nothing is partially returned.
    fn fetch(store: &Store, entity: EntityId) -> Result<Self::Refs<'_>>;
}

impl ComponentSet for () {
    type Refs<'w> = ();

    fn keys() -> Vec<ComponentKey> {
        Vec::new()
    }

    fn fetch(_store: &Store, _entity: EntityId) -> Result<Self::Refs<'_>> {
        Ok(())
    }
}

macro_rules! impl_component_set {
    ($($T:ident),+) => {
        impl<$($T: Component),+> ComponentSet for ($($T,)+) {
            type Refs<'w> = ($(&'w $T,)+);

            fn keys() -> Vec<ComponentKey> {
                vec![$(ComponentKey::of::<$T>()),+]
            }

            fn fetch(store: &Store, entity: EntityId) -> Result<Self::Refs<'_>> {
                Ok(($(store.get::<$T>(entity)?,)+))
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);
