//! # View — Multi-Component Entity Queries
//!
//! [`Scene::view`](super::scene::Scene::view) takes a tuple of component
//! types and returns every live entity that has all of them:
//!
//! ```ignore
//! for entity in scene.view::<(Transform, Velocity2d)>() {
//!     // mutate freely; the returned Vec is a snapshot
//! }
//! ```
//!
//! The view is a `Vec<Entity>`, not a borrowing iterator. Systems can take
//! `&mut` access to any component while walking it, and entities created
//! during the walk only show up in the next view.

use std::any::TypeId;

use super::component::component_type_id;

/// A set of component types an entity must all have to match a view.
///
/// Implemented for tuples of up to 8 component types.
pub trait ViewQuery {
    /// The `TypeId` of every required component.
    fn type_ids() -> Vec<TypeId>;
}

macro_rules! impl_view_query {
    ($($T:ident),+) => {
        impl<$($T: 'static + Send + Sync),+> ViewQuery for ($($T,)+) {
            fn type_ids() -> Vec<TypeId> {
                vec![$(component_type_id::<$T>()),+]
            }
        }
    };
}

impl_view_query!(A);
impl_view_query!(A, B);
impl_view_query!(A, B, C);
impl_view_query!(A, B, C, D);
impl_view_query!(A, B, C, D, E);
impl_view_query!(A, B, C, D, E, F);
impl_view_query!(A, B, C, D, E, F, G);
impl_view_query!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_lists_every_type_in_order() {
        let ids = <(u32, f32, bool)>::type_ids();
        assert_eq!(
            ids,
            vec![TypeId::of::<u32>(), TypeId::of::<f32>(), TypeId::of::<bool>()]
        );
    }
}
