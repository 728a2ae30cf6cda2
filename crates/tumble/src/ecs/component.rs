//! # Component — Type-Erased Per-Type Tables
//!
//! In an ECS, components are plain data: a `Transform`, a `Velocity2d`, a
//! `Collider`. The scene needs to store *any* component type without knowing
//! it at compile time. This module provides [`ComponentTable`], one map from
//! entity to value per component type, and the [`AnyTable`] trait that lets
//! the scene hold them all in a single `HashMap<TypeId, Box<dyn AnyTable>>`.
//!
//! ## Why a map per type?
//!
//! Archetype storage groups entities by their whole component signature,
//! which makes adding or removing one component a migration between tables.
//! This scene adds and removes components constantly (contact flags,
//! per-frame inputs), so each type gets its own `HashMap<Entity, T>` instead:
//! O(1) lookup by `(entity, type)`, no migration, and no `unsafe`.
//!
//! Access downcasts `Box<dyn AnyTable>` back to `ComponentTable<T>` through
//! `Any`. The table for `T` is always stored under `TypeId::of::<T>()`, so a
//! failed downcast would be a bug in this module and is treated as "absent".

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::entity::Entity;

/// Returns the `TypeId` used to key the table for `T`.
pub(crate) fn component_type_id<T: 'static>() -> TypeId {
    TypeId::of::<T>()
}

/// Operations the scene needs on every table regardless of its type.
pub(crate) trait AnyTable: Send + Sync {
    /// Drop the entity's value if it has one. Returns `true` if removed.
    fn remove_entity(&mut self, entity: Entity) -> bool;
    /// Whether the entity has a value in this table.
    fn contains(&self, entity: Entity) -> bool;
    /// Number of stored values.
    fn len(&self) -> usize;
    /// Full type name of the stored component, for logs.
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// All values of one component type, keyed by entity.
pub(crate) struct ComponentTable<T> {
    data: HashMap<Entity, T>,
}

impl<T: 'static + Send + Sync> ComponentTable<T> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Insert or overwrite the entity's value. Returns the old value.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        self.data.insert(entity, value)
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.data.get(&entity)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.data.get_mut(&entity)
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.data.remove(&entity)
    }
}

impl<T: 'static + Send + Sync> AnyTable for ComponentTable<T> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.data.remove(&entity).is_some()
    }

    fn contains(&self, entity: Entity) -> bool {
        self.data.contains_key(&entity)
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Downcast a type-erased table to its concrete type.
pub(crate) fn downcast<T: 'static + Send + Sync>(table: &dyn AnyTable) -> Option<&ComponentTable<T>> {
    table.as_any().downcast_ref::<ComponentTable<T>>()
}

/// Mutable variant of [`downcast`].
pub(crate) fn downcast_mut<T: 'static + Send + Sync>(
    table: &mut dyn AnyTable,
) -> Option<&mut ComponentTable<T>> {
    table.as_any_mut().downcast_mut::<ComponentTable<T>>()
}
