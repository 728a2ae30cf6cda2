//! # Scene — The Central Container
//!
//! The [`Scene`] owns all entities, components, resources, and systems. It's
//! the single source of truth for the simulation state.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Scene                                                    │
//! │                                                          │
//! │  allocator: EntityAllocator   monotonic ids, 0 = none    │
//! │  entities:  Vec<Entity>       creation order             │
//! │  live:      HashSet<Entity>   O(1) validity checks       │
//! │                                                          │
//! │  tables: HashMap<TypeId, Box<dyn AnyTable>>              │
//! │    one ComponentTable<T> (entity → T) per component type │
//! │                                                          │
//! │  resources: HashMap<TypeId, Box<dyn Any>>                │
//! │    singleton data not tied to an entity                  │
//! │                                                          │
//! │  schedule: Schedule           ordered boxed systems      │
//! │  builder:  Option<Builder>    repopulates on rebuild()   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure model
//!
//! Nothing here panics on caller mistakes. A stale or never-created entity
//! handle makes every operation a no-op: getters return `None`, views skip
//! it, mutators return `false`/`None`. "Nothing happened" is the uniform
//! failure signal.
//!
//! ## Resources
//!
//! Resources are "global" data, such as [`SlideSettings`] or an
//! [`ActionMap`]. They're stored as type-erased `Box<dyn Any>` in a HashMap.
//!
//! [`SlideSettings`]: crate::physics::SlideSettings
//! [`ActionMap`]: crate::input::ActionMap

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use super::component::{AnyTable, ComponentTable, component_type_id, downcast, downcast_mut};
use super::entity::{Entity, EntityAllocator};
use super::hierarchy::{Name, Node, Visit};
use super::query::ViewQuery;
use super::system::{Schedule, System};
use crate::math::Transform;

/// Function that populates a scene from scratch. See [`Scene::rebuild`].
pub type Builder = Box<dyn FnMut(&mut Scene)>;

/// The central container for all simulation state.
pub struct Scene {
    name: String,
    allocator: EntityAllocator,
    /// Live entities in creation order.
    entities: Vec<Entity>,
    /// Same ids as `entities`, for O(1) validity checks.
    live: HashSet<Entity>,
    /// One table per component type, keyed by TypeId.
    tables: HashMap<TypeId, Box<dyn AnyTable>>,
    /// Global resources (singletons), keyed by TypeId.
    resources: HashMap<TypeId, Box<dyn Any>>,
    schedule: Schedule,
    /// Bumped whenever the system list is thrown away, so `update` can tell
    /// whether the schedule it took out is still current.
    schedule_epoch: u64,
    builder: Option<Builder>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allocator: EntityAllocator::new(),
            entities: Vec::new(),
            live: HashSet::new(),
            tables: HashMap::new(),
            resources: HashMap::new(),
            schedule: Schedule::new(),
            schedule_epoch: 0,
            builder: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ── Resources ────────────────────────────────────────────────────

    /// Insert a resource (singleton value). Replaces any existing resource of
    /// the same type.
    pub fn insert_resource<T: 'static>(&mut self, value: T) {
        self.resources.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Try to get a shared reference to a resource. Returns `None` if not found.
    pub fn get_resource<T: 'static>(&self) -> Option<&T> {
        self.resources
            .get(&TypeId::of::<T>())
            .and_then(|r| r.downcast_ref::<T>())
    }

    /// Try to get a mutable reference to a resource. Returns `None` if not found.
    pub fn get_resource_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.resources
            .get_mut(&TypeId::of::<T>())
            .and_then(|r| r.downcast_mut::<T>())
    }

    /// Check if a resource exists.
    pub fn has_resource<T: 'static>(&self) -> bool {
        self.resources.contains_key(&TypeId::of::<T>())
    }

    /// Remove a resource, taking ownership. Returns `None` if not present.
    ///
    /// Use this for the extract/reinsert pattern when you need to borrow a
    /// resource while also borrowing the scene.
    pub fn resource_remove<T: 'static>(&mut self) -> Option<T> {
        self.resources
            .remove(&TypeId::of::<T>())
            .and_then(|r| r.downcast::<T>().ok())
            .map(|b| *b)
    }

    // ── Entity Management ────────────────────────────────────────────

    /// Create an entity with default [`Name`], [`Node`], and [`Transform`]
    /// components. Never fails.
    pub fn create_entity(&mut self, name: &str) -> Entity {
        let entity = self.allocator.allocate();
        self.entities.push(entity);
        self.live.insert(entity);

        self.insert(entity, Name::new(name));
        self.insert(entity, Node::default());
        self.insert(entity, Transform::default());
        entity
    }

    /// Create an entity and return a builder for chaining component inserts.
    ///
    /// ```ignore
    /// let player = scene
    ///     .spawn("player")
    ///     .insert(Collider::new_2d())
    ///     .insert(BoxShape2d::new(32.0, 48.0))
    ///     .id();
    /// ```
    pub fn spawn(&mut self, name: &str) -> EntityMut<'_> {
        let entity = self.create_entity(name);
        EntityMut {
            scene: self,
            entity,
        }
    }

    /// Builder access to an existing entity. `None` if it isn't live.
    pub fn entity_mut(&mut self, entity: Entity) -> Option<EntityMut<'_>> {
        if !self.is_valid(entity) {
            return None;
        }
        Some(EntityMut {
            scene: self,
            entity,
        })
    }

    /// Destroy an entity: drop all its components, unlink it from its parent,
    /// and turn its children into roots. Returns `false` (and does nothing)
    /// if the entity wasn't live, so double-destroy is harmless.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.is_valid(entity) {
            return false;
        }

        if let Some(node) = self.get::<Node>(entity).cloned() {
            if !node.parent.is_invalid() {
                if let Some(parent_node) = self.get_mut::<Node>(node.parent) {
                    parent_node.children.retain(|&c| c != entity);
                }
            }
            for child in node.children {
                if let Some(child_node) = self.get_mut::<Node>(child) {
                    child_node.parent = Entity::INVALID;
                }
            }
        }

        for table in self.tables.values_mut() {
            if table.remove_entity(entity) {
                log::trace!("{:?}: dropped {}", entity, table.type_name());
            }
        }

        self.live.remove(&entity);
        self.entities.retain(|&e| e != entity);
        log::debug!("scene `{}`: destroyed {:?}", self.name, entity);
        true
    }

    /// Check if an entity is live in this scene.
    pub fn is_valid(&self, entity: Entity) -> bool {
        self.live.contains(&entity)
    }

    /// Returns the number of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// All live entities in creation order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// The entity's [`Name`], if it is live and has one.
    pub fn entity_name(&self, entity: Entity) -> Option<&str> {
        self.get::<Name>(entity).map(|n| n.0.as_str())
    }

    /// Rename an entity, adding a [`Name`] if it has none. No-op when the
    /// entity isn't live.
    pub fn set_entity_name(&mut self, entity: Entity, name: &str) {
        if let Some(existing) = self.get_mut::<Name>(entity) {
            existing.0 = name.to_string();
        } else {
            self.insert(entity, Name::new(name));
        }
    }

    // ── Per-Entity Component Access ──────────────────────────────────

    /// Add a component to an entity, overwriting any existing value of the
    /// same type. Returns a reference to the stored value, or `None` if the
    /// entity isn't live.
    pub fn insert<T: 'static + Send + Sync>(&mut self, entity: Entity, component: T) -> Option<&mut T> {
        if !self.is_valid(entity) {
            return None;
        }
        let table = self
            .tables
            .entry(component_type_id::<T>())
            .or_insert_with(|| Box::new(ComponentTable::<T>::new()));
        let table = downcast_mut::<T>(table.as_mut())?;
        table.insert(entity, component);
        table.get_mut(entity)
    }

    /// Get a shared reference to a component on a specific entity.
    ///
    /// Returns `None` if the entity is dead or doesn't have the component.
    /// Never fabricates a default value.
    pub fn get<T: 'static + Send + Sync>(&self, entity: Entity) -> Option<&T> {
        let table = self.tables.get(&component_type_id::<T>())?;
        downcast::<T>(table.as_ref())?.get(entity)
    }

    /// Get a mutable reference to a component on a specific entity.
    ///
    /// Returns `None` if the entity is dead or doesn't have the component.
    pub fn get_mut<T: 'static + Send + Sync>(&mut self, entity: Entity) -> Option<&mut T> {
        let table = self.tables.get_mut(&component_type_id::<T>())?;
        downcast_mut::<T>(table.as_mut())?.get_mut(entity)
    }

    /// Whether the entity has a component of type `T`.
    pub fn has<T: 'static + Send + Sync>(&self, entity: Entity) -> bool {
        self.has_type_id(entity, &component_type_id::<T>())
    }

    /// Remove a component from an entity, returning it if it was present.
    pub fn remove<T: 'static + Send + Sync>(&mut self, entity: Entity) -> Option<T> {
        let table = self.tables.get_mut(&component_type_id::<T>())?;
        downcast_mut::<T>(table.as_mut())?.remove(entity)
    }

    fn has_type_id(&self, entity: Entity, type_id: &TypeId) -> bool {
        self.tables
            .get(type_id)
            .is_some_and(|table| table.contains(entity))
    }

    // ── View ─────────────────────────────────────────────────────────

    /// Every live entity that has all components in `Q`, in creation order.
    ///
    /// The result is a snapshot: components may be mutated freely while
    /// walking it, and entities created meanwhile won't appear until the
    /// next call.
    ///
    /// # Example
    ///
    /// ```ignore
    /// for entity in scene.view::<(Transform, Velocity2d)>() {
    ///     let v = scene.get::<Velocity2d>(entity).unwrap().0;
    ///     scene.get_mut::<Transform>(entity).unwrap().translation += v.extend(0.0) * dt;
    /// }
    /// ```
    pub fn view<Q: ViewQuery>(&self) -> Vec<Entity> {
        let required = Q::type_ids();
        if required.iter().any(|tid| !self.tables.contains_key(tid)) {
            return Vec::new();
        }
        self.entities
            .iter()
            .copied()
            .filter(|&e| required.iter().all(|tid| self.has_type_id(e, tid)))
            .collect()
    }

    // ── Systems ──────────────────────────────────────────────────────

    /// Register a system. Systems run in registration order.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.schedule.add_system(system);
    }

    /// Register a default-constructed system.
    pub fn create_system<S: System + Default + 'static>(&mut self) {
        self.add_system(S::default());
    }

    /// Drop every registered system.
    pub fn clear_systems(&mut self) {
        self.schedule.clear();
        self.schedule_epoch += 1;
    }

    /// Bumped every time the system list is cleared.
    pub(crate) fn schedule_epoch(&self) -> u64 {
        self.schedule_epoch
    }

    /// Returns the number of registered systems.
    pub fn system_count(&self) -> usize {
        self.schedule.len()
    }

    /// Short names of the registered systems, in run order.
    pub fn system_names(&self) -> Vec<&str> {
        self.schedule.names()
    }

    /// Advance the scene by one frame.
    ///
    /// 1. Every system's `on_update`, in registration order.
    /// 2. One depth-first walk of the hierarchy (roots in creation order,
    ///    children in insertion order) calling every system's
    ///    `on_pre_update` on entry and `on_post_update` on exit.
    ///
    /// Systems registered during the frame run from the next frame on. If a
    /// system clears the system list (or rebuilds the scene) during
    /// `on_update`, the rest of this frame is skipped: later systems'
    /// `on_update` and the whole walk.
    pub fn update(&mut self, dt: f32) {
        let mut schedule = std::mem::take(&mut self.schedule);
        let epoch = self.schedule_epoch;

        schedule.run_update_until_cleared(self, dt);

        if self.schedule_epoch == epoch {
            self.walk(&mut |scene, entity, visit| match visit {
                Visit::Enter => schedule.run_pre(scene, entity, dt),
                Visit::Exit => schedule.run_post(scene, entity, dt),
            });
        }

        if self.schedule_epoch == epoch {
            // Keep anything registered mid-frame after the existing systems.
            schedule.append(&mut self.schedule);
            self.schedule = schedule;
        }
    }

    // ── Builder / Rebuild ────────────────────────────────────────────

    /// Set the function used by [`rebuild`](Self::rebuild).
    pub fn set_builder(&mut self, builder: impl FnMut(&mut Scene) + 'static) {
        self.builder = Some(Box::new(builder));
    }

    /// Clear the scene and run the builder to repopulate it.
    ///
    /// Returns `false` (leaving the scene untouched) if no builder is set.
    pub fn rebuild(&mut self) -> bool {
        let Some(mut builder) = self.builder.take() else {
            return false;
        };
        self.clear();
        builder(self);
        // The builder may have installed a replacement for itself.
        if self.builder.is_none() {
            self.builder = Some(builder);
        }
        log::debug!(
            "scene `{}`: rebuilt with {} entities, {} systems",
            self.name,
            self.entities.len(),
            self.schedule.len()
        );
        true
    }

    /// Drop every component table, entity, and system, and rewind the id
    /// counter. Resources and the builder are kept.
    pub fn clear(&mut self) {
        let components: usize = self.tables.values().map(|t| t.len()).sum();
        log::debug!(
            "scene `{}`: clearing {} entities, {} components (last id {})",
            self.name,
            self.entities.len(),
            components,
            self.allocator.last()
        );
        self.tables.clear();
        self.entities.clear();
        self.live.clear();
        self.clear_systems();
        self.allocator.reset();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("Scene")
    }
}

// ── EntityMut ────────────────────────────────────────────────────────────

/// Builder for adding components to an entity.
///
/// Returned by [`Scene::spawn`] and [`Scene::entity_mut`]. Chain `.insert()`
/// calls to add components.
pub struct EntityMut<'s> {
    scene: &'s mut Scene,
    entity: Entity,
}

impl<'s> EntityMut<'s> {
    /// Add a component to this entity.
    pub fn insert<T: 'static + Send + Sync>(self, component: T) -> Self {
        self.scene.insert(self.entity, component);
        self
    }

    /// Attach this entity under `parent`.
    pub fn child_of(self, parent: Entity) -> Self {
        self.scene.set_parent(self.entity, parent);
        self
    }

    /// Get the entity ID.
    pub fn id(&self) -> Entity {
        self.entity
    }
}
