//! # Scene Graph ECS
//!
//! A small Entity Component System built around a single [`Scene`]: entities
//! are monotonic ids, components live in one type-erased table per type, and
//! a parent/child forest gives every entity a place in a depth-first walk.
//!
//! ## Module Overview
//!
//! - [`entity`] — Monotonic entity ids (0 = invalid)
//! - [`component`] — Type-erased per-type tables (`HashMap<Entity, T>`)
//! - [`scene`] — Central container (entities + components + resources + systems)
//! - [`hierarchy`] — Name/Node components, reparenting, depth-first traversal
//! - [`query`] — Snapshot views over entities holding a set of types
//! - [`system`] — System trait and schedule runner

pub(crate) mod component;
pub mod entity;
pub mod hierarchy;
pub(crate) mod query;
pub mod scene;
pub mod system;

pub use entity::Entity;
pub use hierarchy::{Name, Node};
pub use query::ViewQuery;
pub use scene::{Builder, EntityMut, Scene};
pub use system::{Schedule, System};
