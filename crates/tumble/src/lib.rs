//! # Tumble — Scene Graph and Kinematic Character Collision
//!
//! A small entity/component scene with a per-frame system scheduler, plus
//! swept-box collision for character bodies in 2D and 3D.
//!
//! Start with `use tumble::prelude::*`, build a [`Scene`](ecs::Scene), and
//! drive it with [`Scene::update`](ecs::Scene::update).

pub mod ecs;
pub mod input;
pub mod math;
pub mod physics;
pub mod prelude;
pub mod systems;
