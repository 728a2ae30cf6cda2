//! # Kinematic Collision
//!
//! Continuous collision for character-style bodies: boxes and round shapes
//! are reduced to axis-aligned boxes, swept along their motion, and stopped
//! at the earliest impact. There are no forces, no rotation, and no
//! broad phase; each mover is checked against every other collider.
//!
//! ## Usage
//!
//! ```
//! use tumble::prelude::*;
//!
//! let mut scene = Scene::new("demo");
//! scene
//!     .spawn("ground")
//!     .insert(Transform::from_xy(0.0, 150.0))
//!     .insert(Collider::new_2d())
//!     .insert(BoxShape2d::new(1000.0, 100.0));
//! let player = scene
//!     .spawn("player")
//!     .insert(Transform::from_xy(0.0, 0.0))
//!     .insert(Collider::new_2d())
//!     .insert(BoxShape2d::new(20.0, 20.0))
//!     .insert(Velocity2d(Vec2::ZERO))
//!     .id();
//!
//! let dt = 1.0 / 60.0;
//! for _ in 0..60 {
//!     // Gravity, y down.
//!     scene.get_mut::<Velocity2d>(player).unwrap().0.y += 900.0 * dt;
//!     move_and_slide_2d(&mut scene, player, dt);
//! }
//! assert!(is_on_floor(&scene, player));
//! ```
//!
//! ## Modules
//!
//! - [`aabb`] — Box type, shape → box derivation, penetration depth
//! - [`sweep`] — Swept box time-of-impact
//! - [`motion`] — Move-and-slide, move-and-collide, contact queries
//! - [`settings`] — Epsilon / iteration cap, stored as a scene resource
//! - [`layers`] — Layer/mask filtering

pub mod aabb;
pub mod components;
pub mod layers;
pub mod motion;
pub mod settings;
pub mod sweep;

pub use aabb::{Aabb, aabb_2d, aabb_3d};
pub use components::{
    BoxShape2d, BoxShape3d, CharacterBody2d, CharacterBody3d, CharacterController2d,
    CircleShape2d, Collider, Dimension, MoveInput2d, SphereShape3d, StaticBody, Velocity2d,
    Velocity3d,
};
pub use layers::CollisionLayer;
pub use motion::{
    CollisionInfo, floor_normal, is_on_ceiling, is_on_floor, is_on_wall, move_and_collide_2d,
    move_and_collide_2d_info, move_and_collide_3d, move_and_collide_3d_info, move_and_slide_2d,
    move_and_slide_3d,
};
pub use settings::{SlideSettings, set_slide_settings, slide_settings};
pub use sweep::{SweepHit, sweep};
