//! Convenience re-exports — `use tumble::prelude::*` for the common items.

// Core
pub use crate::ecs::{Builder, Entity, EntityMut, Name, Node, Scene, Schedule, System};
pub use crate::input::{ActionMap, Input};
pub use crate::math::{Mat4, Quat, Transform, Vec2, Vec3};

// Physics
pub use crate::physics::{
    Aabb, BoxShape2d, BoxShape3d, CharacterBody2d, CharacterBody3d, CharacterController2d,
    CircleShape2d, Collider, CollisionInfo, CollisionLayer, Dimension, MoveInput2d,
    SlideSettings, SphereShape3d, StaticBody, Velocity2d, Velocity3d, floor_normal,
    is_on_ceiling, is_on_floor, is_on_wall, move_and_collide_2d, move_and_collide_2d_info,
    move_and_collide_3d, move_and_collide_3d_info, move_and_slide_2d, move_and_slide_3d,
    set_slide_settings,
};

// Built-in systems
pub use crate::systems::{
    CameraYaw, CharacterMovement3d, PlatformerMovement2d, PlayerInput2d, TopDownPhysics2d,
};
