//! Collision and movement components.

use serde::{Deserialize, Serialize};

use crate::math::{Vec2, Vec3};

/// Which space a collider lives in. 2D and 3D colliders never interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Two,
    Three,
}

/// Marks an entity as taking part in collision.
///
/// The contact fields are written by the move functions and describe the
/// most recent call: `last_normal` is the last surface touched, and the flags
/// say whether any contact during that call was a floor, wall, or ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub dimension: Dimension,
    /// Marks the collider as a sensor for host code. The move functions
    /// treat it like any other collider.
    pub trigger: bool,
    pub last_normal: Vec3,
    pub on_floor: bool,
    pub on_wall: bool,
    pub on_ceiling: bool,
}

impl Collider {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            trigger: false,
            last_normal: Vec3::ZERO,
            on_floor: false,
            on_wall: false,
            on_ceiling: false,
        }
    }

    pub fn new_2d() -> Self {
        Self::new(Dimension::Two)
    }

    pub fn new_3d() -> Self {
        Self::new(Dimension::Three)
    }

    pub fn with_trigger(mut self, trigger: bool) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn is_2d(&self) -> bool {
        self.dimension == Dimension::Two
    }

    pub(crate) fn clear_contacts(&mut self) {
        self.last_normal = Vec3::ZERO;
        self.on_floor = false;
        self.on_wall = false;
        self.on_ceiling = false;
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::new_2d()
    }
}

/// Axis-aligned box, `size` is the full extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxShape2d {
    pub size: Vec2,
}

impl BoxShape2d {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }
}

impl Default for BoxShape2d {
    fn default() -> Self {
        Self { size: Vec2::ONE }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleShape2d {
    pub radius: f32,
}

impl Default for CircleShape2d {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

/// Axis-aligned box, `size` is the full extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxShape3d {
    pub size: Vec3,
}

impl BoxShape3d {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            size: Vec3::new(x, y, z),
        }
    }
}

impl Default for BoxShape3d {
    fn default() -> Self {
        Self { size: Vec3::ONE }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereShape3d {
    pub radius: f32,
}

impl Default for SphereShape3d {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

/// Units per second. Read and written back by [`move_and_slide_2d`](super::move_and_slide_2d).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity2d(pub Vec2);

/// Units per second. Read and written back by [`move_and_slide_3d`](super::move_and_slide_3d).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity3d(pub Vec3);

/// Immovable obstacle for [`TopDownPhysics2d`](crate::systems::TopDownPhysics2d).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StaticBody;

/// Tuning for [`PlatformerMovement2d`](crate::systems::PlatformerMovement2d).
///
/// Without gravity the body moves freely in four directions; with it, the
/// vertical axis is driven by gravity and jumping (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterBody2d {
    pub speed: f32,
    pub gravity: f32,
    pub jump_strength: f32,
    pub use_gravity: bool,
}

impl Default for CharacterBody2d {
    fn default() -> Self {
        Self {
            speed: 5.0,
            gravity: 900.0,
            jump_strength: 350.0,
            use_gravity: false,
        }
    }
}

/// Tuning for [`CharacterMovement3d`](crate::systems::CharacterMovement3d).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterBody3d {
    pub speed: f32,
    pub jump_strength: f32,
    pub gravity: f32,
    pub use_gravity: bool,
}

impl Default for CharacterBody3d {
    fn default() -> Self {
        Self {
            speed: 5.0,
            jump_strength: 6.0,
            gravity: 20.0,
            use_gravity: false,
        }
    }
}

/// Desired movement direction written by the host each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveInput2d {
    pub direction: Vec2,
}

/// Steering parameters for [`TopDownPhysics2d`](crate::systems::TopDownPhysics2d).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterController2d {
    pub acceleration: f32,
    pub max_speed: f32,
    pub damping: f32,
}

impl Default for CharacterController2d {
    fn default() -> Self {
        Self {
            acceleration: 18.0,
            max_speed: 220.0,
            damping: 12.0,
        }
    }
}
