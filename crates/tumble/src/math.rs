//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam) types so users don't need to
//! depend on it directly. The [`Transform`] type provides position, rotation,
//! and scale for 2D and 3D entities.

use serde::{Deserialize, Serialize};

pub use glam::{Mat4, Quat, Vec2, Vec3};

/// Position, rotation, and scale of an entity.
///
/// Values are stored exactly as written. The scene never composes a child's
/// transform with its parent's, so movement and collision code read and write
/// world-space values directly. 2D entities ignore the Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform (origin, no rotation, uniform scale of 1).
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a transform at the given position.
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            ..Self::IDENTITY
        }
    }

    /// Create a transform at the given 2D position (z = 0).
    pub fn from_xy(x: f32, y: f32) -> Self {
        Self::from_xyz(x, y, 0.0)
    }

    /// Return a copy with uniform scale applied.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Return a copy rotated `yaw` radians around +Y.
    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.rotation = Quat::from_rotation_y(yaw);
        self
    }

    /// Compute the 4x4 model matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_xy_leaves_z_at_zero() {
        let t = Transform::from_xy(3.0, -2.0);
        assert_eq!(t.translation, Vec3::new(3.0, -2.0, 0.0));
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn matrix_carries_translation() {
        let t = Transform::from_xyz(1.0, 2.0, 3.0).with_scale(2.0);
        let col3 = t.matrix().col(3);
        assert!((col3.x - 1.0).abs() < 0.001);
        assert!((col3.y - 2.0).abs() < 0.001);
        assert!((col3.z - 3.0).abs() < 0.001);
    }

    #[test]
    fn yaw_rotates_forward_axis() {
        let t = Transform::default().with_yaw(std::f32::consts::FRAC_PI_2);
        let forward = t.rotation * Vec3::Z;
        assert!((forward.x - 1.0).abs() < 0.001);
        assert!(forward.z.abs() < 0.001);
    }
}
