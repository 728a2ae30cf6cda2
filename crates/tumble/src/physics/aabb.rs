//! Axis-aligned bounding boxes and shape → box derivation.
//!
//! One [`Aabb`] type serves both spaces: `Aabb<2>` for the plane and
//! `Aabb<3>` for 3D. Axis loops run X, then Y, then Z, and every
//! tie-break below follows that order.

use crate::ecs::{Entity, Scene};
use crate::math::{Transform, Vec2, Vec3};

use super::components::{BoxShape2d, BoxShape3d, CircleShape2d, SphereShape3d};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb<const N: usize> {
    pub min: [f32; N],
    pub max: [f32; N],
}

impl<const N: usize> Aabb<N> {
    pub fn new(min: [f32; N], max: [f32; N]) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: [f32; N], half: [f32; N]) -> Self {
        Self {
            min: std::array::from_fn(|i| center[i] - half[i]),
            max: std::array::from_fn(|i| center[i] + half[i]),
        }
    }

    /// Strict overlap on every axis. Boxes that only touch do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        (0..N).all(|i| self.min[i] < other.max[i] && self.max[i] > other.min[i])
    }

    /// Signed distance to move `self` along `axis` so it no longer overlaps
    /// `other` on that axis, taking the shorter way out.
    pub fn axis_push(&self, other: &Self, axis: usize) -> f32 {
        let forward = other.max[axis] - self.min[axis];
        let backward = self.max[axis] - other.min[axis];
        if forward < backward { forward } else { -backward }
    }

    /// Axis of least penetration and the signed push that separates `self`
    /// from `other` along it. `None` when the boxes don't intersect.
    ///
    /// Equal depths resolve to the earlier axis (X before Y before Z).
    pub fn penetration(&self, other: &Self) -> Option<(usize, f32)> {
        if !self.intersects(other) {
            return None;
        }
        let mut best: Option<(usize, f32)> = None;
        for axis in 0..N {
            let push = self.axis_push(other, axis);
            if best.is_none_or(|(_, b)| push.abs() < b.abs()) {
                best = Some((axis, push));
            }
        }
        best
    }

    pub fn translated(&self, offset: [f32; N]) -> Self {
        Self {
            min: std::array::from_fn(|i| self.min[i] + offset[i]),
            max: std::array::from_fn(|i| self.max[i] + offset[i]),
        }
    }
}

impl BoxShape2d {
    pub fn aabb(&self, center: Vec2) -> Aabb<2> {
        Aabb::from_center_half_extents(center.to_array(), (self.size * 0.5).to_array())
    }
}

impl CircleShape2d {
    pub fn aabb(&self, center: Vec2) -> Aabb<2> {
        Aabb::from_center_half_extents(center.to_array(), [self.radius; 2])
    }
}

impl BoxShape3d {
    pub fn aabb(&self, center: Vec3) -> Aabb<3> {
        Aabb::from_center_half_extents(center.to_array(), (self.size * 0.5).to_array())
    }
}

impl SphereShape3d {
    pub fn aabb(&self, center: Vec3) -> Aabb<3> {
        Aabb::from_center_half_extents(center.to_array(), [self.radius; 3])
    }
}

/// World box of a 2D entity: its translation plus a box shape, or a circle
/// shape if it has no box. `None` without a transform or either shape.
pub fn aabb_2d(scene: &Scene, entity: Entity) -> Option<Aabb<2>> {
    let center = scene.get::<Transform>(entity)?.translation.truncate();
    if let Some(shape) = scene.get::<BoxShape2d>(entity) {
        return Some(shape.aabb(center));
    }
    scene
        .get::<CircleShape2d>(entity)
        .map(|shape| shape.aabb(center))
}

/// World box of a 3D entity: its translation plus a box shape, or a sphere
/// shape if it has no box. `None` without a transform or either shape.
pub fn aabb_3d(scene: &Scene, entity: Entity) -> Option<Aabb<3>> {
    let center = scene.get::<Transform>(entity)?.translation;
    if let Some(shape) = scene.get::<BoxShape3d>(entity) {
        return Some(shape.aabb(center));
    }
    scene
        .get::<SphereShape3d>(entity)
        .map(|shape| shape.aabb(center))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_and_circle_extents() {
        let b = BoxShape2d::new(4.0, 2.0).aabb(Vec2::new(10.0, 5.0));
        assert_eq!(b, Aabb::new([8.0, 4.0], [12.0, 6.0]));

        let c = CircleShape2d { radius: 1.5 }.aabb(Vec2::ZERO);
        assert_eq!(c, Aabb::new([-1.5, -1.5], [1.5, 1.5]));

        let s = SphereShape3d { radius: 2.0 }.aabb(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(s, Aabb::new([-1.0, -1.0, -1.0], [3.0, 3.0, 3.0]));
    }

    #[test]
    fn touching_is_not_intersecting() {
        let a = Aabb::new([0.0, 0.0], [1.0, 1.0]);
        let b = Aabb::new([1.0, 0.0], [2.0, 1.0]);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Aabb::new([0.5, 0.5], [2.0, 2.0])));
    }

    #[test]
    fn penetration_picks_shallow_axis() {
        let mover = Aabb::new([0.0, 0.0], [2.0, 2.0]);
        let wall = Aabb::new([1.5, -1.0], [3.5, 3.0]);
        let (axis, push) = mover.penetration(&wall).unwrap();
        assert_eq!(axis, 0);
        assert_eq!(push, -0.5);

        let resolved = mover.translated([push, 0.0]);
        assert_eq!(resolved.max[0], wall.min[0]);
        assert!(!resolved.intersects(&wall));
    }

    #[test]
    fn penetration_push_points_away_from_target() {
        // Mover overlaps the right edge of the target: push is positive.
        let mover = Aabb::new([0.75, 0.0], [1.75, 1.0]);
        let target = Aabb::new([-1.0, -4.0], [1.0, 4.0]);
        assert_eq!(mover.penetration(&target), Some((0, 0.25)));
    }

    #[test]
    fn penetration_ties_prefer_earlier_axis() {
        let mover = Aabb::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let target = Aabb::new([0.5, 0.5, 0.5], [2.0, 2.0, 2.0]);
        assert_eq!(mover.penetration(&target), Some((0, -0.5)));

        let target_yz = Aabb::new([-0.5, 0.5, 0.5], [0.9, 2.0, 2.0]);
        assert_eq!(mover.penetration(&target_yz), Some((1, -0.5)));
    }

    #[test]
    fn entity_aabb_prefers_box_over_circle() {
        let mut scene = Scene::new("test");
        let e = scene.create_entity("e");
        assert_eq!(aabb_2d(&scene, e), None);

        scene.insert(e, CircleShape2d { radius: 1.0 });
        assert_eq!(aabb_2d(&scene, e), Some(Aabb::new([-1.0, -1.0], [1.0, 1.0])));

        scene.insert(e, BoxShape2d::new(4.0, 4.0));
        scene.get_mut::<Transform>(e).unwrap().translation = Vec3::new(1.0, 1.0, 9.0);
        assert_eq!(aabb_2d(&scene, e), Some(Aabb::new([-1.0, -1.0], [3.0, 3.0])));
    }

    #[test]
    fn entity_aabb_needs_transform() {
        let mut scene = Scene::new("test");
        let e = scene.create_entity("e");
        scene.insert(e, SphereShape3d::default());
        assert!(aabb_3d(&scene, e).is_some());
        scene.remove::<Transform>(e);
        assert!(aabb_3d(&scene, e).is_none());
    }
}
