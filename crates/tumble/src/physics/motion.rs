//! # Move-and-Slide / Move-and-Collide
//!
//! Both entry points sweep the mover's box against every other collider in
//! the same space and stop at the earliest impact.
//!
//! ```text
//! move_and_slide                       move_and_collide
//! ──────────────                       ────────────────
//! clear contacts                       clear contacts
//! loop ≤ max_slides:                   sweep motion once
//!   d = v · dt · remaining             ├─ miss: apply motion, false
//!   |d| ≤ ε on every axis? stop        └─ hit:  stop at contact, record,
//!   sweep d against candidates                  return CollisionInfo
//!   ├─ miss: apply d, stop
//!   └─ hit:  stop at contact, record,
//!            v -= n (v · n),
//!            remaining *= 1 - t
//! write v back
//! ```
//!
//! ## Candidates
//!
//! Every entity other than the mover that has a `Transform`, a [`Collider`]
//! of the same [`Dimension`], a box or round shape, and
//! a layer pair that passes [`CollisionLayer::should_collide`]. The scan runs
//! in entity creation order and a later candidate only wins with a strictly
//! earlier impact, so equal times go to the older entity.
//!
//! ## Contacts
//!
//! Flags are cleared at the start of each call and set by any contact during
//! it. The 2D space has y growing downward, so a floor pushes back along -y
//! there and along +y in 3D.
//!
//! [`CollisionLayer::should_collide`]: super::CollisionLayer::should_collide

use crate::ecs::{Entity, Scene};
use crate::math::{Transform, Vec2, Vec3};

use super::aabb::{Aabb, aabb_2d, aabb_3d};
use super::components::{Collider, Dimension, Velocity2d, Velocity3d};
use super::layers::layer_of;
use super::settings::slide_settings;
use super::sweep::{SweepHit, axis_normal, sweep};

/// Outcome of a [`move_and_collide_2d_info`] / [`move_and_collide_3d_info`] call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionInfo {
    pub hit: bool,
    /// The obstacle that stopped the motion, [`Entity::INVALID`] on a miss.
    pub collider: Entity,
    /// Contact normal, z is 0 in 2D.
    pub normal: Vec3,
    /// Distance moved before the contact.
    pub travel: f32,
}

// ── Per-space behaviour ─────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
struct Contacts {
    floor: bool,
    wall: bool,
    ceiling: bool,
}

/// What differs between the 2D and 3D solvers.
trait Space<const N: usize> {
    const DIMENSION: Dimension;

    fn aabb(scene: &Scene, entity: Entity) -> Option<Aabb<N>>;
    fn velocity(scene: &Scene, entity: Entity) -> Option<[f32; N]>;
    fn set_velocity(scene: &mut Scene, entity: Entity, velocity: [f32; N]);
    fn classify(normal: [f32; N], floor_dot: f32) -> Contacts;
}

/// 2D, y down.
struct Planar;

/// 3D, y up.
struct Spatial;

impl Space<2> for Planar {
    const DIMENSION: Dimension = Dimension::Two;

    fn aabb(scene: &Scene, entity: Entity) -> Option<Aabb<2>> {
        aabb_2d(scene, entity)
    }

    fn velocity(scene: &Scene, entity: Entity) -> Option<[f32; 2]> {
        scene.get::<Velocity2d>(entity).map(|v| v.0.to_array())
    }

    fn set_velocity(scene: &mut Scene, entity: Entity, velocity: [f32; 2]) {
        if let Some(v) = scene.get_mut::<Velocity2d>(entity) {
            v.0 = Vec2::from_array(velocity);
        }
    }

    fn classify([nx, ny]: [f32; 2], floor_dot: f32) -> Contacts {
        Contacts {
            floor: ny <= -floor_dot,
            wall: nx.abs() >= floor_dot,
            ceiling: ny >= floor_dot,
        }
    }
}

impl Space<3> for Spatial {
    const DIMENSION: Dimension = Dimension::Three;

    fn aabb(scene: &Scene, entity: Entity) -> Option<Aabb<3>> {
        aabb_3d(scene, entity)
    }

    fn velocity(scene: &Scene, entity: Entity) -> Option<[f32; 3]> {
        scene.get::<Velocity3d>(entity).map(|v| v.0.to_array())
    }

    fn set_velocity(scene: &mut Scene, entity: Entity, velocity: [f32; 3]) {
        if let Some(v) = scene.get_mut::<Velocity3d>(entity) {
            v.0 = Vec3::from_array(velocity);
        }
    }

    fn classify([nx, ny, nz]: [f32; 3], floor_dot: f32) -> Contacts {
        Contacts {
            floor: ny >= floor_dot,
            wall: nx.abs() >= floor_dot || nz.abs() >= floor_dot,
            ceiling: ny <= -floor_dot,
        }
    }
}

// ── Vector helpers ──────────────────────────────────────────────────────

fn scaled<const N: usize>(v: [f32; N], s: f32) -> [f32; N] {
    v.map(|c| c * s)
}

fn dot<const N: usize>(a: [f32; N], b: [f32; N]) -> f32 {
    (0..N).map(|i| a[i] * b[i]).sum()
}

fn length<const N: usize>(v: [f32; N]) -> f32 {
    dot(v, v).sqrt()
}

fn to_vec3<const N: usize>(v: [f32; N]) -> Vec3 {
    let mut out = Vec3::ZERO;
    for (i, c) in v.into_iter().enumerate() {
        out[i] = c;
    }
    out
}

fn translate<const N: usize>(scene: &mut Scene, entity: Entity, offset: [f32; N]) {
    if let Some(transform) = scene.get_mut::<Transform>(entity) {
        for (i, d) in offset.into_iter().enumerate() {
            transform.translation[i] += d;
        }
    }
}

// ── Solver ──────────────────────────────────────────────────────────────

struct Contact<const N: usize> {
    entity: Entity,
    hit: SweepHit<N>,
    target: Aabb<N>,
}

/// Check the mover has what every solver call needs, then reset its contacts.
fn begin<S: Space<N>, const N: usize>(scene: &mut Scene, entity: Entity, dt: f32) -> bool {
    if dt <= 0.0 || !scene.has::<Transform>(entity) {
        return false;
    }
    match scene.get_mut::<Collider>(entity) {
        Some(collider) if collider.dimension == S::DIMENSION => {
            collider.clear_contacts();
            true
        }
        _ => false,
    }
}

/// Earliest impact of `mover_box` moving by `displacement`, over all
/// candidates. Impacts at exactly the full displacement don't count.
fn first_contact<S: Space<N>, const N: usize>(
    scene: &Scene,
    mover: Entity,
    mover_box: &Aabb<N>,
    displacement: [f32; N],
) -> Option<Contact<N>> {
    let mover_layer = layer_of(scene, mover);
    let mut best: Option<Contact<N>> = None;
    let mut best_time = 1.0;

    for other in scene.view::<(Transform, Collider)>() {
        if other == mover {
            continue;
        }
        let Some(collider) = scene.get::<Collider>(other) else {
            continue;
        };
        if collider.dimension != S::DIMENSION {
            continue;
        }
        if !mover_layer.should_collide(&layer_of(scene, other)) {
            continue;
        }
        let Some(target) = S::aabb(scene, other) else {
            continue;
        };
        let Some(hit) = sweep(mover_box, &target, displacement) else {
            continue;
        };
        if hit.time < best_time {
            best_time = hit.time;
            best = Some(Contact {
                entity: other,
                hit,
                target,
            });
        }
    }
    best
}

/// Move up to the contact and return the normal to record.
///
/// A contact ahead of the mover leaves it `epsilon` off the surface. A
/// contact at time 0 means the boxes already overlap: the mover is pushed
/// out along the shallowest axis until it exactly touches.
fn advance_to_contact<S: Space<N>, const N: usize>(
    scene: &mut Scene,
    entity: Entity,
    displacement: [f32; N],
    contact: &Contact<N>,
    epsilon: f32,
) -> [f32; N] {
    let mut normal = contact.hit.normal;
    translate(scene, entity, scaled(displacement, contact.hit.time));

    if contact.hit.time > 0.0 {
        translate(scene, entity, scaled(normal, epsilon));
    } else if let Some((axis, push)) =
        S::aabb(scene, entity).and_then(|mover| mover.penetration(&contact.target))
    {
        let mut offset = [0.0; N];
        offset[axis] = push;
        translate(scene, entity, offset);
        normal = axis_normal(axis, push);
    }
    normal
}

fn record_contact<S: Space<N>, const N: usize>(
    scene: &mut Scene,
    entity: Entity,
    normal: [f32; N],
    floor_dot: f32,
) {
    let contacts = S::classify(normal, floor_dot);
    if let Some(collider) = scene.get_mut::<Collider>(entity) {
        collider.last_normal = to_vec3(normal);
        collider.on_floor |= contacts.floor;
        collider.on_wall |= contacts.wall;
        collider.on_ceiling |= contacts.ceiling;
    }
}

fn move_and_slide<S: Space<N>, const N: usize>(scene: &mut Scene, entity: Entity, dt: f32) -> bool {
    let Some(mut velocity) = S::velocity(scene, entity) else {
        return false;
    };
    if !begin::<S, N>(scene, entity, dt) {
        return false;
    }

    let settings = slide_settings(scene);
    let mut moved = false;
    let mut remaining = 1.0;

    for iteration in 0..settings.max_slides {
        let displacement = scaled(velocity, dt * remaining);
        if displacement.iter().all(|d| d.abs() <= settings.epsilon) {
            break;
        }

        let Some(mover_box) = S::aabb(scene, entity) else {
            return false;
        };

        let Some(contact) = first_contact::<S, N>(scene, entity, &mover_box, displacement) else {
            translate(scene, entity, displacement);
            moved = true;
            break;
        };

        let normal = advance_to_contact::<S, N>(scene, entity, displacement, &contact, settings.epsilon);
        moved = true;
        record_contact::<S, N>(scene, entity, normal, settings.floor_dot);

        // Slide: drop the part of the velocity driving into the surface.
        let into = dot(velocity, normal);
        for (v, n) in velocity.iter_mut().zip(normal) {
            *v -= n * into;
        }
        remaining *= 1.0 - contact.hit.time;

        log::trace!(
            "slide {:?} iter {}: hit {:?} t={:.4} n={:?}",
            entity,
            iteration,
            contact.entity,
            contact.hit.time,
            normal
        );

        if remaining <= settings.epsilon {
            break;
        }
    }

    S::set_velocity(scene, entity, velocity);
    moved
}

fn move_and_collide<S: Space<N>, const N: usize>(
    scene: &mut Scene,
    entity: Entity,
    motion: [f32; N],
    dt: f32,
) -> CollisionInfo {
    if !begin::<S, N>(scene, entity, dt) {
        return CollisionInfo::default();
    }
    let settings = slide_settings(scene);
    let Some(mover_box) = S::aabb(scene, entity) else {
        return CollisionInfo::default();
    };

    let Some(contact) = first_contact::<S, N>(scene, entity, &mover_box, motion) else {
        translate(scene, entity, motion);
        return CollisionInfo::default();
    };

    let normal = advance_to_contact::<S, N>(scene, entity, motion, &contact, settings.epsilon);
    record_contact::<S, N>(scene, entity, normal, settings.floor_dot);

    CollisionInfo {
        hit: true,
        collider: contact.entity,
        normal: to_vec3(normal),
        travel: length(scaled(motion, contact.hit.time)),
    }
}

// ── Public API ──────────────────────────────────────────────────────────

/// Advance a 2D body by its [`Velocity2d`] over `dt`, sliding along whatever
/// it hits. The velocity is written back with the blocked components
/// removed.
///
/// Returns `true` if the body moved. Returns `false` without touching it
/// when `dt <= 0`, or when it lacks a transform, a 2D collider, a velocity,
/// or a shape.
pub fn move_and_slide_2d(scene: &mut Scene, entity: Entity, dt: f32) -> bool {
    move_and_slide::<Planar, 2>(scene, entity, dt)
}

/// 3D counterpart of [`move_and_slide_2d`], driven by [`Velocity3d`].
pub fn move_and_slide_3d(scene: &mut Scene, entity: Entity, dt: f32) -> bool {
    move_and_slide::<Spatial, 3>(scene, entity, dt)
}

/// Move a 2D body by `motion` in one sweep, stopping at the first obstacle.
/// Returns `true` on a hit. The velocity is not used or changed; `dt` only
/// has to be positive.
pub fn move_and_collide_2d(scene: &mut Scene, entity: Entity, motion: Vec2, dt: f32) -> bool {
    move_and_collide_2d_info(scene, entity, motion, dt).hit
}

/// [`move_and_collide_2d`] with details about the hit.
pub fn move_and_collide_2d_info(scene: &mut Scene, entity: Entity, motion: Vec2, dt: f32) -> CollisionInfo {
    move_and_collide::<Planar, 2>(scene, entity, motion.to_array(), dt)
}

pub fn move_and_collide_3d(scene: &mut Scene, entity: Entity, motion: Vec3, dt: f32) -> bool {
    move_and_collide_3d_info(scene, entity, motion, dt).hit
}

pub fn move_and_collide_3d_info(scene: &mut Scene, entity: Entity, motion: Vec3, dt: f32) -> CollisionInfo {
    move_and_collide::<Spatial, 3>(scene, entity, motion.to_array(), dt)
}

/// Whether the last move call touched a floor. `false` without a collider.
pub fn is_on_floor(scene: &Scene, entity: Entity) -> bool {
    scene.get::<Collider>(entity).is_some_and(|c| c.on_floor)
}

pub fn is_on_wall(scene: &Scene, entity: Entity) -> bool {
    scene.get::<Collider>(entity).is_some_and(|c| c.on_wall)
}

pub fn is_on_ceiling(scene: &Scene, entity: Entity) -> bool {
    scene.get::<Collider>(entity).is_some_and(|c| c.on_ceiling)
}

/// Normal of the last contact, zero without a collider or contact.
pub fn floor_normal(scene: &Scene, entity: Entity) -> Vec3 {
    scene
        .get::<Collider>(entity)
        .map_or(Vec3::ZERO, |c| c.last_normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{
        BoxShape2d, BoxShape3d, CircleShape2d, CollisionLayer, SlideSettings, set_slide_settings,
    };

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    fn body_2d(scene: &mut Scene, name: &str, pos: Vec2, size: Vec2) -> Entity {
        scene
            .spawn(name)
            .insert(Transform::from_xy(pos.x, pos.y))
            .insert(Collider::new_2d())
            .insert(BoxShape2d { size })
            .id()
    }

    fn body_3d(scene: &mut Scene, name: &str, pos: Vec3, size: Vec3) -> Entity {
        scene
            .spawn(name)
            .insert(Transform::from_xyz(pos.x, pos.y, pos.z))
            .insert(Collider::new_3d())
            .insert(BoxShape3d { size })
            .id()
    }

    fn position(scene: &Scene, entity: Entity) -> Vec3 {
        scene.get::<Transform>(entity).unwrap().translation
    }

    #[test]
    fn slide_along_3d_floor() {
        let mut scene = Scene::new("test");
        body_3d(&mut scene, "floor", Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 1.0, 10.0));
        let mover = body_3d(&mut scene, "mover", Vec3::new(0.0, 0.55, 0.0), Vec3::ONE);
        scene.insert(mover, Velocity3d(Vec3::new(5.0, -5.0, 0.0)));

        assert!(move_and_slide_3d(&mut scene, mover, 0.1));

        let v = scene.get::<Velocity3d>(mover).unwrap().0;
        assert!(approx(v.x, 5.0));
        assert!(approx(v.y, 0.0));
        assert!(is_on_floor(&scene, mover));
        assert!(!is_on_wall(&scene, mover));
        assert_eq!(floor_normal(&scene, mover), Vec3::Y);

        let p = position(&scene, mover);
        assert!(p.y >= 0.5, "mover sank into the floor: {p:?}");
        assert!(approx(p.x, 0.5));
    }

    #[test]
    fn slide_2d_floor_uses_y_down() {
        let mut scene = Scene::new("test");
        // Ground top face at y = 100.
        body_2d(&mut scene, "ground", Vec2::new(0.0, 150.0), Vec2::new(1000.0, 100.0));
        let mover = body_2d(&mut scene, "mover", Vec2::new(0.0, 85.0), Vec2::new(20.0, 20.0));
        scene.insert(mover, Velocity2d(Vec2::new(0.0, 200.0)));

        assert!(move_and_slide_2d(&mut scene, mover, 0.1));

        assert!(is_on_floor(&scene, mover));
        assert!(!is_on_ceiling(&scene, mover));
        assert_eq!(floor_normal(&scene, mover), Vec3::new(0.0, -1.0, 0.0));
        assert!(approx(scene.get::<Velocity2d>(mover).unwrap().0.y, 0.0));
        let bottom = position(&scene, mover).y + 10.0;
        assert!(bottom <= 100.0);
        assert!(approx(bottom, 100.0 - 0.001));
    }

    #[test]
    fn wall_contact_in_2d() {
        let mut scene = Scene::new("test");
        body_2d(&mut scene, "wall", Vec2::new(50.0, 0.0), Vec2::new(10.0, 100.0));
        let mover = body_2d(&mut scene, "mover", Vec2::ZERO, Vec2::new(10.0, 10.0));
        scene.insert(mover, Velocity2d(Vec2::new(100.0, 0.0)));

        move_and_slide_2d(&mut scene, mover, 1.0);

        assert!(is_on_wall(&scene, mover));
        assert!(!is_on_floor(&scene, mover));
        assert!(approx(position(&scene, mover).x, 40.0 - 0.001));
        assert_eq!(scene.get::<Velocity2d>(mover).unwrap().0, Vec2::ZERO);
    }

    #[test]
    fn zero_velocity_does_not_move() {
        let mut scene = Scene::new("test");
        let mover = body_2d(&mut scene, "mover", Vec2::new(3.0, 4.0), Vec2::ONE);
        scene.insert(mover, Velocity2d(Vec2::ZERO));

        assert!(!move_and_slide_2d(&mut scene, mover, 0.016));
        assert_eq!(position(&scene, mover), Vec3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn rejects_bad_input() {
        let mut scene = Scene::new("test");
        let mover = body_2d(&mut scene, "mover", Vec2::ZERO, Vec2::ONE);
        scene.insert(mover, Velocity2d(Vec2::new(10.0, 0.0)));

        assert!(!move_and_slide_2d(&mut scene, mover, 0.0));
        assert!(!move_and_slide_2d(&mut scene, mover, -1.0));
        // Wrong space.
        assert!(!move_and_slide_3d(&mut scene, mover, 0.1));
        // Unknown entity.
        assert!(!move_and_slide_2d(&mut scene, Entity::from_raw(99), 0.1));
        assert_eq!(position(&scene, mover), Vec3::ZERO);

        // No shape.
        scene.remove::<BoxShape2d>(mover);
        assert!(!move_and_slide_2d(&mut scene, mover, 0.1));
        assert_eq!(position(&scene, mover), Vec3::ZERO);
    }

    #[test]
    fn free_motion_applies_full_displacement() {
        let mut scene = Scene::new("test");
        let mover = body_2d(&mut scene, "mover", Vec2::ZERO, Vec2::ONE);
        scene.insert(mover, Velocity2d(Vec2::new(10.0, -20.0)));

        assert!(move_and_slide_2d(&mut scene, mover, 0.5));
        assert_eq!(position(&scene, mover), Vec3::new(5.0, -10.0, 0.0));
        assert_eq!(scene.get::<Velocity2d>(mover).unwrap().0, Vec2::new(10.0, -20.0));
    }

    #[test]
    fn circle_shapes_collide_as_boxes() {
        let mut scene = Scene::new("test");
        let post = scene
            .spawn("post")
            .insert(Transform::from_xy(5.0, 0.0))
            .insert(Collider::new_2d())
            .insert(CircleShape2d { radius: 1.0 })
            .id();
        let mover = body_2d(&mut scene, "mover", Vec2::ZERO, Vec2::new(2.0, 2.0));

        let info = move_and_collide_2d_info(&mut scene, mover, Vec2::new(4.0, 0.0), 1.0);
        assert!(info.hit);
        assert_eq!(info.collider, post);
        assert!(approx(info.travel, 3.0));
    }

    #[test]
    fn layer_filter_blocks_both_ways() {
        let mut scene = Scene::new("test");
        let wall = body_2d(&mut scene, "wall", Vec2::new(5.0, 0.0), Vec2::new(2.0, 10.0));
        let mover = body_2d(&mut scene, "mover", Vec2::ZERO, Vec2::ONE);

        // Wall refuses the mover.
        scene.insert(wall, CollisionLayer::new(CollisionLayer::ENVIRONMENT, CollisionLayer::ENEMY));
        scene.insert(mover, CollisionLayer::new(CollisionLayer::PLAYER, CollisionLayer::ALL));
        assert!(!move_and_collide_2d(&mut scene, mover, Vec2::new(10.0, 0.0), 1.0));
        assert_eq!(position(&scene, mover).x, 10.0);

        // Mover refuses the wall.
        scene.get_mut::<Transform>(mover).unwrap().translation = Vec3::ZERO;
        scene.insert(wall, CollisionLayer::new(CollisionLayer::ENVIRONMENT, CollisionLayer::ALL));
        scene.insert(mover, CollisionLayer::new(CollisionLayer::PLAYER, CollisionLayer::ENEMY));
        assert!(!move_and_collide_2d(&mut scene, mover, Vec2::new(10.0, 0.0), 1.0));

        // Overlapping geometry is ignored too.
        scene.get_mut::<Transform>(mover).unwrap().translation = Vec3::new(5.0, 0.0, 0.0);
        assert!(!move_and_collide_2d(&mut scene, mover, Vec2::new(0.1, 0.0), 1.0));
    }

    #[test]
    fn trigger_flag_still_blocks() {
        let mut scene = Scene::new("test");
        let zone = body_2d(&mut scene, "zone", Vec2::new(5.0, 0.0), Vec2::new(2.0, 10.0));
        scene.insert(zone, Collider::new_2d().with_trigger(true));
        let mover = body_2d(&mut scene, "mover", Vec2::ZERO, Vec2::ONE);

        let info = move_and_collide_2d_info(&mut scene, mover, Vec2::new(10.0, 0.0), 1.0);
        assert!(info.hit);
        assert_eq!(info.collider, zone);
        assert!(approx(position(&scene, mover).x, 3.499));
    }

    #[test]
    fn other_space_is_ignored() {
        let mut scene = Scene::new("test");
        body_3d(&mut scene, "cube", Vec3::new(5.0, 0.0, 0.0), Vec3::splat(2.0));
        let mover = body_2d(&mut scene, "mover", Vec2::ZERO, Vec2::ONE);
        assert!(!move_and_collide_2d(&mut scene, mover, Vec2::new(10.0, 0.0), 1.0));
    }

    #[test]
    fn collide_reports_details_and_keeps_velocity() {
        let mut scene = Scene::new("test");
        let wall = body_3d(&mut scene, "wall", Vec3::new(0.0, 0.0, 10.0), Vec3::new(4.0, 4.0, 2.0));
        let mover = body_3d(&mut scene, "mover", Vec3::ZERO, Vec3::ONE);
        scene.insert(mover, Velocity3d(Vec3::new(1.0, 2.0, 3.0)));

        let info = move_and_collide_3d_info(&mut scene, mover, Vec3::new(0.0, 0.0, 17.0), 0.016);
        assert!(info.hit);
        assert_eq!(info.collider, wall);
        assert_eq!(info.normal, Vec3::new(0.0, 0.0, -1.0));
        assert!(approx(info.travel, 8.5));
        assert!(approx(position(&scene, mover).z, 8.5 - 0.001));
        assert!(is_on_wall(&scene, mover));
        assert_eq!(scene.get::<Velocity3d>(mover).unwrap().0, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn collide_miss_moves_full_motion() {
        let mut scene = Scene::new("test");
        let mover = body_3d(&mut scene, "mover", Vec3::ZERO, Vec3::ONE);
        let info = move_and_collide_3d_info(&mut scene, mover, Vec3::new(1.0, 2.0, 3.0), 0.016);
        assert_eq!(info, CollisionInfo::default());
        assert_eq!(info.collider, Entity::INVALID);
        assert_eq!(position(&scene, mover), Vec3::new(1.0, 2.0, 3.0));
        assert!(!move_and_collide_3d(&mut scene, mover, Vec3::X, 0.0));
        assert_eq!(position(&scene, mover), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn overlapping_mover_is_pushed_out() {
        let mut scene = Scene::new("test");
        // Target spans x [1.5, 3.5], y [-1, 3]; mover spans x [0, 2], y [0, 2].
        let target = body_2d(&mut scene, "target", Vec2::new(2.5, 1.0), Vec2::new(2.0, 4.0));
        let mover = body_2d(&mut scene, "mover", Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0));

        let info = move_and_collide_2d_info(&mut scene, mover, Vec2::new(0.25, 0.0), 1.0);
        assert!(info.hit);
        assert_eq!(info.collider, target);
        assert_eq!(info.travel, 0.0);
        assert_eq!(info.normal, Vec3::new(-1.0, 0.0, 0.0));
        // Pushed back by exactly the 0.5 overlap: right edge meets the target.
        assert_eq!(position(&scene, mover).x, 0.5);

        let mover_box = aabb_2d(&scene, mover).unwrap();
        let target_box = aabb_2d(&scene, target).unwrap();
        assert_eq!(mover_box.max[0], target_box.min[0]);
        assert!(!mover_box.intersects(&target_box));
    }

    #[test]
    fn earliest_hit_wins_and_ties_go_to_older_entity() {
        let mut scene = Scene::new("test");
        let far = body_2d(&mut scene, "far", Vec2::new(20.0, 0.0), Vec2::new(2.0, 2.0));
        let near = body_2d(&mut scene, "near", Vec2::new(10.0, 0.0), Vec2::new(2.0, 2.0));
        let mover = body_2d(&mut scene, "mover", Vec2::ZERO, Vec2::new(2.0, 2.0));
        let info = move_and_collide_2d_info(&mut scene, mover, Vec2::new(30.0, 0.0), 1.0);
        assert_eq!(info.collider, near);
        assert_ne!(info.collider, far);

        let mut scene = Scene::new("tie");
        let upper = body_2d(&mut scene, "upper", Vec2::new(10.0, -1.0), Vec2::new(2.0, 2.0));
        body_2d(&mut scene, "lower", Vec2::new(10.0, 1.0), Vec2::new(2.0, 2.0));
        let mover = body_2d(&mut scene, "mover", Vec2::ZERO, Vec2::new(2.0, 2.0));
        let info = move_and_collide_2d_info(&mut scene, mover, Vec2::new(30.0, 0.0), 1.0);
        assert_eq!(info.collider, upper);
    }

    #[test]
    fn max_slides_bounds_iterations() {
        let mut scene = Scene::new("test");
        set_slide_settings(&mut scene, 0.001, 1);
        assert_eq!(scene.get_resource::<SlideSettings>().unwrap().max_slides, 1);

        body_3d(&mut scene, "floor", Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 1.0, 10.0));
        let mover = body_3d(&mut scene, "mover", Vec3::new(0.0, 0.55, 0.0), Vec3::ONE);
        scene.insert(mover, Velocity3d(Vec3::new(5.0, -5.0, 0.0)));

        move_and_slide_3d(&mut scene, mover, 0.1);
        // One iteration: stopped at the floor, no follow-up slide along x.
        assert!(approx(position(&scene, mover).x, 0.05));
    }

    #[test]
    fn contact_flags_reset_each_call() {
        let mut scene = Scene::new("test");
        body_3d(&mut scene, "floor", Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 1.0, 10.0));
        let mover = body_3d(&mut scene, "mover", Vec3::new(0.0, 0.55, 0.0), Vec3::ONE);
        scene.insert(mover, Velocity3d(Vec3::new(0.0, -5.0, 0.0)));
        move_and_slide_3d(&mut scene, mover, 0.1);
        assert!(is_on_floor(&scene, mover));

        scene.insert(mover, Velocity3d(Vec3::new(0.0, 5.0, 0.0)));
        move_and_slide_3d(&mut scene, mover, 0.1);
        assert!(!is_on_floor(&scene, mover));
        assert_eq!(floor_normal(&scene, mover), Vec3::ZERO);
    }

    #[test]
    fn contact_queries_without_collider() {
        let mut scene = Scene::new("test");
        let e = scene.create_entity("plain");
        assert!(!is_on_floor(&scene, e));
        assert!(!is_on_wall(&scene, e));
        assert!(!is_on_ceiling(&scene, e));
        assert_eq!(floor_normal(&scene, e), Vec3::ZERO);
    }
}
