//! Ready-made movement systems.
//!
//! | System                     | Reads                                       | Moves with             |
//! |----------------------------|---------------------------------------------|------------------------|
//! | [`PlayerInput2d`]          | `ActionMap<K>`                              | writes [`MoveInput2d`] |
//! | [`TopDownPhysics2d`]       | `MoveInput2d`, `CharacterController2d`      | fixed-step push-out    |
//! | [`PlatformerMovement2d`]   | `ActionMap<K>`, [`CharacterBody2d`]         | [`move_and_slide_2d`]  |
//! | [`CharacterMovement3d`]    | `ActionMap<K>`, [`CameraYaw`], [`CharacterBody3d`] | [`move_and_slide_3d`] |
//!
//! Action names are the constants below. A scene without an `ActionMap<K>`
//! resource behaves as if nothing is pressed.

use std::hash::Hash;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::ecs::{Entity, Scene, System};
use crate::input::ActionMap;
use crate::math::{Quat, Transform, Vec2, Vec3};
use crate::physics::layers::layer_of;
use crate::physics::{
    Aabb, BoxShape2d, CharacterBody2d, CharacterBody3d, CharacterController2d, CollisionLayer,
    MoveInput2d, StaticBody, Velocity2d, Velocity3d, is_on_floor, move_and_slide_2d,
    move_and_slide_3d,
};

pub const MOVE_LEFT: &str = "move_left";
pub const MOVE_RIGHT: &str = "move_right";
pub const MOVE_UP: &str = "move_up";
pub const MOVE_DOWN: &str = "move_down";
pub const MOVE_FORWARD: &str = "move_forward";
pub const MOVE_BACK: &str = "move_back";
pub const JUMP: &str = "jump";

/// Orbit angle of the camera around +y, in radians. At 0 the camera sits
/// on the body's +z side looking toward -z. Resource read by
/// [`CharacterMovement3d`]; absent means 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraYaw(pub f32);

// ── PlayerInput2d ───────────────────────────────────────────────────────

/// Copies the four move actions into every [`MoveInput2d`].
pub struct PlayerInput2d<K> {
    _keys: PhantomData<fn() -> K>,
}

impl<K> Default for PlayerInput2d<K> {
    fn default() -> Self {
        Self { _keys: PhantomData }
    }
}

impl<K: Eq + Hash + Copy + 'static> System for PlayerInput2d<K> {
    fn on_update(&mut self, scene: &mut Scene, _dt: f32) {
        let direction = scene
            .get_resource::<ActionMap<K>>()
            .map_or(Vec2::ZERO, |a| a.action_axis_2d(MOVE_LEFT, MOVE_RIGHT, MOVE_UP, MOVE_DOWN));
        for entity in scene.view::<(MoveInput2d,)>() {
            if let Some(input) = scene.get_mut::<MoveInput2d>(entity) {
                input.direction = direction;
            }
        }
    }
}

// ── TopDownPhysics2d ────────────────────────────────────────────────────

/// Fixed-step top-down movement against [`StaticBody`] boxes.
///
/// Each step steers velocity toward `direction * max_speed`, damps it, then
/// moves X and Y separately. Overlapping a static box on an axis pushes the
/// body back out the shorter way and zeroes that axis' velocity. Movers need
/// a `Transform`, a [`BoxShape2d`], and a [`Velocity2d`]; steering also
/// needs [`CharacterController2d`] and [`MoveInput2d`].
#[derive(Debug, Default)]
pub struct TopDownPhysics2d {
    accumulator: f32,
}

impl TopDownPhysics2d {
    pub const FIXED_DT: f32 = 1.0 / 120.0;
    pub const MAX_STEPS: u32 = 5;

    fn step(scene: &mut Scene, dt: f32) {
        let walls: Vec<(Entity, Aabb<2>, CollisionLayer)> = scene
            .view::<(Transform, BoxShape2d, StaticBody)>()
            .into_iter()
            .filter_map(|e| {
                let center = scene.get::<Transform>(e)?.translation.truncate();
                let shape = scene.get::<BoxShape2d>(e)?;
                Some((e, shape.aabb(center), layer_of(scene, e)))
            })
            .collect();

        for entity in scene.view::<(Transform, BoxShape2d, Velocity2d)>() {
            let (Some(transform), Some(shape), Some(velocity)) = (
                scene.get::<Transform>(entity).copied(),
                scene.get::<BoxShape2d>(entity).copied(),
                scene.get::<Velocity2d>(entity).copied(),
            ) else {
                continue;
            };
            let mut velocity = velocity.0;

            if let (Some(controller), Some(input)) = (
                scene.get::<CharacterController2d>(entity),
                scene.get::<MoveInput2d>(entity),
            ) {
                velocity = steer(velocity, input.direction, controller, dt);
            }

            let layer = layer_of(scene, entity);
            let mut position = transform.translation.truncate();
            let displacement = velocity * dt;

            for axis in 0..2 {
                position[axis] += displacement[axis];
                for (wall, wall_box, wall_layer) in &walls {
                    if *wall == entity || !layer.should_collide(wall_layer) {
                        continue;
                    }
                    let mover = shape.aabb(position);
                    if mover.intersects(wall_box) {
                        position[axis] += mover.axis_push(wall_box, axis);
                        velocity[axis] = 0.0;
                    }
                }
            }

            if let Some(t) = scene.get_mut::<Transform>(entity) {
                t.translation.x = position.x;
                t.translation.y = position.y;
            }
            if let Some(v) = scene.get_mut::<Velocity2d>(entity) {
                v.0 = velocity;
            }
        }
    }
}

fn steer(velocity: Vec2, direction: Vec2, controller: &CharacterController2d, dt: f32) -> Vec2 {
    let target = direction * controller.max_speed;
    let blend = (controller.acceleration.max(0.0) * dt).min(1.0);
    let steered = velocity + (target - velocity) * blend;
    steered / (1.0 + controller.damping.max(0.0) * dt)
}

impl System for TopDownPhysics2d {
    fn on_update(&mut self, scene: &mut Scene, dt: f32) {
        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= Self::FIXED_DT && steps < Self::MAX_STEPS {
            Self::step(scene, Self::FIXED_DT);
            self.accumulator -= Self::FIXED_DT;
            steps += 1;
        }
    }
}

// ── PlatformerMovement2d ────────────────────────────────────────────────

/// Drives every [`CharacterBody2d`] + [`Velocity2d`] from the move actions,
/// then calls [`move_and_slide_2d`].
///
/// Horizontal speed follows the left/right axis directly. Without gravity
/// the up/down axis does the same; with gravity, velocity accumulates
/// downward (+y) and [`JUMP`] on a floor launches upward.
pub struct PlatformerMovement2d<K> {
    _keys: PhantomData<fn() -> K>,
}

impl<K> Default for PlatformerMovement2d<K> {
    fn default() -> Self {
        Self { _keys: PhantomData }
    }
}

impl<K: Eq + Hash + Copy + 'static> System for PlatformerMovement2d<K> {
    fn on_update(&mut self, scene: &mut Scene, dt: f32) {
        let (axis, jump) = match scene.get_resource::<ActionMap<K>>() {
            Some(actions) => (
                actions.action_axis_2d(MOVE_LEFT, MOVE_RIGHT, MOVE_UP, MOVE_DOWN),
                actions.is_action_just_pressed(JUMP),
            ),
            None => (Vec2::ZERO, false),
        };

        for entity in scene.view::<(CharacterBody2d, Velocity2d)>() {
            let Some(body) = scene.get::<CharacterBody2d>(entity).copied() else {
                continue;
            };
            let on_floor = is_on_floor(scene, entity);
            let Some(velocity) = scene.get_mut::<Velocity2d>(entity) else {
                continue;
            };

            velocity.0.x = axis.x * body.speed;
            if body.use_gravity {
                velocity.0.y += body.gravity * dt;
                if on_floor && jump {
                    velocity.0.y = -body.jump_strength;
                }
            } else {
                velocity.0.y = axis.y * body.speed;
            }

            move_and_slide_2d(scene, entity, dt);
        }
    }
}

// ── CharacterMovement3d ─────────────────────────────────────────────────

/// Camera-relative walking for every [`CharacterBody3d`] + [`Velocity3d`].
///
/// Movement is on the XZ plane relative to [`CameraYaw`]; the body turns to
/// face where it's going. With gravity enabled, velocity accumulates
/// downward (-y) and [`JUMP`] on a floor launches upward.
pub struct CharacterMovement3d<K> {
    _keys: PhantomData<fn() -> K>,
}

impl<K> Default for CharacterMovement3d<K> {
    fn default() -> Self {
        Self { _keys: PhantomData }
    }
}

/// World-space move direction for an orbit camera at `yaw`.
///
/// The camera sits behind the body along `(sin yaw, 0, cos yaw)`. `input_x`
/// is right minus left and `input_z` is back minus forward, so pressing
/// forward walks away from the camera.
fn camera_relative(input_x: f32, input_z: f32, yaw: f32) -> Vec3 {
    let back = Vec3::new(yaw.sin(), 0.0, yaw.cos());
    let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());
    let direction = right * input_x + back * input_z;
    if direction.length() > 1.0 {
        direction.normalize()
    } else {
        direction
    }
}

impl<K: Eq + Hash + Copy + 'static> System for CharacterMovement3d<K> {
    fn on_update(&mut self, scene: &mut Scene, dt: f32) {
        let yaw = scene.get_resource::<CameraYaw>().map_or(0.0, |c| c.0);
        let (direction, jump) = match scene.get_resource::<ActionMap<K>>() {
            Some(actions) => (
                camera_relative(
                    actions.action_axis(MOVE_LEFT, MOVE_RIGHT),
                    actions.action_axis(MOVE_FORWARD, MOVE_BACK),
                    yaw,
                ),
                actions.is_action_just_pressed(JUMP),
            ),
            None => (Vec3::ZERO, false),
        };

        for entity in scene.view::<(CharacterBody3d, Velocity3d)>() {
            let Some(body) = scene.get::<CharacterBody3d>(entity).copied() else {
                continue;
            };
            let on_floor = is_on_floor(scene, entity);
            let Some(velocity) = scene.get_mut::<Velocity3d>(entity) else {
                continue;
            };

            velocity.0.x = direction.x * body.speed;
            velocity.0.z = direction.z * body.speed;
            if body.use_gravity {
                velocity.0.y -= body.gravity * dt;
                if on_floor && jump {
                    velocity.0.y = body.jump_strength;
                }
            }

            if direction.length() > 0.001 {
                if let Some(transform) = scene.get_mut::<Transform>(entity) {
                    transform.rotation = Quat::from_rotation_y(direction.x.atan2(direction.z));
                }
            }

            move_and_slide_3d(scene, entity, dt);
        }
    }
}
