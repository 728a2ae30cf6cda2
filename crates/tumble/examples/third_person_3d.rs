//! Third person — camera-relative walking in a walled courtyard.
//!
//! Headless: the camera yaw turns a quarter circle while **W** is held, so
//! the character's path curves. It walks into a wall, slides along it, and
//! jumps once.
//!
//! Run with: `RUST_LOG=info cargo run -p tumble --example third_person_3d`

use std::f32::consts::FRAC_PI_2;

use tumble::prelude::*;
use tumble::systems::{JUMP, MOVE_BACK, MOVE_FORWARD, MOVE_LEFT, MOVE_RIGHT};

const DT: f32 = 1.0 / 60.0;
const FRAMES: u32 = 300;

fn main() {
    env_logger::init();

    let mut scene = Scene::new("courtyard");

    let mut actions = ActionMap::new();
    actions.bind(MOVE_FORWARD, 'w', 1.0);
    actions.bind(MOVE_BACK, 's', 1.0);
    actions.bind(MOVE_LEFT, 'a', 1.0);
    actions.bind(MOVE_RIGHT, 'd', 1.0);
    actions.bind(JUMP, ' ', 1.0);
    scene.insert_resource(actions);
    scene.insert_resource(CameraYaw(0.0));

    // Ground slab, top face at y = 0.
    scene
        .spawn("ground")
        .insert(Transform::from_xyz(0.0, -0.5, 0.0))
        .insert(Collider::new_3d())
        .insert(BoxShape3d::new(40.0, 1.0, 40.0))
        .insert(StaticBody);

    // Wall across -z, ahead of the player with the camera behind on +z.
    scene
        .spawn("north_wall")
        .insert(Transform::from_xyz(0.0, 1.5, -6.0))
        .insert(Collider::new_3d())
        .insert(BoxShape3d::new(40.0, 3.0, 1.0))
        .insert(StaticBody);

    // Pickup zone. Its empty mask keeps it out of every sweep, so the
    // player walks through it without stopping.
    scene
        .spawn("coin_zone")
        .insert(Transform::from_xyz(0.0, 0.5, -3.0))
        .insert(Collider::new_3d().with_trigger(true))
        .insert(SphereShape3d { radius: 0.5 })
        .insert(CollisionLayer::new(CollisionLayer::PICKUP, CollisionLayer::NONE));

    let player = scene
        .spawn("player")
        .insert(Transform::from_xyz(0.0, 0.5, 0.0))
        .insert(Collider::new_3d())
        .insert(BoxShape3d::new(0.6, 1.0, 0.6))
        .insert(Velocity3d(Vec3::ZERO))
        .insert(CharacterBody3d {
            use_gravity: true,
            ..Default::default()
        })
        .id();

    scene.create_system::<CharacterMovement3d<char>>();
    set_slide_settings(&mut scene, 0.001, 6);

    for frame in 0..FRAMES {
        if let Some(actions) = scene.get_resource_mut::<ActionMap<char>>() {
            match frame {
                10 => actions.press('w'),
                150 => actions.press(' '),
                151 => actions.release(' '),
                _ => {}
            }
        }
        if frame >= 200 {
            let turn = FRAC_PI_2 * (frame - 200) as f32 / (FRAMES - 200) as f32;
            scene.insert_resource(CameraYaw(turn));
        }

        scene.update(DT);
        if let Some(actions) = scene.get_resource_mut::<ActionMap<char>>() {
            actions.clear_just();
        }

        if frame % 25 == 0 {
            let p = scene.get::<Transform>(player).map(|t| t.translation).unwrap_or_default();
            log::info!(
                "frame {frame:3}: pos=({:6.2}, {:6.2}, {:6.2}) floor={} wall={} normal={}",
                p.x,
                p.y,
                p.z,
                is_on_floor(&scene, player),
                is_on_wall(&scene, player),
                floor_normal(&scene, player),
            );
        }
    }
}
