//! Platformer — a box with gravity on a floor with a ledge.
//!
//! Headless: the loop below plays a short script of key presses through the
//! `ActionMap<char>` resource and logs where the player ends up.
//!
//! - **A / D** — walk
//! - **Space** — jump (only from the floor)
//!
//! Run with: `RUST_LOG=info cargo run -p tumble --example platformer_2d`

use tumble::prelude::*;
use tumble::systems::{JUMP, MOVE_DOWN, MOVE_LEFT, MOVE_RIGHT, MOVE_UP};

const DT: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let mut scene = Scene::new("platformer");
    scene.set_builder(build);
    scene.rebuild();

    let Some(&player) = scene.view::<(CharacterBody2d,)>().first() else {
        return;
    };

    for frame in 0..240 {
        script(&mut scene, frame);
        scene.update(DT);
        if let Some(actions) = scene.get_resource_mut::<ActionMap<char>>() {
            actions.clear_just();
        }

        if frame % 30 == 0 {
            let p = scene.get::<Transform>(player).map(|t| t.translation).unwrap_or_default();
            log::info!(
                "frame {frame:3}: pos=({:7.2}, {:7.2}) floor={} wall={}",
                p.x,
                p.y,
                is_on_floor(&scene, player),
                is_on_wall(&scene, player),
            );
        }
    }

    // Reset to the initial layout.
    scene.rebuild();
    log::info!("rebuilt '{}' with {} entities", scene.name(), scene.entity_count());
}

fn build(scene: &mut Scene) {
    let mut actions = ActionMap::new();
    actions.bind(MOVE_LEFT, 'a', 1.0);
    actions.bind(MOVE_RIGHT, 'd', 1.0);
    actions.bind(MOVE_UP, 'w', 1.0);
    actions.bind(MOVE_DOWN, 's', 1.0);
    actions.bind(JUMP, ' ', 1.0);
    scene.insert_resource(actions);

    let world = scene.spawn("world").id();

    // y grows downward, so the floor sits below the player.
    scene
        .spawn("floor")
        .child_of(world)
        .insert(Transform::from_xy(0.0, 200.0))
        .insert(Collider::new_2d())
        .insert(BoxShape2d::new(800.0, 40.0))
        .insert(StaticBody);

    // Ledge to walk into.
    scene
        .spawn("ledge")
        .child_of(world)
        .insert(Transform::from_xy(120.0, 150.0))
        .insert(Collider::new_2d())
        .insert(BoxShape2d::new(40.0, 60.0))
        .insert(StaticBody);

    scene
        .spawn("player")
        .insert(Transform::from_xy(0.0, 100.0))
        .insert(Collider::new_2d())
        .insert(BoxShape2d::new(20.0, 20.0))
        .insert(Velocity2d(Vec2::ZERO))
        .insert(CharacterBody2d {
            speed: 150.0,
            use_gravity: true,
            ..Default::default()
        })
        .insert(CollisionLayer::new(
            CollisionLayer::PLAYER,
            CollisionLayer::mask(&[CollisionLayer::DEFAULT, CollisionLayer::ENVIRONMENT]),
        ));

    scene.create_system::<PlatformerMovement2d<char>>();
}

/// Walk right into the ledge, jump, then walk back.
fn script(scene: &mut Scene, frame: u32) {
    let Some(actions) = scene.get_resource_mut::<ActionMap<char>>() else {
        return;
    };
    match frame {
        60 => actions.press('d'),
        120 => actions.press(' '),
        121 => actions.release(' '),
        150 => {
            actions.release('d');
            actions.press('a');
        }
        210 => actions.release('a'),
        _ => {}
    }
}
