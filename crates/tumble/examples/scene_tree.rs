//! Scene tree — hierarchy walk and per-entity system hooks.
//!
//! Builds a small solar system, prints it through a system's pre/post
//! hooks, then re-parents and destroys entities to show how the walk
//! follows the tree.
//!
//! Run with: `RUST_LOG=debug cargo run -p tumble --example scene_tree`

use tumble::prelude::*;

// ── Components ───────────────────────────────────────────────────────────

struct Orbit {
    speed: f32,
}

// ── Systems ──────────────────────────────────────────────────────────────

/// Prints the tree, indenting on entry and dedenting on exit.
#[derive(Default)]
struct TreePrinter {
    depth: usize,
}

impl System for TreePrinter {
    fn on_pre_update(&mut self, scene: &mut Scene, entity: Entity, _dt: f32) {
        let name = scene.entity_name(entity).unwrap_or("?");
        println!("{}{name} ({entity})", "  ".repeat(self.depth));
        self.depth += 1;
    }

    fn on_post_update(&mut self, _scene: &mut Scene, _entity: Entity, _dt: f32) {
        self.depth -= 1;
    }
}

fn orbit(scene: &mut Scene, dt: f32) {
    for entity in scene.view::<(Orbit, Transform)>() {
        let Some(speed) = scene.get::<Orbit>(entity).map(|o| o.speed) else {
            continue;
        };
        if let Some(transform) = scene.get_mut::<Transform>(entity) {
            transform.rotation *= Quat::from_rotation_z(speed * dt);
        }
    }
}

fn main() {
    env_logger::init();

    let mut scene = Scene::new("solar_system");
    let sun = scene.create_entity("sun");
    let earth = scene
        .spawn("earth")
        .child_of(sun)
        .insert(Orbit { speed: 1.0 })
        .id();
    scene
        .spawn("moon")
        .child_of(earth)
        .insert(Orbit { speed: 4.0 });
    let mars = scene
        .spawn("mars")
        .child_of(sun)
        .insert(Orbit { speed: 0.5 })
        .id();
    let phobos = scene.create_child(mars, "phobos");
    scene.create_entity("comet");

    scene.add_system(orbit);
    scene.create_system::<TreePrinter>();
    println!("systems: {:?}", scene.system_names());

    println!("\n-- initial --");
    scene.update(1.0 / 60.0);

    // The comet is captured by Mars.
    let comet = scene.root_entities().into_iter().find(|&e| scene.entity_name(e) == Some("comet"));
    if let Some(comet) = comet {
        scene.set_parent(comet, mars);
    }
    // A cycle is refused; the tree is unchanged.
    if !scene.set_parent(sun, phobos) {
        println!("\nrefused to put the sun under phobos");
    }
    println!("\n-- comet captured --");
    scene.update(1.0 / 60.0);

    // Destroying Earth orphans the moon, which becomes a root.
    scene.destroy_entity(earth);
    println!("\n-- earth destroyed --");
    scene.update(1.0 / 60.0);

    let mut order = Vec::new();
    scene.traverse(
        |scene, e| order.push(scene.entity_name(e).unwrap_or("?").to_string()),
        |_, _| {},
    );
    println!("\nvisit order: {}", order.join(" -> "));
    println!("{} entities, {} roots", scene.entity_count(), scene.root_entities().len());
}
