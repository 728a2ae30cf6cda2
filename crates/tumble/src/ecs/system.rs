//! # System — Behaviour That Runs Over the Scene
//!
//! A system is a small object with up to three hooks:
//!
//! - [`System::on_update`] runs once per frame, in registration order.
//! - [`System::on_pre_update`] runs for every entity when the depth-first
//!   hierarchy walk *enters* it.
//! - [`System::on_post_update`] runs for every entity when the walk *leaves*
//!   it (after all of its descendants).
//!
//! All hooks default to doing nothing, so a system only implements what it
//! needs. Any `FnMut(&mut Scene, f32)` is also a system; it gets `on_update`.
//!
//! ## Schedule
//!
//! A [`Schedule`] is just a `Vec` of boxed systems. Systems run in the order
//! they're added; there is no parallelism and no dependency graph.

use super::entity::Entity;
use super::scene::Scene;

/// A unit of per-frame behaviour registered on a [`Scene`].
pub trait System {
    /// Called once per frame before the hierarchy walk.
    fn on_update(&mut self, _scene: &mut Scene, _dt: f32) {}

    /// Called when the hierarchy walk enters `entity`.
    fn on_pre_update(&mut self, _scene: &mut Scene, _entity: Entity, _dt: f32) {}

    /// Called when the hierarchy walk leaves `entity`.
    fn on_post_update(&mut self, _scene: &mut Scene, _entity: Entity, _dt: f32) {}
}

/// Blanket impl: any `FnMut(&mut Scene, f32)` is a per-frame `System`.
impl<F: FnMut(&mut Scene, f32)> System for F {
    fn on_update(&mut self, scene: &mut Scene, dt: f32) {
        (self)(scene, dt);
    }
}

/// A boxed [`System`] with a short name for logs.
struct NamedSystem {
    name: String,
    system: Box<dyn System>,
}

/// An ordered list of systems.
pub struct Schedule {
    systems: Vec<NamedSystem>,
}

impl Schedule {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    /// Add a system to the end of the schedule.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.add_boxed(short_system_name(std::any::type_name::<S>()), Box::new(system));
    }

    /// Add an already boxed system under the given name.
    pub fn add_boxed(&mut self, name: String, system: Box<dyn System>) {
        log::debug!("registered system `{}`", name);
        self.systems.push(NamedSystem { name, system });
    }

    /// Move every system from `other` onto the end of this schedule.
    pub fn append(&mut self, other: &mut Schedule) {
        self.systems.append(&mut other.systems);
    }

    /// Run every system's `on_update` hook in order.
    pub fn run_update(&mut self, scene: &mut Scene, dt: f32) {
        for ns in &mut self.systems {
            ns.system.on_update(scene, dt);
        }
    }

    /// Like [`run_update`](Self::run_update), but stops as soon as a system
    /// clears `scene`'s system list (directly or by rebuilding it).
    pub(crate) fn run_update_until_cleared(&mut self, scene: &mut Scene, dt: f32) {
        let epoch = scene.schedule_epoch();
        for ns in &mut self.systems {
            if scene.schedule_epoch() != epoch {
                log::debug!("system list cleared, skipping `{}` and later systems", ns.name);
                break;
            }
            ns.system.on_update(scene, dt);
        }
    }

    /// Run every system's `on_pre_update` hook for one entity.
    pub fn run_pre(&mut self, scene: &mut Scene, entity: Entity, dt: f32) {
        for ns in &mut self.systems {
            ns.system.on_pre_update(scene, entity, dt);
        }
    }

    /// Run every system's `on_post_update` hook for one entity.
    pub fn run_post(&mut self, scene: &mut Scene, entity: Entity, dt: f32) {
        for ns in &mut self.systems {
            ns.system.on_post_update(scene, entity, dt);
        }
    }

    /// Short names of the registered systems, in run order.
    pub fn names(&self) -> Vec<&str> {
        self.systems.iter().map(|ns| ns.name.as_str()).collect()
    }

    /// Returns the number of systems in this schedule.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Drop every system.
    pub fn clear(&mut self) {
        self.systems.clear();
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip the module path from a fully-qualified type name, keeping only the
/// last meaningful segment (e.g. `demo::gravity_system` → `gravity_system`,
/// `{{closure}}` → `<closure>`).
fn short_system_name(full: &str) -> String {
    // Generic arguments may contain `::`, so cut them off first.
    let base = full.split('<').next().unwrap_or(full);
    let name = base.rsplit("::").next().unwrap_or(base);
    if name.contains("closure") {
        "<closure>".to_string()
    } else {
        name.to_string()
    }
}
