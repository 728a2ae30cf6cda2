//! # Entity Hierarchies — Parent/Child Relationships
//!
//! Every entity made by [`Scene::create_entity`] carries a [`Node`]: its
//! parent (or [`Entity::INVALID`] for a root) and an ordered child list. The
//! two sides are kept mutually consistent by [`Scene::set_parent`] and
//! [`Scene::destroy_entity`]; nothing else writes them.
//!
//! ## Usage
//!
//! ```ignore
//! let level = scene.create_entity("level");
//! let door = scene.create_child(level, "door");
//! assert_eq!(scene.parent(door), Some(level));
//!
//! scene.traverse(
//!     |scene, e| println!("enter {}", scene.entity_name(e).unwrap_or("?")),
//!     |_, _| {},
//! );
//! ```
//!
//! Transforms are not composed along the hierarchy. Callers read and write
//! world-space values directly.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::scene::Scene;

/// Human-readable entity label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Position of an entity in the scene forest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    /// [`Entity::INVALID`] for roots.
    pub parent: Entity,
    /// In insertion order.
    pub children: Vec<Entity>,
}

/// Which side of an entity the depth-first walk is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Visit {
    Enter,
    Exit,
}

impl Scene {
    /// Create an entity and attach it under `parent`. If `parent` isn't live
    /// the new entity simply stays a root.
    pub fn create_child(&mut self, parent: Entity, name: &str) -> Entity {
        let entity = self.create_entity(name);
        self.set_parent(entity, parent);
        entity
    }

    /// Move `child` under `parent`, or make it a root when `parent` is
    /// [`Entity::INVALID`].
    ///
    /// Returns `true` if the link changed. It's a no-op when the child isn't
    /// live, is already under `parent`, when `parent` isn't live, or when the
    /// move would create a cycle.
    pub fn set_parent(&mut self, child: Entity, parent: Entity) -> bool {
        let Some(old_parent) = self.get::<Node>(child).map(|n| n.parent) else {
            return false;
        };
        if old_parent == parent {
            return false;
        }
        if !parent.is_invalid() {
            if !self.has::<Node>(parent) {
                log::warn!("set_parent: {:?} is not a live scene node", parent);
                return false;
            }
            if self.is_ancestor_or_self(child, parent) {
                log::warn!("set_parent: {:?} under {:?} would form a cycle", child, parent);
                return false;
            }
        }

        if let Some(node) = self.get_mut::<Node>(old_parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.get_mut::<Node>(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.get_mut::<Node>(child) {
            node.parent = parent;
        }
        true
    }

    /// Whether `ancestor` is `entity` or appears on its parent chain.
    fn is_ancestor_or_self(&self, ancestor: Entity, entity: Entity) -> bool {
        let mut current = entity;
        // Bounded by the entity count in case the links were corrupted.
        for _ in 0..=self.entity_count() {
            if current == ancestor {
                return true;
            }
            match self.get::<Node>(current) {
                Some(node) if !node.parent.is_invalid() => current = node.parent,
                _ => return false,
            }
        }
        false
    }

    /// The entity's parent, or `None` for roots and dead entities.
    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.get::<Node>(entity)
            .map(|n| n.parent)
            .filter(|p| !p.is_invalid())
    }

    /// The entity's children in insertion order. Empty for dead entities.
    pub fn children(&self, entity: Entity) -> Vec<Entity> {
        self.get::<Node>(entity)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Every live entity with a [`Node`] and no parent, in creation order.
    pub fn root_entities(&self) -> Vec<Entity> {
        self.entities()
            .iter()
            .copied()
            .filter(|&e| self.get::<Node>(e).is_some_and(|n| n.parent.is_invalid()))
            .collect()
    }

    /// Depth-first walk of the forest: roots in creation order, children in
    /// insertion order. `pre` runs on entry, `post` after all descendants.
    ///
    /// Both callbacks get the scene mutably. Children are read after `pre`
    /// returns, so `pre` may add or remove them; children destroyed before
    /// they're reached are skipped.
    pub fn traverse(
        &mut self,
        mut pre: impl FnMut(&mut Scene, Entity),
        mut post: impl FnMut(&mut Scene, Entity),
    ) {
        self.walk(&mut |scene, entity, visit| match visit {
            Visit::Enter => pre(scene, entity),
            Visit::Exit => post(scene, entity),
        });
    }

    pub(crate) fn walk(&mut self, visit: &mut dyn FnMut(&mut Scene, Entity, Visit)) {
        let mut seen = HashSet::new();
        for root in self.root_entities() {
            self.walk_from(root, visit, &mut seen);
        }
    }

    fn walk_from(
        &mut self,
        entity: Entity,
        visit: &mut dyn FnMut(&mut Scene, Entity, Visit),
        seen: &mut HashSet<Entity>,
    ) {
        if !self.is_valid(entity) || !seen.insert(entity) {
            return;
        }
        visit(self, entity, Visit::Enter);
        for child in self.children(entity) {
            self.walk_from(child, visit, seen);
        }
        visit(self, entity, Visit::Exit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::System;

    fn names(scene: &Scene, entities: &[Entity]) -> Vec<String> {
        entities
            .iter()
            .map(|&e| scene.entity_name(e).unwrap_or("?").to_string())
            .collect()
    }

    #[test]
    fn create_child_links_both_sides() {
        let mut scene = Scene::new("test");
        let parent = scene.create_entity("parent");
        let child = scene.create_child(parent, "child");

        assert_eq!(scene.parent(child), Some(parent));
        assert_eq!(scene.children(parent), vec![child]);
        assert_eq!(scene.root_entities(), vec![parent]);
    }

    #[test]
    fn create_child_of_dead_parent_is_root() {
        let mut scene = Scene::new("test");
        let child = scene.create_child(Entity::from_raw(77), "orphan");
        assert_eq!(scene.parent(child), None);
        assert_eq!(scene.root_entities(), vec![child]);
    }

    #[test]
    fn reparent_moves_child() {
        let mut scene = Scene::new("test");
        let a = scene.create_entity("a");
        let b = scene.create_entity("b");
        let c = scene.create_child(a, "c");

        assert!(scene.set_parent(c, b));
        assert_eq!(scene.parent(c), Some(b));
        assert!(scene.children(b).contains(&c));
        assert!(!scene.children(a).contains(&c));

        // Same parent again is a no-op.
        assert!(!scene.set_parent(c, b));
        assert_eq!(scene.children(b), vec![c]);

        // Detach to root.
        assert!(scene.set_parent(c, Entity::INVALID));
        assert_eq!(scene.parent(c), None);
        assert!(scene.children(b).is_empty());
    }

    #[test]
    fn set_parent_rejects_dead_parent() {
        let mut scene = Scene::new("test");
        let a = scene.create_entity("a");
        let c = scene.create_child(a, "c");
        let dead = scene.create_entity("dead");
        scene.destroy_entity(dead);

        assert!(!scene.set_parent(c, dead));
        assert_eq!(scene.parent(c), Some(a));
    }

    #[test]
    fn set_parent_rejects_cycles() {
        let mut scene = Scene::new("test");
        let a = scene.create_entity("a");
        let b = scene.create_child(a, "b");
        let c = scene.create_child(b, "c");

        assert!(!scene.set_parent(a, c));
        assert!(!scene.set_parent(a, a));
        assert_eq!(scene.parent(a), None);
        assert_eq!(scene.root_entities(), vec![a]);
    }

    #[test]
    fn destroy_detaches_from_parent_and_orphans_children() {
        let mut scene = Scene::new("test");
        let root = scene.create_entity("root");
        let mid = scene.create_child(root, "mid");
        let leaf1 = scene.create_child(mid, "leaf1");
        let leaf2 = scene.create_child(mid, "leaf2");

        scene.destroy_entity(mid);

        assert!(scene.children(root).is_empty());
        assert_eq!(scene.parent(leaf1), None);
        assert_eq!(scene.parent(leaf2), None);
        assert_eq!(scene.root_entities(), vec![root, leaf1, leaf2]);
    }

    #[test]
    fn traverse_is_depth_first_pre_and_post() {
        let mut scene = Scene::new("test");
        let a = scene.create_entity("a");
        let b = scene.create_child(a, "b");
        scene.create_child(b, "c");
        scene.create_child(a, "d");
        scene.create_entity("e");

        let mut pre = Vec::new();
        let mut post = Vec::new();
        scene.traverse(|_, e| pre.push(e), |_, e| post.push(e));

        assert_eq!(names(&scene, &pre), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(names(&scene, &post), vec!["c", "b", "d", "a", "e"]);
    }

    #[test]
    fn traverse_sees_children_added_in_pre() {
        let mut scene = Scene::new("test");
        let a = scene.create_entity("a");

        let mut visited = Vec::new();
        scene.traverse(
            |scene, e| {
                visited.push(e);
                if e == a {
                    scene.create_child(a, "spawned");
                }
            },
            |_, _| {},
        );
        assert_eq!(names(&scene, &visited), vec!["a", "spawned"]);
    }

    #[test]
    fn traverse_skips_children_destroyed_mid_walk() {
        let mut scene = Scene::new("test");
        let a = scene.create_entity("a");
        let b = scene.create_child(a, "b");
        scene.create_child(a, "c");

        let mut visited = Vec::new();
        scene.traverse(
            |scene, e| {
                visited.push(e);
                if e == b {
                    let siblings = scene.children(a);
                    scene.destroy_entity(siblings[1]);
                }
            },
            |_, _| {},
        );
        assert_eq!(names(&scene, &visited), vec!["a", "b"]);
    }

    #[test]
    fn update_calls_hooks_around_each_entity() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Recorder(Rc<RefCell<Vec<String>>>);
        impl System for Recorder {
            fn on_update(&mut self, _scene: &mut Scene, _dt: f32) {
                self.0.borrow_mut().push("update".into());
            }
            fn on_pre_update(&mut self, scene: &mut Scene, entity: Entity, _dt: f32) {
                let name = scene.entity_name(entity).unwrap_or("?");
                self.0.borrow_mut().push(format!("pre {name}"));
            }
            fn on_post_update(&mut self, scene: &mut Scene, entity: Entity, _dt: f32) {
                let name = scene.entity_name(entity).unwrap_or("?");
                self.0.borrow_mut().push(format!("post {name}"));
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scene = Scene::new("test");
        let root = scene.create_entity("root");
        scene.create_child(root, "child");
        scene.add_system(Recorder(Rc::clone(&log)));

        scene.update(0.016);
        assert_eq!(
            *log.borrow(),
            vec!["update", "pre root", "pre child", "post child", "post root"]
        );
    }
}
