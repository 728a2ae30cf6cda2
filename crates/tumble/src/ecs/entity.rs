//! # Entity — Lightweight Identifiers for Scene Objects
//!
//! An [`Entity`] is just a number. It doesn't "contain" anything. Instead, the
//! [`Scene`](super::scene::Scene) maps entities to their components.
//!
//! ## Design: Monotonic Ids
//!
//! Recycling ids makes stale handles dangerous: a handle saved before a
//! despawn would silently point at whatever reused the slot. Generational
//! indices solve that by pairing a slot with a counter. We take the simpler
//! route: ids are a 64-bit counter that only ever goes up within a scene's
//! lifetime, so a stale handle can never alias a newer entity. Lookups with a
//! stale handle just miss.
//!
//! ```text
//! create → Entity(1)
//! create → Entity(2)
//! destroy Entity(1)
//! create → Entity(3)   ← 1 is never handed out again
//! ```
//!
//! Id `0` is reserved as [`Entity::INVALID`] and doubles as "no parent".
//! The counter only rewinds when the whole scene is cleared.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A lightweight handle to an entity in a [`Scene`](super::scene::Scene).
///
/// Handles are plain `Copy` ids. They do not borrow the scene, so every
/// operation takes the scene explicitly and treats an unknown id as a no-op.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Entity(pub(crate) u64);

impl Entity {
    /// The reserved "none" entity. Never live.
    pub const INVALID: Self = Self(0);

    /// Build a handle from a raw id. Useful for hosts that store ids
    /// externally; the handle is only meaningful if the scene knows the id.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    pub fn id(self) -> u64 {
        self.0
    }

    /// Returns `true` for the reserved invalid id. Says nothing about
    /// liveness; use [`Scene::is_valid`](super::scene::Scene::is_valid) for that.
    pub fn is_invalid(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out entity ids.
///
/// ```text
/// last: 4        ← highest id handed out so far
/// allocate() → 5
/// ```
pub(crate) struct EntityAllocator {
    /// Highest id handed out so far. `0` means nothing allocated yet.
    last: u64,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Allocate the next id. Ids start at 1 and are never reused.
    pub fn allocate(&mut self) -> Entity {
        self.last += 1;
        Entity(self.last)
    }

    /// Rewind to the initial state. Only valid once every entity is gone.
    pub fn reset(&mut self) {
        self.last = 0;
    }

    /// Highest id handed out so far.
    pub fn last(&self) -> u64 {
        self.last
    }
}
