//! Collision layer filtering.
//!
//! A body's `layer` bits say what it *is*; its `mask` bits say what it may
//! collide with. Two bodies interact only if each one's mask accepts the
//! other's layer. Bodies without a [`CollisionLayer`] component behave as
//! layer 1 with a full mask.

use serde::{Deserialize, Serialize};

use crate::ecs::{Entity, Scene};

/// Layer/mask bit sets for one collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionLayer {
    pub layer: u32,
    pub mask: u32,
}

impl CollisionLayer {
    pub const NONE: u32 = 0;
    pub const ALL: u32 = u32::MAX;

    // Conventional bit assignments. Nothing in the resolver depends on them.
    pub const DEFAULT: u32 = 1 << 0;
    pub const PLAYER: u32 = 1 << 1;
    pub const ENEMY: u32 = 1 << 2;
    pub const ENVIRONMENT: u32 = 1 << 3;
    pub const TRIGGER: u32 = 1 << 4;
    pub const PICKUP: u32 = 1 << 5;

    pub fn new(layer: u32, mask: u32) -> Self {
        Self { layer, mask }
    }

    /// Symmetric filter: both masks must accept the other's layer.
    pub fn should_collide(&self, other: &CollisionLayer) -> bool {
        (self.mask & other.layer) != 0 && (other.mask & self.layer) != 0
    }

    /// OR a list of layer bits into one mask.
    ///
    /// ```
    /// use tumble::physics::CollisionLayer;
    ///
    /// let mask = CollisionLayer::mask(&[CollisionLayer::PLAYER, CollisionLayer::ENVIRONMENT]);
    /// assert_eq!(mask, 0b1010);
    /// ```
    pub fn mask(layers: &[u32]) -> u32 {
        layers.iter().fold(0, |acc, &layer| acc | layer)
    }
}

impl Default for CollisionLayer {
    fn default() -> Self {
        Self {
            layer: Self::DEFAULT,
            mask: Self::ALL,
        }
    }
}

/// The entity's layer component, or the default when it has none.
pub(crate) fn layer_of(scene: &Scene, entity: Entity) -> CollisionLayer {
    scene
        .get::<CollisionLayer>(entity)
        .copied()
        .unwrap_or_default()
}
