//! Key state and named actions.
//!
//! The host owns the real keyboard. Each frame it forwards key transitions
//! into an [`ActionMap`] resource (`press` / `release`), lets the scene
//! update, then calls `clear_just`. Movement systems only ever ask about
//! named actions, so any key type works.
//!
//! ```
//! use tumble::input::ActionMap;
//!
//! let mut actions = ActionMap::new();
//! actions.bind("move_right", 'd', 1.0);
//! actions.bind("move_left", 'a', 1.0);
//!
//! actions.press('d');
//! assert_eq!(actions.action_axis("move_left", "move_right"), 1.0);
//! ```

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::math::Vec2;

/// Tracks the state of a set of inputs (keys or buttons).
///
/// - `pressed`: currently held down
/// - `just_pressed`: pressed this frame (not held last frame)
/// - `just_released`: released this frame
pub struct Input<T: Eq + Hash + Copy> {
    pressed: HashSet<T>,
    just_pressed: HashSet<T>,
    just_released: HashSet<T>,
}

impl<T: Eq + Hash + Copy> Input<T> {
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    /// Returns `true` if the input is currently held down.
    pub fn pressed(&self, input: T) -> bool {
        self.pressed.contains(&input)
    }

    /// Returns `true` if the input was pressed this frame.
    pub fn just_pressed(&self, input: T) -> bool {
        self.just_pressed.contains(&input)
    }

    /// Returns `true` if the input was released this frame.
    pub fn just_released(&self, input: T) -> bool {
        self.just_released.contains(&input)
    }

    /// Call when an input goes down. Repeats while held are ignored.
    pub fn press(&mut self, input: T) {
        if self.pressed.insert(input) {
            self.just_pressed.insert(input);
        }
    }

    /// Call when an input goes up.
    pub fn release(&mut self, input: T) {
        if self.pressed.remove(&input) {
            self.just_released.insert(input);
        }
    }

    /// Clear per-frame state. Call once at the end of each frame.
    pub fn clear_just(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl<T: Eq + Hash + Copy> Default for Input<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct Binding<T> {
    key: T,
    scale: f32,
}

/// Named actions bound to keys, plus the key state they're read from.
pub struct ActionMap<T: Eq + Hash + Copy> {
    actions: HashMap<String, Vec<Binding<T>>>,
    input: Input<T>,
}

impl<T: Eq + Hash + Copy> ActionMap<T> {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
            input: Input::new(),
        }
    }

    /// Declare an action with no bindings. No-op if it already exists.
    pub fn add_action(&mut self, action: &str) {
        self.actions.entry(action.to_string()).or_default();
    }

    /// Bind `key` to `action` with a strength `scale`. Creates the action if
    /// needed; a key may be bound to several actions.
    pub fn bind(&mut self, action: &str, key: T, scale: f32) {
        self.actions
            .entry(action.to_string())
            .or_default()
            .push(Binding { key, scale });
    }

    /// Remove every binding of `action`, keeping the action itself.
    pub fn clear_action(&mut self, action: &str) {
        if let Some(bindings) = self.actions.get_mut(action) {
            bindings.clear();
        }
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.actions.contains_key(action)
    }

    pub fn input(&self) -> &Input<T> {
        &self.input
    }

    pub fn press(&mut self, key: T) {
        self.input.press(key);
    }

    pub fn release(&mut self, key: T) {
        self.input.release(key);
    }

    pub fn clear_just(&mut self) {
        self.input.clear_just();
    }

    fn bindings(&self, action: &str) -> &[Binding<T>] {
        self.actions.get(action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any key bound to `action` is held.
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.bindings(action).iter().any(|b| self.input.pressed(b.key))
    }

    /// Whether any key bound to `action` went down this frame.
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.bindings(action)
            .iter()
            .any(|b| self.input.just_pressed(b.key))
    }

    /// Whether any key bound to `action` went up this frame.
    pub fn is_action_just_released(&self, action: &str) -> bool {
        self.bindings(action)
            .iter()
            .any(|b| self.input.just_released(b.key))
    }

    /// Sum of the scales of every held binding, clamped to `[-1, 1]`.
    /// Unknown actions read as 0.
    pub fn action_strength(&self, action: &str) -> f32 {
        self.bindings(action)
            .iter()
            .filter(|b| self.input.pressed(b.key))
            .map(|b| b.scale)
            .sum::<f32>()
            .clamp(-1.0, 1.0)
    }

    /// `positive - negative` strength, in `[-1, 1]`.
    pub fn action_axis(&self, negative: &str, positive: &str) -> f32 {
        self.action_strength(positive) - self.action_strength(negative)
    }

    /// Two axes combined, scaled down to unit length if longer.
    pub fn action_axis_2d(
        &self,
        negative_x: &str,
        positive_x: &str,
        negative_y: &str,
        positive_y: &str,
    ) -> Vec2 {
        let axis = Vec2::new(
            self.action_axis(negative_x, positive_x),
            self.action_axis(negative_y, positive_y),
        );
        if axis.length() > 1.0 {
            axis.normalize()
        } else {
            axis
        }
    }
}

impl<T: Eq + Hash + Copy> Default for ActionMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
