use serde::{Deserialize, Serialize};

use crate::ecs::Scene;

/// Tuning shared by every move call on a scene.
///
/// Stored as a scene resource; a scene without one uses the defaults. Values
/// read from a document are clamped the same way as
/// [`set_slide_settings`] clamps them.
///
/// ```
/// use tumble::physics::SlideSettings;
///
/// let s: SlideSettings = serde_json::from_str(r#"{ "max_slides": 8 }"#).unwrap();
/// assert_eq!(s.max_slides, 8);
/// assert_eq!(s.epsilon, 0.001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideSettings {
    /// Contact nudge distance, and the displacement below which motion stops.
    pub epsilon: f32,
    /// Upper bound on sweep/slide iterations per call.
    pub max_slides: u32,
    /// Minimum normal component for a contact to count as floor, wall, or
    /// ceiling.
    pub floor_dot: f32,
}

impl SlideSettings {
    pub const MIN_EPSILON: f32 = 0.00001;

    /// Raise `epsilon` and `max_slides` to their minimums if needed.
    pub fn clamped(self) -> Self {
        Self {
            epsilon: self.epsilon.max(Self::MIN_EPSILON),
            max_slides: self.max_slides.max(1),
            ..self
        }
    }
}

impl Default for SlideSettings {
    fn default() -> Self {
        Self {
            epsilon: 0.001,
            max_slides: 4,
            floor_dot: 0.7,
        }
    }
}

/// Change epsilon and the iteration cap for all later move calls on `scene`.
/// `epsilon` is clamped to at least [`SlideSettings::MIN_EPSILON`] and
/// `max_slides` to at least 1.
pub fn set_slide_settings(scene: &mut Scene, epsilon: f32, max_slides: u32) {
    let current = slide_settings(scene);
    let settings = SlideSettings {
        epsilon,
        max_slides,
        ..current
    }
    .clamped();
    log::debug!(
        "slide settings: epsilon={} max_slides={}",
        settings.epsilon,
        settings.max_slides
    );
    scene.insert_resource(settings);
}

/// The scene's settings, or the defaults.
pub fn slide_settings(scene: &Scene) -> SlideSettings {
    scene
        .get_resource::<SlideSettings>()
        .copied()
        .unwrap_or_default()
        .clamped()
}
