//! Platform abstraction traits so `feedhub-core` stays host-agnostic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Size of the area a [`Surface`] covers, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha scaled by `opacity` (clamped to `0..=1`).
    pub fn faded(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self {
            a: (self.a as f32 * opacity).round() as u8,
            ..self
        }
    }
}

/// Feedback as the client sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub rating: u8,
    pub comments: String,
}

impl Default for NewFeedback {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            rating: 5,
            comments: String::new(),
        }
    }
}

/// Feedback as the server stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub rating: u8,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Drawing target owned by the particle animator.
pub trait Surface {
    fn viewport(&self) -> Viewport;
    fn resize(&mut self, viewport: Viewport);
    fn clear(&mut self);
    /// Filled rectangle of `size`, centered on `center`, rotated by
    /// `rotation_deg` around its center.
    fn fill_rotated_rect(
        &mut self,
        center: [f32; 2],
        size: [f32; 2],
        rotation_deg: f32,
        color: Rgba,
    );
}

/// Remote feedback collection (the external CRUD service).
pub trait FeedbackApi: Send + Sync {
    /// Latest records, newest first.
    fn list(&self) -> Result<Vec<Feedback>>;
    fn create(&self, feedback: &NewFeedback) -> Result<Feedback>;
}

/// String key/value store for user preferences that survive restarts.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faded_scales_alpha_and_clamps() {
        let red = Rgba::rgb(255, 0, 0);
        assert_eq!(red.faded(0.5).a, 128);
        assert_eq!(red.faded(-1.0).a, 0);
        assert_eq!(red.faded(3.0).a, 255);
        assert_eq!(red.faded(0.5).r, 255);
    }

    #[test]
    fn feedback_tolerates_missing_optional_fields() {
        let json = r#"{"id": 7, "name": "Aarti Singh", "rating": 4}"#;
        let fb: Feedback = serde_json::from_str(json).unwrap();
        assert_eq!(fb.id, 7);
        assert!(fb.comments.is_empty());
        assert!(fb.created_at.is_none());
    }

    #[test]
    fn feedback_parses_server_timestamps() {
        let json = r#"{"id":1,"name":"a","email":"a@b.com","rating":5,"comments":"","created_at":"2025-03-01T10:20:30.123456Z"}"#;
        let fb: Feedback = serde_json::from_str(json).unwrap();
        assert!(fb.created_at.is_some());
    }

    #[test]
    fn new_feedback_defaults_to_five_stars() {
        let draft = NewFeedback::default();
        assert_eq!(draft.rating, 5);
        assert!(draft.name.is_empty());
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["rating"], 5);
        assert_eq!(body["comments"], "");
    }
}
