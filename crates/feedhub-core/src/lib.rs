//! Feedhub core: platform-agnostic logic for the confetti animator, the rating
//! input, the feedback form, and the theme shell.

pub mod confetti;
pub mod config;
pub mod error;
pub mod form;
pub mod rating;
pub mod theme;

pub use confetti::{Confetti, FireOptions, FrameOutcome, Particle};
pub use config::{ApiConfig, CelebrationConfig, ConfettiConfig, HubConfig, ShellConfig};
pub use error::CoreError;
pub use form::{validate, FeedbackForm, Field, SubmitOutcome, ValidationErrors};
pub use rating::{RatingEvent, RatingInput, RatingKey};
pub use theme::{Theme, ThemeState};
