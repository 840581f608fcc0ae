//! Host services behind the `feedhub-platform` traits: the HTTP client, the
//! preference file, and the worker thread that keeps network calls off the UI.

mod error;
mod http;
mod store;
mod worker;

pub use crate::error::IoError;
pub use crate::http::HttpFeedbackApi;
pub use crate::store::{default_preferences_path, MemoryPreferenceStore, TomlPreferenceStore};
pub use crate::worker::{spawn_api_worker, ApiCommand, ApiEvent, ApiHandles};
