//! Native egui front end for Feedhub.

use std::sync::Arc;

use feedhub_core::HubConfig;
use feedhub_platform::{FeedbackApi, PreferenceStore};
use tracing::info;

mod app;
mod stars;
mod surface;
mod views;

pub use crate::app::FeedbackHubApp;
pub use crate::surface::ShapeSurface;

/// Opens the window and blocks until it is closed.
pub fn run_ui(
    config: HubConfig,
    api: Arc<dyn FeedbackApi>,
    store: Box<dyn PreferenceStore>,
) -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Feedback Hub")
            .with_inner_size([720.0, 820.0]),
        ..Default::default()
    };
    info!("UI: opening window");
    eframe::run_native(
        "Feedback Hub",
        native_options,
        Box::new(move |creation_context| {
            Ok(Box::new(FeedbackHubApp::new(creation_context, &config, api, store)))
        }),
    )
}
