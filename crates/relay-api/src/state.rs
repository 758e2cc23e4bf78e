//! Shared application state.

use std::sync::Arc;

use relay_core::integration::IntegrationRepository;
use relay_pipeline::application::pipeline::EventPipeline;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The event pipeline; built once at startup.
    pub pipeline: Arc<EventPipeline>,
    /// Integration records, for status queries.
    pub integrations: Arc<dyn IntegrationRepository>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        pipeline: Arc<EventPipeline>,
        integrations: Arc<dyn IntegrationRepository>,
    ) -> Self {
        Self {
            pipeline,
            integrations,
        }
    }
}
