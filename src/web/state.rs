//! Application state shared across handlers

use crate::config::Settings;
use crate::network::HttpClient;
use crate::pipeline::Pipeline;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings, read-only after startup
    pub settings: Arc<Settings>,
    /// Request pipeline
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, client: HttpClient) -> Self {
        let pipeline = Arc::new(Pipeline::new(&settings, client));
        Self {
            settings: Arc::new(settings),
            pipeline,
        }
    }
}
