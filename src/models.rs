use std::sync::Arc;

use crate::config::Config;
use crate::conversion::DocumentConverter;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub converter: Arc<dyn DocumentConverter>,
}

impl AppState {
    pub fn new(config: Config, converter: Arc<dyn DocumentConverter>) -> Self {
        Self { config, converter }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Body of every non-2xx response.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
