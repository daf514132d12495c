//! HTTP Routes
//!
//! - `GET /health` - Liveness probe
//! - `POST /convert-pdf` - Multipart PDF upload, returns the `.docx`
//!
//! CORS and request tracing apply to every route.

pub mod convert;
pub mod health;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::cors_layer;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let cors = cors_layer(&state.config.server);

    Router::new()
        .merge(convert::router(state.clone()))
        .merge(health::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
