// CORS configuration built from the server config

use axum::http::{header, HeaderValue};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

use crate::config::ServerConfig;

/// Allow-listed origins with credentials. Methods and headers are mirrored
/// from the preflight request, which is how "any" is expressed once
/// credentials are allowed.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins(config)))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .expose_headers([header::CONTENT_DISPOSITION])
}

fn allowed_origins(config: &ServerConfig) -> Vec<HeaderValue> {
    let mut origins = Vec::with_capacity(config.cors_allowed_origins.len());
    for origin in &config.cors_allowed_origins {
        if origin == "*" {
            warn!("Ignoring wildcard CORS origin, credentials require explicit origins");
            continue;
        }
        match HeaderValue::from_str(origin) {
            Ok(value) if !origins.contains(&value) => origins.push(value),
            Ok(_) => {}
            Err(e) => warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin"),
        }
    }
    origins
}
