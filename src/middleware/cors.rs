//! Middleware de CORS
//!
//! Sin orígenes configurados se permite cualquier origen (desarrollo).

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::warn;

/// Construir la capa de CORS a partir de `CORS_ORIGINS`
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::very_permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("⚠️ Origen CORS inválido ignorado: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
