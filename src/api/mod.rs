use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use self::rest::router as rest_router;

pub mod rest;

use crate::infrastructure::config::Config;

pub fn build_router(config: Arc<Config>) -> Router {
    let router = Router::new()
        .nest("/api", rest_router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http());

    match cors_layer(config.as_ref()) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "not_found"})),
    )
}

fn cors_layer(config: &Config) -> Option<CorsLayer> {
    if config.app.cors_origins.is_empty() {
        return None;
    }

    let origins: Vec<HeaderValue> = config
        .app
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%origin, error = %err, "ignoring invalid cors origin");
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
