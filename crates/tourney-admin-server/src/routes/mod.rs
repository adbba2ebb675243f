//! HTTP routes for the admin server

pub mod admin;
pub mod settings;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde_json::json;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;

/// Build the full application router
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.cors_allowed_origins.as_deref());

    let api = admin::routes().merge(settings::routes());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/admin", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS configuration: explicit origins when configured, open otherwise
fn cors_layer(allowed: Option<&str>) -> CorsLayer {
    let entries: Vec<&str> = allowed
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .collect();

    if entries.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    // A configured list stays restrictive even when no entry parses.
    let mut origins = Vec::new();
    for origin in entries {
        match origin.parse::<HeaderValue>() {
            Ok(value) => origins.push(value),
            Err(_) => warn!(origin, "ignoring unparseable CORS origin"),
        }
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "name": "Tourney Admin API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
