//! Settings routes - the registration open/close flag

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use tourney_admin::error::AdminError;
use tourney_admin::services::{SettingsPatch, SettingsService};

use crate::state::AppState;

/// Configure settings routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/settings", get(get_settings).patch(update_settings))
        .route(
            "/settings/public/registration-status",
            get(public_registration_status),
        )
}

/// Current application settings
async fn get_settings(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let service = SettingsService::new(state.settings.clone());
    let settings = service.get().await;
    Json(json!({ "registration_open": settings.registration_open }))
}

/// Update application settings. Absent fields keep their stored value.
async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<serde_json::Value>, AdminError> {
    let service = SettingsService::new(state.settings.clone());
    let settings = service.update(patch).await?;
    Ok(Json(json!({ "registration_open": settings.registration_open })))
}

/// Public read of the registration-open flag, used by the signup form
async fn public_registration_status(
    State(state): State<Arc<AppState>>,
) -> Json<serde_json::Value> {
    let service = SettingsService::new(state.settings.clone());
    let settings = service.get().await;
    Json(json!({ "registration_open": settings.registration_open }))
}
