//! Admin registration routes

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use tourney_admin::error::AdminError;
use tourney_admin::models::{AdminUser, Registration, RegistrationPage, RegistrationStats};
use tourney_admin::services::{AuthService, ListParams, RegistrationService};

use crate::state::AppState;

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: AdminUser,
}

/// Query parameters for the registration list view
#[derive(Debug, Deserialize)]
pub struct ListRegistrationsParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Status update request body
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// Configure admin registration routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(login))
        .route("/registrations", get(list_registrations))
        .route(
            "/registrations/{id}",
            get(get_registration)
                .patch(update_registration_status)
                .delete(delete_registration),
        )
        .route("/stats", get(get_stats))
}

/// Authenticate the admin user. Stateless: no token or session is issued.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AdminError> {
    let service = AuthService::new(state.verifier.clone());
    let user = service.login(&request.username, &request.password)?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user,
    }))
}

/// List registrations with pagination, search, and status filtering
async fn list_registrations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListRegistrationsParams>,
) -> Result<Json<RegistrationPage>, AdminError> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(10);
    if page == 0 {
        return Err(AdminError::Validation("page must be >= 1".to_string()));
    }
    if !(1..=100).contains(&limit) {
        return Err(AdminError::Validation(
            "limit must be between 1 and 100".to_string(),
        ));
    }

    let service = RegistrationService::new(state.store.clone());
    let listing = service
        .list(ListParams {
            page,
            limit,
            search: params.search,
            status: params.status,
        })
        .await?;

    Ok(Json(listing))
}

/// Fetch a single registration document
async fn get_registration(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Registration>, AdminError> {
    let service = RegistrationService::new(state.store.clone());
    let registration = service.get(&id).await?;
    Ok(Json(registration))
}

/// Update the review status of a registration
async fn update_registration_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<serde_json::Value>, AdminError> {
    let service = RegistrationService::new(state.store.clone());
    let registration = service.update_status(&id, &request.status).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Status updated to {}", request.status),
        "data": registration
    })))
}

/// Delete a registration document
async fn delete_registration(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AdminError> {
    let service = RegistrationService::new(state.store.clone());
    service.delete(&id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Registration deleted successfully"
    })))
}

/// Dashboard statistics. Never fails: store errors degrade to zero counts.
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<RegistrationStats> {
    let service = RegistrationService::new(state.store.clone());
    Json(service.stats().await)
}
