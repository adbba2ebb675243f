//! Endpoint tests for application settings

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use tourney_admin::services::StaticCredentials;
use tourney_admin::settings::SettingsStore;
use tourney_admin::store::MemoryStore;

use tourney_admin_server::config::Config;
use tourney_admin_server::routes::build_router;
use tourney_admin_server::state::AppState;

fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let state = Arc::new(AppState {
        store: Arc::new(MemoryStore::new()),
        settings: Arc::new(SettingsStore::new(dir.path().join("settings.json"))),
        verifier: Arc::new(StaticCredentials::new("admin", "0000")),
        config: Config::default(),
    });
    (build_router(state), dir)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_settings_default_to_registration_open() {
    let (app, _dir) = test_app();

    let (status, body) = send(&app, Method::GET, "/api/admin/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "registration_open": true }));
}

#[tokio::test]
async fn test_patch_flips_flag_for_all_readers() {
    let (app, _dir) = test_app();

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/admin/settings",
        Some(json!({ "registration_open": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "registration_open": false }));

    let (_, admin_view) = send(&app, Method::GET, "/api/admin/settings", None).await;
    assert_eq!(admin_view, json!({ "registration_open": false }));

    let (status, public_view) = send(
        &app,
        Method::GET,
        "/api/admin/settings/public/registration-status",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(public_view, json!({ "registration_open": false }));
}

#[tokio::test]
async fn test_empty_patch_leaves_settings_unchanged() {
    let (app, _dir) = test_app();

    send(
        &app,
        Method::PATCH,
        "/api/admin/settings",
        Some(json!({ "registration_open": false })),
    )
    .await;

    let (status, body) = send(&app, Method::PATCH, "/api/admin/settings", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "registration_open": false }));
}

#[tokio::test]
async fn test_corrupt_settings_file_reads_as_open() {
    let (app, dir) = test_app();
    std::fs::write(dir.path().join("settings.json"), b"{broken").unwrap();

    let (status, body) = send(&app, Method::GET, "/api/admin/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "registration_open": true }));
}

#[tokio::test]
async fn test_patch_preserves_unknown_keys_on_disk() {
    let (app, dir) = test_app();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, br#"{"registration_open": true, "theme": "dark"}"#).unwrap();

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/admin/settings",
        Some(json!({ "registration_open": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let raw: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(raw["registration_open"], Value::Bool(false));
    assert_eq!(raw["theme"], "dark");
}

#[tokio::test]
async fn test_public_endpoint_defaults_to_open() {
    let (app, _dir) = test_app();

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/admin/settings/public/registration-status",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "registration_open": true }));
}
