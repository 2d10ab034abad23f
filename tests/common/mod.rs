//! Shared helpers for integration tests.
#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::Value;
use tower::ServiceExt;

pub use iptvusca_site::auth::AdminGate;
pub use iptvusca_site::config::MergeBase;
pub use iptvusca_site::db::{AppState, SettingsStore};
pub use iptvusca_site::handlers;

pub const TEST_PASSWORD: &str = "admin2026";

pub fn create_test_app_state() -> AppState {
    create_test_app_state_with(MergeBase::Defaults, false)
}

pub fn create_test_app_state_with(merge_base: MergeBase, require_admin_token: bool) -> AppState {
    let mut admin = AdminGate::new(TEST_PASSWORD);
    if require_admin_token {
        admin = admin.tracking_tokens();
    }
    AppState::new(SettingsStore::in_memory(merge_base), admin, require_admin_token)
}

pub fn app(state: AppState) -> Router {
    handlers::router(state)
}

pub async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("Response should be valid JSON")
    }
}

/// Send a request through a clone of `app` and return status and JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None, None).await
}

pub async fn put_settings(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, "PUT", "/settings", Some(body), None).await
}

pub async fn login(app: &Router, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/admin/login",
        Some(serde_json::json!({ "password": password })),
        None,
    )
    .await
}
