use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::AppState;
use crate::extractors::Json;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Any JSON value; anything but a string is a wrong password.
    #[serde(default)]
    pub password: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> (StatusCode, Json<LoginResponse>) {
    let token = match &input.password {
        Some(Value::String(password)) => state.admin.login(password),
        _ => None,
    };

    match token {
        Some(token) => (
            StatusCode::OK,
            Json(LoginResponse {
                success: true,
                token: Some(token),
                error: None,
            }),
        ),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                token: None,
                error: Some("Invalid password".into()),
            }),
        ),
    }
}
