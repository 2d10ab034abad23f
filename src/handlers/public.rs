use axum::http::Uri;
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::Json;

/// API version the site's front end reads from `/`.
pub const API_VERSION: &str = "2.0";

#[derive(Serialize)]
pub struct ApiInfo {
    message: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub async fn root() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "IPTVUSCA API",
        version: API_VERSION,
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Unknown paths, and unsupported methods on known paths.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("Route {} not found", uri.path()))
}
