mod admin;
mod public;
mod settings;

pub use admin::*;
pub use public::*;
pub use settings::*;

use axum::{
    Router,
    http::{Method, header},
    middleware,
    routing::{get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::db::AppState;
use crate::middleware::admin_write_auth;

/// CORS policy for the public site and admin page. OPTIONS on any path is
/// answered here with 200 and never reaches the router.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn router(state: AppState) -> Router {
    let write_auth = middleware::from_fn_with_state(state.clone(), admin_write_auth);

    let settings_writes = put(update_settings)
        .post(update_settings)
        .route_layer(write_auth.clone());

    Router::new()
        .route("/", get(root).fallback(route_not_found))
        .route("/root", get(root).fallback(route_not_found))
        .route("/health", get(health).fallback(route_not_found))
        .route(
            "/settings",
            get(get_settings)
                .merge(settings_writes)
                .fallback(route_not_found),
        )
        .route(
            "/settings/reset",
            post(reset_settings)
                .route_layer(write_auth)
                .fallback(route_not_found),
        )
        .route("/admin/login", post(login).fallback(route_not_found))
        .fallback(route_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}
