use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::db::AppState;
use crate::error::AppError;
use crate::util::extract_bearer_token;

/// Guard for settings writes.
///
/// Passes everything through unless `require_admin_token` is set, in which
/// case the request needs `Authorization: Bearer <token>` from /admin/login.
pub async fn admin_write_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.require_admin_token {
        let token = extract_bearer_token(request.headers())
            .ok_or_else(|| AppError::Unauthorized("Missing admin token".into()))?;
        if !state.admin.verify(token) {
            return Err(AppError::Unauthorized("Invalid admin token".into()));
        }
    }
    Ok(next.run(request).await)
}
