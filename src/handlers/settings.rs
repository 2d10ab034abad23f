use axum::extract::State;
use serde::Serialize;
use serde_json::Value;

use crate::db::AppState;
use crate::error::Result;
use crate::extractors::Json;
use crate::models::SiteSettings;

#[derive(Debug, Serialize)]
pub struct SettingsSaved {
    pub success: bool,
    pub settings: SiteSettings,
}

pub async fn get_settings(State(state): State<AppState>) -> Result<Json<SiteSettings>> {
    let settings = state.settings.get_settings()?;
    Ok(Json(settings))
}

/// PUT or POST /settings with a full or partial document.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(input): Json<Value>,
) -> Result<Json<SettingsSaved>> {
    let settings = state.settings.update_settings(input)?;

    tracing::info!(
        "ADMIN: Saved site settings (updated at {:?})",
        settings.updated_at
    );

    Ok(Json(SettingsSaved {
        success: true,
        settings,
    }))
}

pub async fn reset_settings(State(state): State<AppState>) -> Result<Json<SettingsSaved>> {
    let settings = state.settings.reset_settings()?;
    Ok(Json(SettingsSaved {
        success: true,
        settings,
    }))
}
