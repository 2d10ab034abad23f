use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use super::backend::{Document, SettingsBackend};
use super::memory::MemoryBackend;
use crate::config::MergeBase;
use crate::error::{AppError, Result};
use crate::models::{SETTINGS_ID, SiteSettings};
use crate::util;

/// Storage id carried by documents written in the document-database era.
const LEGACY_ID_KEY: &str = "_id";
const CREATED_AT_KEY: &str = "createdAt";
const UPDATED_AT_KEY: &str = "updatedAt";

/// Reads and writes the singleton settings document on top of any backend.
#[derive(Clone)]
pub struct SettingsStore {
    backend: Arc<dyn SettingsBackend>,
    merge_base: MergeBase,
}

fn defaults() -> Result<Document> {
    Ok(SiteSettings::default().into_object()?)
}

/// Shallow overlay: every top-level key in `top` replaces the one in `base`.
fn overlay(base: &mut Document, top: Document) {
    for (key, value) in top {
        base.insert(key, value);
    }
}

fn merged_over_defaults(stored: Document) -> Result<Document> {
    let mut document = defaults()?;
    overlay(&mut document, stored);
    document.remove(LEGACY_ID_KEY);
    Ok(document)
}

fn timestamp(document: &Document, key: &str) -> Option<DateTime<Utc>> {
    document
        .get(key)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn timestamp_value(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl SettingsStore {
    pub fn new(backend: Arc<dyn SettingsBackend>, merge_base: MergeBase) -> Self {
        Self {
            backend,
            merge_base,
        }
    }

    /// A store over a fresh in-memory backend.
    pub fn in_memory(merge_base: MergeBase) -> Self {
        Self::new(Arc::new(MemoryBackend::new()), merge_base)
    }

    pub fn merge_base(&self) -> MergeBase {
        self.merge_base
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Current settings, merged over the defaults.
    ///
    /// The first read on an empty backend persists the default document.
    pub fn get_settings(&self) -> Result<SiteSettings> {
        match self.backend.get(SETTINGS_ID)? {
            Some(stored) => Ok(SiteSettings::from_object(merged_over_defaults(stored)?)?),
            None => {
                let now = util::now();
                let settings = SiteSettings {
                    created_at: Some(now),
                    updated_at: Some(now),
                    ..SiteSettings::default()
                };
                self.backend
                    .upsert(SETTINGS_ID, &settings.clone().into_object()?)?;
                tracing::info!(
                    "Created default site settings ({} backend)",
                    self.backend.name()
                );
                Ok(settings)
            }
        }
    }

    /// Replace the settings document with `input` overlaid on the merge base.
    ///
    /// `id` and `createdAt` in the input are ignored; `updatedAt` is always restamped.
    pub fn update_settings(&self, input: Value) -> Result<SiteSettings> {
        let Value::Object(input) = input else {
            return Err(AppError::BadRequest(
                "Settings must be a JSON object".into(),
            ));
        };

        let previous = self.backend.get(SETTINGS_ID)?;
        let mut document = match (self.merge_base, &previous) {
            (MergeBase::Stored, Some(stored)) => {
                let base = merged_over_defaults(stored.clone())?;
                // A bad stored document is a server fault, not the client's
                SiteSettings::from_object(base.clone())?;
                base
            }
            _ => defaults()?,
        };
        overlay(&mut document, input);

        let settings = self.persist(document, previous.as_ref())?;
        tracing::debug!(
            "Site settings updated (merge base: {})",
            self.merge_base.as_ref()
        );
        Ok(settings)
    }

    /// Overwrite the stored document with the defaults, keeping `createdAt`.
    pub fn reset_settings(&self) -> Result<SiteSettings> {
        let previous = self.backend.get(SETTINGS_ID)?;
        let settings = self.persist(defaults()?, previous.as_ref())?;
        tracing::info!("Site settings reset to defaults");
        Ok(settings)
    }

    fn persist(&self, mut document: Document, previous: Option<&Document>) -> Result<SiteSettings> {
        let now = util::now();
        let created_at = previous
            .and_then(|p| timestamp(p, CREATED_AT_KEY))
            .unwrap_or(now);
        // Clock steps backwards must not make updatedAt go backwards
        let updated_at = previous
            .and_then(|p| timestamp(p, UPDATED_AT_KEY))
            .map_or(now, |prev| prev.max(now));

        document.remove(LEGACY_ID_KEY);
        document.insert("id".into(), Value::String(SETTINGS_ID.into()));
        document.insert(CREATED_AT_KEY.into(), timestamp_value(created_at));
        document.insert(UPDATED_AT_KEY.into(), timestamp_value(updated_at));

        let settings = SiteSettings::from_object(document)
            .map_err(|e| AppError::BadRequest(format!("Invalid settings: {}", e)))?;
        self.backend
            .upsert(SETTINGS_ID, &settings.clone().into_object()?)?;
        Ok(settings)
    }
}
