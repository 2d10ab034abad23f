use serde_json::{Map, Value};

use crate::error::Result;

/// A raw settings document as stored: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

/// Storage capability for settings documents.
///
/// Backends only move whole documents in and out by id. Default filling,
/// identity pinning and timestamps are handled by `SettingsStore`.
pub trait SettingsBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn get(&self, id: &str) -> Result<Option<Document>>;

    /// Insert the document, or replace it entirely if one exists under `id`.
    fn upsert(&self, id: &str, document: &Document) -> Result<()>;
}
