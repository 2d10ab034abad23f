use std::collections::HashMap;
use std::sync::RwLock;

use super::backend::{Document, SettingsBackend};
use crate::error::{AppError, Result};

/// Keeps documents in process memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: RwLock<HashMap<String, Document>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Internal("settings lock poisoned".into())
}

impl SettingsBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get(&self, id: &str) -> Result<Option<Document>> {
        let documents = self.documents.read().map_err(poisoned)?;
        Ok(documents.get(id).cloned())
    }

    fn upsert(&self, id: &str, document: &Document) -> Result<()> {
        let mut documents = self.documents.write().map_err(poisoned)?;
        documents.insert(id.to_string(), document.clone());
        Ok(())
    }
}
