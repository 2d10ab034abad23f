//! File-backed document store.
//!
//! Each document lives at `<root>/<collection>/<id>.json`. Writes go to a
//! temporary file in the same directory and are renamed over the target,
//! so readers see either the old or the new document, never a torn one.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::backend::{Document, SettingsBackend};
use crate::error::{AppError, Result};

pub struct DocumentBackend {
    collection_dir: PathBuf,
    // Serializes writers so two upserts never share the temp file
    write_lock: Mutex<()>,
}

impl DocumentBackend {
    pub fn open(root: impl AsRef<Path>, collection: &str) -> Result<Self> {
        validate_name(collection)?;
        let collection_dir = root.as_ref().join(collection);
        fs::create_dir_all(&collection_dir)?;
        Ok(Self {
            collection_dir,
            write_lock: Mutex::new(()),
        })
    }

    fn path_for(&self, id: &str) -> Result<PathBuf> {
        validate_name(id)?;
        Ok(self.collection_dir.join(format!("{}.json", id)))
    }
}

/// Names become file names, so only allow a conservative character set.
fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(AppError::Internal(format!("invalid document name {:?}", name)))
    }
}

impl SettingsBackend for DocumentBackend {
    fn name(&self) -> &'static str {
        "document"
    }

    fn get(&self, id: &str) -> Result<Option<Document>> {
        let path = self.path_for(id)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn upsert(&self, id: &str, document: &Document) -> Result<()> {
        let path = self.path_for(id)?;
        let tmp_path = self.collection_dir.join(format!(".{}.json.tmp", id));
        let bytes = serde_json::to_vec_pretty(document)?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AppError::Internal("document write lock poisoned".into()))?;
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}
