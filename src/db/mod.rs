mod backend;
mod document;
mod memory;
mod sqlite;
mod store;

pub use backend::{Document, SettingsBackend};
pub use document::DocumentBackend;
pub use memory::MemoryBackend;
pub use sqlite::{DbPool, SqliteBackend, create_pool, init_db};
pub use store::SettingsStore;

use std::sync::Arc;

use crate::auth::AdminGate;
use crate::config::{Config, StorageBackend};
use crate::error::Result;

#[derive(Clone)]
pub struct AppState {
    pub settings: SettingsStore,
    pub admin: Arc<AdminGate>,
    /// Reject settings writes without a token issued by /admin/login
    pub require_admin_token: bool,
}

impl AppState {
    pub fn new(settings: SettingsStore, admin: AdminGate, require_admin_token: bool) -> Self {
        Self {
            settings,
            admin: Arc::new(admin),
            require_admin_token,
        }
    }

    /// Build the state for a deployment, opening the configured backend.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend: Arc<dyn SettingsBackend> = match config.storage_backend {
            StorageBackend::Memory => Arc::new(MemoryBackend::new()),
            StorageBackend::Sqlite => Arc::new(SqliteBackend::open(&config.database_path)?),
            StorageBackend::Document => Arc::new(DocumentBackend::open(
                &config.document_dir,
                &config.db_name,
            )?),
        };

        let mut admin = AdminGate::new(&config.admin_password);
        if config.require_admin_token {
            admin = admin.tracking_tokens();
        }

        Ok(Self::new(
            SettingsStore::new(backend, config.merge_base),
            admin,
            config.require_admin_token,
        ))
    }
}
