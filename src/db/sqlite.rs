use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OptionalExtension, params};

use super::backend::{Document, SettingsBackend};
use crate::error::Result;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Create the settings table if it doesn't exist.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS settings (
            id TEXT PRIMARY KEY,
            data TEXT NOT NULL CHECK (json_valid(data)),
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );",
    )?;
    Ok(())
}

/// Open a pooled connection to a SQLite file, creating the schema.
pub fn create_pool(path: impl AsRef<Path>) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(path).with_init(|conn| {
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000;")
    });
    let pool = Pool::builder().max_size(4).build(manager)?;
    init_db(&*pool.get()?)?;
    Ok(pool)
}

/// Stores each document as JSON text in one row of the `settings` table.
/// The row's own columns are bookkeeping and never leave this module.
#[derive(Clone)]
pub struct SqliteBackend {
    pool: DbPool,
}

impl SqliteBackend {
    /// Wrap an existing pool. The schema must already be initialized.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(create_pool(path)?))
    }
}

impl SettingsBackend for SqliteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn get(&self, id: &str) -> Result<Option<Document>> {
        let conn = self.pool.get()?;
        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM settings WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        match data {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    fn upsert(&self, id: &str, document: &Document) -> Result<()> {
        let conn = self.pool.get()?;
        let data = serde_json::to_string(document)?;
        let now = chrono::Utc::now().timestamp();

        conn.execute(
            "INSERT INTO settings (id, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
            params![id, data, now],
        )?;
        Ok(())
    }
}
