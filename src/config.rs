use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use strum::{AsRefStr, EnumString};

/// Secret used when ADMIN_PASSWORD is not set. Deployments should override it.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin2026";

/// Which storage implementation holds the settings document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageBackend {
    /// Process memory, lost on restart
    Memory,
    /// SQLite table with a JSON column
    Sqlite,
    /// One JSON file per document in a collection directory
    Document,
}

/// What an incoming settings write is overlaid on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MergeBase {
    /// Omitted fields fall back to the compiled-in defaults
    #[default]
    Defaults,
    /// Omitted fields keep their previously stored values
    Stored,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub admin_password: String,
    /// True when ADMIN_PASSWORD was not set and the built-in secret is in use
    pub admin_password_is_default: bool,
    pub storage_backend: StorageBackend,
    pub database_path: String,
    pub document_dir: PathBuf,
    /// Collection name for the document backend
    pub db_name: String,
    pub merge_base: MergeBase,
    /// Require a token issued by /admin/login on settings writes.
    /// Off by default: the admin page has never sent one.
    pub require_admin_token: bool,
}

fn parse_enum<T: FromStr + AsRef<str>>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "Unrecognized {}={:?}, using {}",
                key,
                raw,
                default.as_ref()
            );
            default
        }),
        Err(_) => default,
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl Config {
    /// Read configuration from the environment. Load `.env` before calling.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let admin_password = env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty());
        let admin_password_is_default = admin_password.is_none();

        Self {
            host,
            port,
            admin_password: admin_password.unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
            admin_password_is_default,
            storage_backend: parse_enum("SETTINGS_BACKEND", StorageBackend::Sqlite),
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "site_settings.db".to_string()),
            document_dir: env::var("DOCUMENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("settings_store")),
            db_name: env::var("DB_NAME").unwrap_or_else(|_| "iptvusca".to_string()),
            merge_base: parse_enum("SETTINGS_MERGE_BASE", MergeBase::default()),
            require_admin_token: env::var("REQUIRE_ADMIN_TOKEN")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
