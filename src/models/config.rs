//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::view::translate::Translate;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub secret: String,
    /// Directory uploaded images are written to.
    pub upload_dir: String,
    /// URL prefix uploaded images are served from.
    pub image_base_url: String,
    #[serde(default)]
    pub db: DatabaseOptions,
    #[serde(default)]
    pub translate: Translate,
}

/// Pragmas applied to every pooled SQLite connection.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseOptions {
    pub enable_wal: bool,
    pub enable_foreign_keys: bool,
    pub busy_timeout_ms: Option<u64>,
    pub max_connections: u32,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            enable_wal: true,
            enable_foreign_keys: true,
            busy_timeout_ms: Some(30_000),
            max_connections: 10,
        }
    }
}
