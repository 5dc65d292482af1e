#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use shop_admin::db::{DbPool, establish_connection_pool};
use shop_admin::domain::item::NewItem;
use shop_admin::domain::types::{ItemCode, ItemName};
use shop_admin::models::config::DatabaseOptions;
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Migrated SQLite database living in a temporary directory for the
/// duration of a test.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let options = DatabaseOptions {
            enable_wal: false,
            max_connections: 2,
            ..DatabaseOptions::default()
        };
        let pool = establish_connection_pool(&path.to_string_lossy(), &options)
            .expect("create connection pool");

        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub fn new_item(code: &str, name: &str) -> NewItem {
    NewItem::new(ItemCode::new(code).unwrap(), ItemName::new(name).unwrap())
}
