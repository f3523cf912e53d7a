//! SqliteStore — key-value slots in a SQLite WAL database
//!
//! - WAL mode: readers never block the single writer
//! - One row per key, replaced wholesale on every write (last write wins)
//! - `updated_at_ms` records when each slot was last written

use super::{validate_key, KeyValueStore};
use crate::error::{Result, ResultExt};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key-value store over a single SQLite table
pub struct SqliteStore {
    conn: Connection,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl SqliteStore {
    /// Open (or create) the database. `":memory:"` opens a private in-memory
    /// database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let in_memory = path == Path::new(":memory:");

        if !in_memory {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Creating database directory '{}'", parent.display())
                })?;
            }
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Opening SQLite '{}'", path.display()))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("Configuring SQLite PRAGMAs")?;

        let store = Self { conn };
        store.migrate()?;
        tracing::debug!("SQLite store opened at {}", path.display());
        Ok(store)
    }

    /// Idempotent DDL
    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "
            CREATE TABLE IF NOT EXISTS kv_entries (
                key           TEXT PRIMARY KEY,
                value         TEXT NOT NULL,
                updated_at_ms INTEGER NOT NULL
            );
            ",
            )
            .context("Migrating SQLite schema")?;
        Ok(())
    }

    /// Milliseconds since the epoch at which `key` was last written
    pub fn updated_at_ms(&self, key: &str) -> Result<Option<i64>> {
        validate_key(key)?;
        self.conn
            .query_row(
                "SELECT updated_at_ms FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .context("Query kv_entries.updated_at_ms")
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        self.conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .context("Query kv_entries")
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let updated_at_ms = chrono::Utc::now().timestamp_millis();

        self.conn
            .execute(
                "INSERT INTO kv_entries (key, value, updated_at_ms) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                updated_at_ms = excluded.updated_at_ms",
                params![key, value, updated_at_ms],
            )
            .context("UPSERT kv_entries")?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1", params![key])
            .context("DELETE kv_entries")?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY key")?;
        let rows = stmt
            .query_map([], |row| row.get(0))
            .context("Query kv_entries keys")?;

        rows.collect::<rusqlite::Result<Vec<String>>>()
            .context("Collecting kv_entries keys")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> SqliteStore {
        SqliteStore::open(":memory:").expect("in-memory SQLite should open")
    }

    #[test]
    fn test_sqlite_set_and_get() {
        let mut store = temp_store();
        assert!(store.get("cart-storage").unwrap().is_none());

        store.set("cart-storage", "first").unwrap();
        store.set("cart-storage", "second").unwrap();

        assert_eq!(store.get("cart-storage").unwrap().as_deref(), Some("second"));
        assert_eq!(store.keys().unwrap(), vec!["cart-storage".to_string()]);
    }

    #[test]
    fn test_sqlite_updated_at_recorded() {
        let mut store = temp_store();
        let before = chrono::Utc::now().timestamp_millis();
        store.set("cart-storage", "x").unwrap();

        let stamp = store.updated_at_ms("cart-storage").unwrap().unwrap();
        assert!(stamp >= before);
        assert!(store.updated_at_ms("other").unwrap().is_none());
    }

    #[test]
    fn test_sqlite_remove_idempotent() {
        let mut store = temp_store();
        store.set("cart-storage", "x").unwrap();
        store.remove("cart-storage").unwrap();
        store.remove("cart-storage").unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_sqlite_reopen_persists() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("storefront.db");

        {
            let mut store = SqliteStore::open(&db).unwrap();
            store.set("cart-storage", "kept").unwrap();
        }

        let store = SqliteStore::open(&db).unwrap();
        assert_eq!(store.get("cart-storage").unwrap().as_deref(), Some("kept"));
    }
}
