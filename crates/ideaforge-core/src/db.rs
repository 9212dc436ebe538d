use crate::credentials::KeyValueStore;
use crate::errors::CoreError;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

pub use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

const SCHEMA_VERSION: u32 = 1;

/// Open (or create) the ideaforge store with WAL mode enabled.
pub fn open_db(path: &Path) -> Result<Connection, CoreError> {
    let conn = Connection::open(path)?;

    // Enable WAL mode for concurrent access
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // Run migrations
    migrate(&conn)?;

    Ok(conn)
}

fn migrate(conn: &Connection) -> Result<(), CoreError> {
    let current_version: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if current_version < 1 {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }

    Ok(())
}

/// Read a setting, if present.
pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>, CoreError> {
    let value = conn
        .query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

/// Insert or replace a setting.
pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<(), CoreError> {
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)",
        params![key, value, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

/// Delete a setting. Returns true if a row was removed.
pub fn delete_setting(conn: &Connection, key: &str) -> Result<bool, CoreError> {
    let removed = conn.execute("DELETE FROM settings WHERE key = ?1", params![key])?;
    Ok(removed > 0)
}

/// When a setting was last written (RFC 3339).
pub fn setting_updated_at(conn: &Connection, key: &str) -> Result<Option<String>, CoreError> {
    let value = conn
        .query_row(
            "SELECT updated_at FROM settings WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

/// Verify the database is using WAL mode.
pub fn verify_wal_mode(conn: &Connection) -> Result<bool, CoreError> {
    let mode: String = conn.pragma_query_value(None, "journal_mode", |row| row.get(0))?;
    Ok(mode.to_lowercase() == "wal")
}

/// [`KeyValueStore`] backed by the SQLite `settings` table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        Ok(Self {
            conn: Mutex::new(open_db(path)?),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| CoreError::Database("store connection poisoned".to_string()))?;
        f(&conn)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        self.with_conn(|c| get_setting(c, key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.with_conn(|c| set_setting(c, key, value))
    }

    fn remove(&self, key: &str) -> Result<bool, CoreError> {
        self.with_conn(|c| delete_setting(c, key))
    }
}
