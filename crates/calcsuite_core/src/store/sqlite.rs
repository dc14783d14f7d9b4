//! SQLite-backed state store.
//!
//! # Responsibility
//! - Persist engine blobs in the `app_state` key-value table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - The connection must come from `db::open_db`/`open_db_in_memory` so the
//!   schema is migrated before first use.

use super::{StateStore, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store over a borrowed SQLite connection.
pub struct SqliteStateStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StateStore for SqliteStateStore<'_> {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO app_state (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
