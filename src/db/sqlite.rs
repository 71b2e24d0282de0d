use rusqlite::{params, Connection, OptionalExtension};
use tracing::trace;

use super::{KeyValueStore, StorageResult};

/// [`KeyValueStore`] backed by the `kv_entries` table.
pub struct SqliteKv {
    conn: Connection,
}

impl SqliteKv {
    /// Wrap a connection whose schema was prepared by
    /// [`ensure_schema`](super::ensure_schema) or
    /// [`open_in_memory`](super::open_in_memory).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKv {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        // Upsert keeps the write a single statement, so a failure leaves the
        // previous value in place.
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        trace!(key, bytes = value.len(), "stored value");
        Ok(())
    }
}
