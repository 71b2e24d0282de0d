//! Persistence module split across logical submodules. Everything above this
//! layer talks to a [`KeyValueStore`]; the SQLite table and the in-memory map
//! are interchangeable behind it.

mod connection;
mod memory;
mod sqlite;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

pub(crate) use connection::DB_FILE_NAME;
pub use connection::{default_db_path, ensure_schema, open_in_memory};
pub use memory::MemoryKv;
pub use sqlite::SqliteKv;

/// Key holding the JSON array of student records.
pub const STUDENTS_KEY: &str = "sms_students";
/// Key holding the JSON-encoded theme name.
pub const THEME_KEY: &str = "sms_theme";

/// Result type for storage backends.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Flat string-to-string storage scoped to one application profile.
pub trait KeyValueStore {
    /// Fetch the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Decode the JSON value stored under `key`. A missing key yields `None`.
pub fn read_json<T: DeserializeOwned>(
    backend: &dyn KeyValueStore,
    key: &str,
) -> StorageResult<Option<T>> {
    match backend.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode `value` as JSON and store it under `key`.
pub fn write_json<T: Serialize + ?Sized>(
    backend: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let raw = serde_json::to_string(value)?;
    backend.set(key, &raw)
}
