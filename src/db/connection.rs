use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;
use rusqlite::Connection;

use super::StorageResult;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".student-manager";
/// SQLite file name stored inside the application data directory.
pub(crate) const DB_FILE_NAME: &str = "students.sqlite";

/// Ensure the database file exists, run lazy migrations, and return a live
/// connection. A data directory that cannot be created surfaces as
/// [`StorageError::Io`](crate::error::StorageError::Io).
pub fn ensure_schema(db_path: &Path) -> StorageResult<Connection> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(db_path)?;
    create_tables(&conn)?;
    Ok(conn)
}

/// Open a throwaway database that lives only as long as the connection.
pub fn open_in_memory() -> StorageResult<Connection> {
    let conn = Connection::open_in_memory()?;
    create_tables(&conn)?;
    Ok(conn)
}

fn create_tables(conn: &Connection) -> StorageResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_entries (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

/// Resolve the default database location inside the user's home.
pub fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
