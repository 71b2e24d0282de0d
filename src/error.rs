//! Error types for the record store, theme preference, and storage backends.

use thiserror::Error;

/// Failures raised by a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A persisted value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while preparing the storage location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced to the presentation layer by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// One or more required fields were empty.
    #[error("Please fill all fields (missing: {})", missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    /// No record carries the requested id.
    #[error("Student {0} not found")]
    NotFound(String),

    /// The persisted mirror could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
