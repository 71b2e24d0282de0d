//! Core library surface for the Student Manager TUI application.
//!
//! The record store, theme preference, and intent controller are usable
//! without a terminal; the `ui` module layers the Ratatui front-end on top.
pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
pub mod theme;
pub mod ui;

pub use config::{Cli, Config};
pub use controller::{Controller, Intent, Outcome};
pub use db::{ensure_schema, open_in_memory, KeyValueStore, MemoryKv, SqliteKv};
pub use error::{StorageError, StoreError};
pub use models::{StudentDraft, StudentRecord, Theme};
pub use store::RecordStore;
pub use theme::ThemePreference;
pub use ui::{run_app, App};
