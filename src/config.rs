//! Command-line and environment configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::db::default_db_path;

/// Log file name written next to the database unless overridden.
const LOG_FILE_NAME: &str = "student-manager.log";

#[derive(Debug, Parser)]
#[command(name = "student-manager", version, about = "Manage student records in the terminal")]
pub struct Cli {
    /// Directory holding the database and log file.
    #[arg(long, env = "SMS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Write logs to this file instead of the data directory.
    #[arg(long, env = "SMS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Keep everything in memory; nothing survives the session.
    #[arg(long, env = "SMS_IN_MEMORY")]
    pub in_memory: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite file to open. `None` means an in-memory session.
    pub db_path: Option<PathBuf>,
    pub log_path: PathBuf,
}

impl Config {
    /// Fill in defaults for anything the command line left out. In-memory
    /// sessions never touch the home directory: their log goes to the data
    /// directory when one is given, otherwise to the system temp directory.
    pub fn resolve(cli: Cli) -> Result<Self> {
        let db_path = match (&cli.data_dir, cli.in_memory) {
            (_, true) => None,
            (Some(dir), false) => Some(dir.join(crate::db::DB_FILE_NAME)),
            (None, false) => {
                Some(default_db_path().context("failed to resolve default data directory")?)
            }
        };
        let log_dir = match (&db_path, cli.data_dir) {
            (Some(path), _) => path.parent().map(PathBuf::from),
            (None, Some(dir)) => Some(dir),
            (None, None) => Some(std::env::temp_dir()),
        };
        let log_path = match cli.log_file {
            Some(path) => path,
            None => log_dir
                .map(|dir| dir.join(LOG_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME)),
        };
        Ok(Self { db_path, log_path })
    }
}
