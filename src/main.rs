//! Binary entry point: resolve configuration, open the key-value store,
//! hydrate the records and theme, and drive the Ratatui event loop until the
//! user exits.
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use student_manager::logging::init_tracing;
use student_manager::{
    ensure_schema, open_in_memory, run_app, App, Cli, Config, Controller, KeyValueStore,
    RecordStore, SqliteKv, ThemePreference,
};

fn main() -> Result<()> {
    let config = Config::resolve(Cli::parse())?;
    init_tracing(&config.log_path)?;

    let conn = match &config.db_path {
        Some(path) => {
            info!(db = %path.display(), "opening storage");
            ensure_schema(path).context("failed to open database")?
        }
        None => {
            info!("using in-memory storage");
            open_in_memory().context("failed to open in-memory database")?
        }
    };
    let backend: Rc<dyn KeyValueStore> = Rc::new(SqliteKv::new(conn));

    let store = RecordStore::load(backend.clone()).context("failed to load students")?;
    let theme = ThemePreference::load(backend).context("failed to load theme")?;

    let mut app = App::new(Controller::new(store, theme));
    run_app(&mut app)
}
