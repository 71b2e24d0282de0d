//! Ratatui front-end: a student table with a search line, a modal form for
//! add/update, and a delete confirmation. Key presses become controller
//! intents; nothing here touches storage directly.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
