//! Persisted light/dark preference, stored independently of the records under
//! [`THEME_KEY`].

use std::rc::Rc;

use tracing::{info, warn};

use crate::db::{write_json, KeyValueStore, THEME_KEY};
use crate::error::Result;
use crate::models::Theme;

pub struct ThemePreference {
    backend: Rc<dyn KeyValueStore>,
    current: Theme,
}

impl ThemePreference {
    /// Read the saved theme. Anything missing or unrecognised falls back to
    /// [`Theme::Light`].
    pub fn load(backend: Rc<dyn KeyValueStore>) -> Result<Self> {
        let current = match backend.get(THEME_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(error = %err, raw = %raw, "ignoring unreadable theme preference");
                Theme::default()
            }),
            None => Theme::default(),
        };
        Ok(Self { backend, current })
    }

    pub fn get(&self) -> Theme {
        self.current
    }

    /// Persist `theme` and make it current.
    pub fn set(&mut self, theme: Theme) -> Result<()> {
        write_json(self.backend.as_ref(), THEME_KEY, &theme)?;
        self.current = theme;
        info!(%theme, "theme changed");
        Ok(())
    }

    /// Flip between light and dark, returning the new theme.
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.current.toggled();
        self.set(next)?;
        Ok(next)
    }
}
