use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};

use crate::models::Theme;

/// Colours derived from the active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Palette {
    pub(crate) bg: Color,
    pub(crate) fg: Color,
    pub(crate) accent: Color,
    pub(crate) muted: Color,
    pub(crate) highlight_bg: Color,
    pub(crate) info: Color,
    pub(crate) error: Color,
}

impl Palette {
    pub(crate) fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                accent: Color::Blue,
                muted: Color::DarkGray,
                highlight_bg: Color::LightBlue,
                info: Color::Green,
                error: Color::Red,
            },
            Theme::Dark => Self {
                bg: Color::Black,
                fg: Color::White,
                accent: Color::Cyan,
                muted: Color::Gray,
                highlight_bg: Color::DarkGray,
                info: Color::LightGreen,
                error: Color::LightRed,
            },
        }
    }

    pub(crate) fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub(crate) fn key(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn selected_row(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}

/// Header hint naming the theme the toggle key switches to.
pub(crate) fn theme_toggle_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "[t] Dark mode",
        Theme::Dark => "[t] Light mode",
    }
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
