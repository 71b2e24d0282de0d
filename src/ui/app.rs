use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::controller::{Controller, Intent, Outcome};
use crate::models::StudentRecord;

use super::forms::{ConfirmStudentDelete, StudentField, StudentForm};
use super::helpers::{centered_rect, surface_error, theme_toggle_label, Palette};

/// Title bar height, borders included.
const HEADER_HEIGHT: u16 = 3;
/// Search line height, borders included.
const SEARCH_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp/PageDown.
const PAGE_STEP: isize = 5;
const SEARCH_PREFIX: &str = "Search: ";

/// Fine-grained modes layered over the student table.
enum Mode {
    Normal,
    Form(StudentForm),
    ConfirmDelete(ConfirmStudentDelete),
    Searching(SearchState),
}

/// State for an active inline search.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self, palette: &Palette) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(palette.info),
            StatusKind::Error => Style::default().fg(palette.error),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    controller: Controller,
    visible: Vec<StudentRecord>,
    selected: usize,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        let visible = controller.visible();
        Self {
            controller,
            visible,
            selected: 0,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Route a key press to the active mode. Returns `true` when the user
    /// asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Form(form) => self.handle_form(code, form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
            Mode::Searching(state) => self.handle_search(code, state)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc => {
                if self.controller.search_text().is_empty() {
                    *exit = true;
                } else {
                    self.clear_search();
                }
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.move_selection(PAGE_STEP),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.visible.len().saturating_sub(1),
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                if let Err(err) = self.dispatch(Intent::CancelEdit) {
                    self.set_status(surface_error(&err), StatusKind::Error);
                    return Ok(Mode::Normal);
                }
                return Ok(Mode::Form(StudentForm::default()));
            }
            KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => {
                let Some(id) = self.current_record().map(|record| record.id.clone()) else {
                    self.set_status("No student selected to edit.", StatusKind::Error);
                    return Ok(Mode::Normal);
                };
                self.clear_status();
                match self.dispatch(Intent::BeginEdit(id)) {
                    Ok(Outcome {
                        affected: Some(record),
                        ..
                    }) => return Ok(Mode::Form(StudentForm::from_record(&record))),
                    Ok(_) => {}
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
            }
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') => {
                if let Some(record) = self.current_record() {
                    let confirm = ConfirmStudentDelete::from(record);
                    self.clear_status();
                    return Ok(Mode::ConfirmDelete(confirm));
                }
                self.set_status("No student selected to delete.", StatusKind::Error);
            }
            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.clear_status();
                return Ok(Mode::Searching(SearchState {
                    query: self.controller.search_text().to_string(),
                }));
            }
            KeyCode::Char('c') | KeyCode::Char('C') => self.clear_search(),
            KeyCode::Char('t') | KeyCode::Char('T') => match self.dispatch(Intent::ToggleTheme) {
                Ok(outcome) => self.set_status(
                    format!("Switched to {} theme.", outcome.theme),
                    StatusKind::Info,
                ),
                Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
            },
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_form(&mut self, code: KeyCode, mut form: StudentForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                keep_open = false;
                if form.editing {
                    match self.dispatch(Intent::CancelEdit) {
                        Ok(_) => self.set_status("Edit cancelled.", StatusKind::Info),
                        Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                    }
                } else {
                    self.set_status("Add student cancelled.", StatusKind::Info);
                }
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_form(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::Form(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_confirm_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmStudentDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.dispatch(Intent::Delete(confirm.id.clone())) {
                    Ok(_) => {
                        self.set_status(format!("Deleted {}.", confirm.name), StatusKind::Info);
                        Ok(Mode::Normal)
                    }
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                        Ok(Mode::ConfirmDelete(confirm))
                    }
                }
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.clear_search();
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => return Ok(Mode::Normal),
            KeyCode::Up => {
                self.move_selection(-1);
                return Ok(Mode::Searching(state));
            }
            KeyCode::Down => {
                self.move_selection(1);
                return Ok(Mode::Searching(state));
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => state.query.push(ch),
            _ => return Ok(Mode::Searching(state)),
        }

        if let Err(err) = self.dispatch(Intent::Search(state.query.clone())) {
            self.set_status(surface_error(&err), StatusKind::Error);
        }
        Ok(Mode::Searching(state))
    }

    /// Validate the form and submit it, focusing the saved row.
    fn save_form(&mut self, form: &StudentForm) -> Result<()> {
        let draft = form.parse_inputs()?;
        let outcome = self.dispatch(Intent::Submit(draft))?;
        if let Some(record) = outcome.affected {
            self.focus(&record.id);
            let verb = if form.editing { "Updated" } else { "Added" };
            self.set_status(format!("{verb} {}.", record.name), StatusKind::Info);
        }
        Ok(())
    }

    fn clear_search(&mut self) {
        match self.dispatch(Intent::ClearSearch) {
            Ok(_) => self.set_status("Search cleared.", StatusKind::Info),
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    /// Forward an intent and adopt the resulting view.
    fn dispatch(&mut self, intent: Intent) -> Result<Outcome> {
        let outcome = self.controller.dispatch(intent)?;
        self.visible = outcome.visible.clone();
        self.clamp_selection();
        Ok(outcome)
    }

    fn focus(&mut self, id: &str) {
        if let Some(index) = self.visible.iter().position(|record| record.id == id) {
            self.selected = index;
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    fn move_selection(&mut self, offset: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    fn current_record(&self) -> Option<&StudentRecord> {
        self.visible.get(self.selected)
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let palette = Palette::for_theme(self.controller.theme());
        let area = frame.area();
        frame.render_widget(Block::default().style(palette.base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(SEARCH_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0], &palette);
        self.draw_search(frame, chunks[1], &palette);
        self.draw_table(frame, chunks[2], &palette);
        self.draw_footer(frame, chunks[3], &palette);

        match &self.mode {
            Mode::Form(form) => self.draw_student_form(frame, area, form, &palette),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm, &palette),
            Mode::Normal | Mode::Searching(_) => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let total = self.controller.store().len();
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "Student Manager",
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  •  {total} students  •  ")),
            Span::styled(
                theme_toggle_label(self.controller.theme()),
                Style::default().fg(palette.muted),
            ),
        ]))
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn draw_search(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let (query, active) = match &self.mode {
            Mode::Searching(state) => (state.query.as_str(), true),
            _ => (self.controller.search_text(), false),
        };

        let mut block = Block::default().borders(Borders::ALL).title("Search");
        if active {
            block = block.border_style(Style::default().fg(palette.accent));
        }

        let value = if query.is_empty() && !active {
            Span::styled(
                "<name, email or course>",
                Style::default().fg(palette.muted),
            )
        } else {
            Span::raw(query.to_string())
        };

        let paragraph = Paragraph::new(Line::from(vec![Span::raw(SEARCH_PREFIX), value]))
            .style(palette.base())
            .block(block.clone());
        frame.render_widget(paragraph, area);

        if active {
            let inner = block.inner(area);
            let cursor_x = inner
                .x
                .saturating_add(to_cells(SEARCH_PREFIX.len()))
                .saturating_add(to_cells(query.chars().count()));
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let total = self.controller.store().len();
        let title = format!("Students ({}/{total})", self.visible.len());
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.visible.is_empty() {
            let search = self.controller.search_text().trim();
            let message = if search.is_empty() {
                "No students yet. Press '+' to add one.".to_string()
            } else {
                format!("No students match \"{search}\". Press 'c' to clear the search.")
            };
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(palette.muted).bg(palette.bg))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let header = Row::new(["Name", "Email", "Phone", "Course"]).style(palette.key());
        let rows = self.visible.iter().map(|record| {
            Row::new([
                record.name.as_str(),
                record.email.as_str(),
                record.phone.as_str(),
                record.course.as_str(),
            ])
        });
        let widths = [
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(15),
            Constraint::Percentage(25),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .style(palette.base())
            .row_highlight_style(palette.selected_row())
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(
                status.text.clone(),
                status.kind.style(palette),
            )])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions(palette);

        let paragraph = Paragraph::new(vec![status_line, instructions])
            .style(palette.base())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self, palette: &Palette) -> Line<'static> {
        let hints: &[(&str, &str)] = match &self.mode {
            Mode::Form(_) => &[
                ("[Tab]", " Next Field   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::ConfirmDelete(_) => &[("[y]", " Delete   "), ("[n]", " Keep")],
            Mode::Searching(_) => &[
                ("[↑↓]", " Select   "),
                ("[Enter]", " Keep Filter   "),
                ("[Esc]", " Clear"),
            ],
            Mode::Normal => &[
                ("[↑↓]", " Select   "),
                ("[+]", " Add   "),
                ("[e]", " Edit   "),
                ("[-]", " Delete   "),
                ("[f]", " Search   "),
                ("[c]", " Clear Search   "),
                ("[t]", " Theme   "),
                ("[q]", " Quit"),
            ],
        };

        let key_style = palette.key();
        Line::from(
            hints
                .iter()
                .flat_map(|(key, label)| {
                    [Span::styled(*key, key_style), Span::raw(*label)]
                })
                .collect::<Vec<_>>(),
        )
    }

    fn draw_student_form(
        &self,
        frame: &mut Frame,
        area: Rect,
        form: &StudentForm,
        palette: &Palette,
    ) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(form.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .style(palette.base());
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = StudentField::ALL
            .iter()
            .map(|field| form.build_line(*field, palette))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(palette.error),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(palette.muted),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let row = StudentField::ALL
            .iter()
            .position(|field| *field == form.active)
            .unwrap_or_default() as u16;
        let prefix = to_cells(form.active.label().len()).saturating_add(2);
        let cursor_x = inner
            .x
            .saturating_add(prefix)
            .saturating_add(to_cells(form.value_len(form.active)));
        frame.set_cursor_position((cursor_x, inner.y + row));
    }

    fn draw_confirm_delete(
        &self,
        frame: &mut Frame,
        area: Rect,
        confirm: &ConfirmStudentDelete,
        palette: &Palette,
    ) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Delete")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.error))
            .style(palette.base());
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete {} <{}>?", confirm.name, confirm.email)),
            Line::from(""),
            Line::from(vec![
                Span::styled("[y]", palette.key()),
                Span::raw(" Yes   "),
                Span::styled("[n]", palette.key()),
                Span::raw(" No"),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

/// Terminal cell count for a text length, clamped to the coordinate range.
fn to_cells(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::db::{KeyValueStore, MemoryKv};
    use crate::models::Theme;
    use crate::store::RecordStore;
    use crate::theme::ThemePreference;

    fn app() -> (Rc<MemoryKv>, App) {
        let backend = Rc::new(MemoryKv::new());
        let shared: Rc<dyn KeyValueStore> = backend.clone();
        let store = RecordStore::load(shared.clone()).unwrap();
        let theme = ThemePreference::load(shared).unwrap();
        (backend, App::new(Controller::new(store, theme)))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(code).unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn add_student(app: &mut App, fields: [&str; 4]) {
        press(app, KeyCode::Char('+'));
        for (idx, value) in fields.iter().enumerate() {
            if idx > 0 {
                press(app, KeyCode::Tab);
            }
            type_text(app, value);
        }
        press(app, KeyCode::Enter);
    }

    fn names(app: &App) -> Vec<&str> {
        app.visible.iter().map(|r| r.name.as_str()).collect()
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn adding_through_the_form_prepends_rows() {
        let (_, mut app) = app();
        add_student(&mut app, ["Ann", "ann@x.com", "555", "Math"]);
        add_student(&mut app, ["Bo", "bo@x.com", "556", "Art"]);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(names(&app), vec!["Bo", "Ann"]);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn incomplete_form_stays_open_with_error() {
        let (backend, mut app) = app();
        press(&mut app, KeyCode::Char('+'));
        type_text(&mut app, "Ann");
        press(&mut app, KeyCode::Enter);

        match &app.mode {
            Mode::Form(form) => assert!(form
                .error
                .as_deref()
                .unwrap()
                .starts_with("Please fill all fields")),
            _ => panic!("form should stay open"),
        }
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn editing_keeps_position() {
        let (_, mut app) = app();
        add_student(&mut app, ["Ann", "ann@x.com", "555", "Math"]);
        add_student(&mut app, ["Bo", "bo@x.com", "556", "Art"]);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "ie");
        press(&mut app, KeyCode::Enter);

        assert_eq!(names(&app), vec!["Bo", "Annie"]);
        assert_eq!(app.selected, 1);
        assert_eq!(app.controller.edit_cursor(), None);
    }

    #[test]
    fn escape_from_edit_clears_cursor() {
        let (_, mut app) = app();
        add_student(&mut app, ["Ann", "ann@x.com", "555", "Math"]);
        press(&mut app, KeyCode::Enter);
        assert!(app.controller.edit_cursor().is_some());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.controller.edit_cursor(), None);
    }

    #[test]
    fn delete_requires_confirmation() {
        let (_, mut app) = app();
        add_student(&mut app, ["Ann", "ann@x.com", "555", "Math"]);

        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(names(&app), vec!["Ann"]);

        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.visible.is_empty());
    }

    #[test]
    fn live_search_filters_and_escape_clears() {
        let (_, mut app) = app();
        add_student(&mut app, ["Ann", "ann@x.com", "555", "Math"]);
        add_student(&mut app, ["Bo", "bo@x.com", "556", "Art"]);

        press(&mut app, KeyCode::Char('f'));
        type_text(&mut app, "MATH");
        assert_eq!(names(&app), vec!["Ann"]);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller.search_text(), "MATH");

        press(&mut app, KeyCode::Esc);
        assert_eq!(names(&app), vec!["Bo", "Ann"]);
        assert!(!press(&mut app, KeyCode::Char('x')));
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn theme_toggle_persists() {
        let (backend, mut app) = app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.controller.theme(), Theme::Dark);
        assert_eq!(
            backend.get(crate::db::THEME_KEY).unwrap().as_deref(),
            Some("\"dark\"")
        );
    }

    #[test]
    fn renders_empty_state_and_rows() {
        let (_, mut app) = app();
        assert!(render(&app).contains("No students yet"));

        add_student(&mut app, ["Ann", "ann@x.com", "555", "Math"]);
        let screen = render(&app);
        assert!(screen.contains("ann@x.com"));
        assert!(screen.contains("Students (1/1)"));
    }

    #[test]
    fn renders_form_overlay() {
        let (_, mut app) = app();
        press(&mut app, KeyCode::Char('a'));
        let screen = render(&app);
        assert!(screen.contains("Add Student"));
        assert!(screen.contains("<required>"));
    }

    #[test]
    fn oversized_inputs_render_without_overflow() {
        let (_, mut app) = app();
        let long = "x".repeat(70_000);

        app.mode = Mode::Searching(SearchState { query: long.clone() });
        assert!(render(&app).contains("Search: "));

        let record = StudentRecord {
            id: "big".into(),
            name: long,
            email: "ann@x.com".into(),
            phone: "555".into(),
            course: "Math".into(),
        };
        app.mode = Mode::Form(StudentForm::from_record(&record));
        assert!(render(&app).contains("Update Student"));
    }

    #[test]
    fn cell_counts_clamp_to_u16() {
        assert_eq!(to_cells(12), 12);
        assert_eq!(to_cells(70_000), u16::MAX);
    }
}
