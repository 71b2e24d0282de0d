use anyhow::{anyhow, Result};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::{StudentDraft, StudentRecord};

use super::helpers::Palette;

/// Internal representation of the student form fields.
#[derive(Default, Clone)]
pub(crate) struct StudentForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) course: String,
    pub(crate) active: StudentField,
    pub(crate) error: Option<String>,
    /// Set when the form was opened from an existing record.
    pub(crate) editing: bool,
}

/// Fields available within the student form, in tab order.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub(crate) enum StudentField {
    #[default]
    Name,
    Email,
    Phone,
    Course,
}

impl StudentField {
    pub(crate) const ALL: [StudentField; 4] = [
        StudentField::Name,
        StudentField::Email,
        StudentField::Phone,
        StudentField::Course,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            StudentField::Name => "Name",
            StudentField::Email => "Email",
            StudentField::Phone => "Phone",
            StudentField::Course => "Course",
        }
    }

    fn index(self) -> usize {
        match self {
            StudentField::Name => 0,
            StudentField::Email => 1,
            StudentField::Phone => 2,
            StudentField::Course => 3,
        }
    }
}

impl StudentForm {
    /// Prefill the form from the record being edited.
    pub(crate) fn from_record(record: &StudentRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            course: record.course.clone(),
            active: StudentField::Name,
            error: None,
            editing: true,
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        if self.editing {
            "Update Student"
        } else {
            "Add Student"
        }
    }

    /// Move focus forward, wrapping from Course back to Name.
    pub(crate) fn next_field(&mut self) {
        let next = (self.active.index() + 1) % StudentField::ALL.len();
        self.active = StudentField::ALL[next];
    }

    /// Move focus backward, wrapping from Name to Course.
    pub(crate) fn previous_field(&mut self) {
        let len = StudentField::ALL.len();
        let previous = (self.active.index() + len - 1) % len;
        self.active = StudentField::ALL[previous];
    }

    fn value_mut(&mut self, field: StudentField) -> &mut String {
        match field {
            StudentField::Name => &mut self.name,
            StudentField::Email => &mut self.email,
            StudentField::Phone => &mut self.phone,
            StudentField::Course => &mut self.course,
        }
    }

    pub(crate) fn value(&self, field: StudentField) -> &str {
        match field {
            StudentField::Name => &self.name,
            StudentField::Email => &self.email,
            StudentField::Phone => &self.phone,
            StudentField::Course => &self.course,
        }
    }

    /// Append a character to the active field. Control characters are
    /// rejected.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let field = self.active;
        self.value_mut(field).push(ch);
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    fn draft(&self) -> StudentDraft {
        StudentDraft::new(
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.course.clone(),
        )
    }

    /// Presence-check the inputs and return a trimmed draft ready for the
    /// store.
    pub(crate) fn parse_inputs(&self) -> Result<StudentDraft> {
        let draft = self.draft();
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(anyhow!("Please fill all fields ({}).", missing.join(", ")));
        }
        Ok(draft.trimmed())
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: StudentField, palette: &Palette) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else if value.is_empty() {
            Style::default().fg(palette.muted)
        } else {
            Style::default().fg(palette.fg)
        };

        Line::from(vec![
            Span::styled(format!("{}: ", field.label()), Style::default().fg(palette.fg)),
            Span::styled(display, style),
        ])
    }

    /// Character count of the requested field, used to place the cursor.
    pub(crate) fn value_len(&self, field: StudentField) -> usize {
        self.value(field).chars().count()
    }
}

/// Pending delete awaiting a yes/no answer.
#[derive(Clone)]
pub(crate) struct ConfirmStudentDelete {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
}

impl From<&StudentRecord> for ConfirmStudentDelete {
    fn from(record: &StudentRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
        }
    }
}
