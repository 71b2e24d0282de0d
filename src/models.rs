//! Domain models that mirror the persisted JSON layout and get passed
//! throughout the TUI. These types stay light-weight data holders so the store
//! and the presentation layer can focus on their own concerns.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single student's contact and enrollment data. Field names are part of the
/// persisted format under the `sms_students` key.
pub struct StudentRecord {
    /// Opaque token assigned on creation. Never rewritten by updates because
    /// edit/delete flows bubble the id back to the store.
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
}

impl StudentRecord {
    /// Whether name, email, or course contains an already lowercased needle.
    /// Phone numbers are not searched.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.course.to_lowercase().contains(needle)
    }

    /// Overwrite the editable fields, keeping the id.
    pub(crate) fn apply(&mut self, draft: &StudentDraft) {
        self.name = draft.name.clone();
        self.email = draft.email.clone();
        self.phone = draft.phone.clone();
        self.course = draft.course.clone();
    }
}

/// The four editable fields of a record, without an id. Used as the payload
/// for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
}

impl StudentDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        course: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            course: course.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            course: self.course.trim().to_string(),
        }
    }

    /// Labels of the fields that are empty after trimming, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("course", &self.course),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect()
    }
}

/// Two-valued colour preference, persisted as `"light"` or `"dark"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
