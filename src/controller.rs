//! Typed intents emitted by the presentation layer and the controller that
//! applies them to the record store and theme preference.
//!
//! The controller also owns the two pieces of transient session state the UI
//! needs: the edit cursor (which record a pending submit updates) and the
//! current search text (which subset of records is visible).

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::models::{StudentDraft, StudentRecord, Theme};
use crate::store::RecordStore;
use crate::theme::ThemePreference;

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Form submission. Creates a record, or updates the one under the edit
    /// cursor.
    Submit(StudentDraft),
    /// Start editing the record with this id.
    BeginEdit(String),
    /// Leave edit mode without saving.
    CancelEdit,
    /// Delete the record with this id. Confirmation happens before dispatch.
    Delete(String),
    /// Replace the search text.
    Search(String),
    ClearSearch,
    ToggleTheme,
}

/// What the presentation layer should render after an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Records matching the current search, newest first.
    pub visible: Vec<StudentRecord>,
    pub theme: Theme,
    /// Record created, updated, or opened for editing by the intent.
    pub affected: Option<StudentRecord>,
}

pub struct Controller {
    store: RecordStore,
    theme: ThemePreference,
    edit_cursor: Option<String>,
    search: String,
}

impl Controller {
    pub fn new(store: RecordStore, theme: ThemePreference) -> Self {
        Self {
            store,
            theme,
            edit_cursor: None,
            search: String::new(),
        }
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome> {
        debug!(?intent, "dispatching intent");
        let affected = match intent {
            Intent::Submit(draft) => Some(self.submit(&draft)?),
            Intent::BeginEdit(id) => {
                let record = self
                    .store
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| StoreError::NotFound(id.clone()))?;
                self.edit_cursor = Some(id);
                Some(record)
            }
            Intent::CancelEdit => {
                self.edit_cursor = None;
                None
            }
            Intent::Delete(id) => {
                self.store.delete(&id)?;
                if self.edit_cursor.as_deref() == Some(id.as_str()) {
                    self.edit_cursor = None;
                }
                None
            }
            Intent::Search(text) => {
                self.search = text;
                None
            }
            Intent::ClearSearch => {
                self.search.clear();
                None
            }
            Intent::ToggleTheme => {
                self.theme.toggle()?;
                None
            }
        };

        Ok(Outcome {
            visible: self.visible(),
            theme: self.theme.get(),
            affected,
        })
    }

    fn submit(&mut self, draft: &StudentDraft) -> Result<StudentRecord> {
        match self.edit_cursor.clone() {
            Some(id) => {
                let record = self.store.update(&id, draft)?;
                self.edit_cursor = None;
                Ok(record)
            }
            None => self.store.create(draft),
        }
    }

    /// Records matching the current search text.
    pub fn visible(&self) -> Vec<StudentRecord> {
        self.store.query(&self.search)
    }

    pub fn edit_cursor(&self) -> Option<&str> {
        self.edit_cursor.as_deref()
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::db::{KeyValueStore, MemoryKv};

    fn controller() -> (Rc<MemoryKv>, Controller) {
        let backend = Rc::new(MemoryKv::new());
        let shared: Rc<dyn KeyValueStore> = backend.clone();
        let store = RecordStore::load(shared.clone()).unwrap();
        let theme = ThemePreference::load(shared).unwrap();
        (backend, Controller::new(store, theme))
    }

    fn ann() -> StudentDraft {
        StudentDraft::new("Ann", "ann@x.com", "555", "Math")
    }

    #[test]
    fn submit_without_cursor_creates() {
        let (_, mut ctl) = controller();
        let outcome = ctl.dispatch(Intent::Submit(ann())).unwrap();
        let created = outcome.affected.unwrap();
        assert_eq!(outcome.visible, vec![created]);
    }

    #[test]
    fn submit_with_cursor_updates_and_clears_it() {
        let (_, mut ctl) = controller();
        let id = ctl.dispatch(Intent::Submit(ann())).unwrap().affected.unwrap().id;

        let opened = ctl.dispatch(Intent::BeginEdit(id.clone())).unwrap();
        assert_eq!(opened.affected.unwrap().name, "Ann");
        assert_eq!(ctl.edit_cursor(), Some(id.as_str()));

        let mut changed = ann();
        changed.name = "Annie".into();
        let outcome = ctl.dispatch(Intent::Submit(changed)).unwrap();
        assert_eq!(outcome.visible.len(), 1);
        assert_eq!(outcome.visible[0].id, id);
        assert_eq!(outcome.visible[0].name, "Annie");
        assert_eq!(ctl.edit_cursor(), None);
    }

    #[test]
    fn invalid_submit_keeps_cursor() {
        let (_, mut ctl) = controller();
        let id = ctl.dispatch(Intent::Submit(ann())).unwrap().affected.unwrap().id;
        ctl.dispatch(Intent::BeginEdit(id.clone())).unwrap();

        let err = ctl
            .dispatch(Intent::Submit(StudentDraft::new("", "a", "b", "c")))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));
        assert_eq!(ctl.edit_cursor(), Some(id.as_str()));
    }

    #[test]
    fn begin_edit_unknown_id_leaves_cursor_alone() {
        let (_, mut ctl) = controller();
        let err = ctl.dispatch(Intent::BeginEdit("nope".into())).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(ctl.edit_cursor(), None);
    }

    #[test]
    fn cancel_edit_returns_to_create_mode() {
        let (_, mut ctl) = controller();
        let id = ctl.dispatch(Intent::Submit(ann())).unwrap().affected.unwrap().id;
        ctl.dispatch(Intent::BeginEdit(id)).unwrap();
        ctl.dispatch(Intent::CancelEdit).unwrap();

        let outcome = ctl
            .dispatch(Intent::Submit(StudentDraft::new("Bo", "bo@x.com", "556", "Art")))
            .unwrap();
        assert_eq!(outcome.visible.len(), 2);
    }

    #[test]
    fn deleting_edited_record_clears_cursor() {
        let (_, mut ctl) = controller();
        let id = ctl.dispatch(Intent::Submit(ann())).unwrap().affected.unwrap().id;
        ctl.dispatch(Intent::BeginEdit(id.clone())).unwrap();
        let outcome = ctl.dispatch(Intent::Delete(id)).unwrap();
        assert!(outcome.visible.is_empty());
        assert_eq!(ctl.edit_cursor(), None);
    }

    #[test]
    fn search_filters_every_later_outcome() {
        let (_, mut ctl) = controller();
        ctl.dispatch(Intent::Submit(ann())).unwrap();
        ctl.dispatch(Intent::Search("history".into())).unwrap();

        let outcome = ctl
            .dispatch(Intent::Submit(StudentDraft::new("Bo", "bo@x.com", "556", "History")))
            .unwrap();
        assert_eq!(outcome.visible.len(), 1);
        assert_eq!(outcome.visible[0].name, "Bo");

        let cleared = ctl.dispatch(Intent::ClearSearch).unwrap();
        assert_eq!(cleared.visible.len(), 2);
        assert_eq!(ctl.search_text(), "");
    }

    #[test]
    fn toggle_theme_reports_new_theme() {
        let (_, mut ctl) = controller();
        assert_eq!(ctl.dispatch(Intent::ToggleTheme).unwrap().theme, Theme::Dark);
        assert_eq!(ctl.dispatch(Intent::ToggleTheme).unwrap().theme, Theme::Light);
    }

    #[test]
    fn storage_failure_is_reported_and_state_kept() {
        let (backend, mut ctl) = controller();
        ctl.dispatch(Intent::Submit(ann())).unwrap();
        backend.fail_writes(true);

        let err = ctl.dispatch(Intent::ToggleTheme).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(ctl.theme(), Theme::Light);
        assert_eq!(ctl.store().len(), 1);
    }
}
