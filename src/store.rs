//! The record store: the authoritative in-memory student collection and its
//! persisted mirror under [`STUDENTS_KEY`].
//!
//! Every mutation is staged on a copy of the collection, written in full to
//! the backend, and only then committed to memory. A failed write therefore
//! leaves the store exactly as it was before the call.

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use tracing::{debug, info};

use crate::db::{read_json, write_json, KeyValueStore, STUDENTS_KEY};
use crate::error::{Result, StoreError};
use crate::models::{StudentDraft, StudentRecord};

/// Length of the random part of generated ids.
const ID_SUFFIX_LEN: usize = 6;

pub struct RecordStore {
    backend: Rc<dyn KeyValueStore>,
    records: Vec<StudentRecord>,
}

impl RecordStore {
    /// Hydrate the collection from the backend. A missing key means nobody
    /// has saved anything yet and yields an empty store.
    pub fn load(backend: Rc<dyn KeyValueStore>) -> Result<Self> {
        let records: Vec<StudentRecord> =
            read_json(backend.as_ref(), STUDENTS_KEY)?.unwrap_or_default();
        info!(count = records.len(), "loaded student records");
        Ok(Self { backend, records })
    }

    /// Newest-first view of every record.
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Add a record at the front of the collection and persist.
    pub fn create(&mut self, draft: &StudentDraft) -> Result<StudentRecord> {
        let draft = validate(draft)?;
        let record = StudentRecord {
            id: self.fresh_id(),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            course: draft.course,
        };

        let mut staged = Vec::with_capacity(self.records.len() + 1);
        staged.push(record.clone());
        staged.extend(self.records.iter().cloned());
        self.commit(staged)?;

        info!(id = %record.id, "created student");
        Ok(record)
    }

    /// Replace the editable fields of the record with `id`, keeping its
    /// position.
    pub fn update(&mut self, id: &str, draft: &StudentDraft) -> Result<StudentRecord> {
        let draft = validate(draft)?;
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut staged = self.records.clone();
        staged[index].apply(&draft);
        let updated = staged[index].clone();
        self.commit(staged)?;

        info!(id, "updated student");
        Ok(updated)
    }

    /// Remove the record with `id`. Unknown ids are ignored and nothing is
    /// written.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let Some(index) = self.position(id) else {
            debug!(id, "delete ignored, no such student");
            return Ok(());
        };

        let mut staged = self.records.clone();
        staged.remove(index);
        self.commit(staged)?;

        info!(id, "deleted student");
        Ok(())
    }

    /// Records whose name, email, or course contain `needle`, ignoring case.
    /// A blank needle returns the whole collection. Order is preserved.
    pub fn query(&self, needle: &str) -> Vec<StudentRecord> {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.clone();
        }
        self.records
            .iter()
            .filter(|record| record.matches(&needle))
            .cloned()
            .collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    fn commit(&mut self, staged: Vec<StudentRecord>) -> Result<()> {
        write_json(self.backend.as_ref(), STUDENTS_KEY, &staged)?;
        self.records = staged;
        Ok(())
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = generate_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn validate(draft: &StudentDraft) -> Result<StudentDraft> {
    let missing = draft.missing_fields();
    if missing.is_empty() {
        Ok(draft.trimmed())
    } else {
        Err(StoreError::Validation { missing })
    }
}

/// Millisecond timestamp in base 36 followed by a random base-36 suffix.
pub(crate) fn generate_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();

    let mut id = to_base36(millis);
    let mut rng = rand::thread_rng();
    for _ in 0..ID_SUFFIX_LEN {
        let digit = rng.gen_range(0..36u32);
        // from_digit never fails for digits below the radix.
        id.push(std::char::from_digit(digit, 36).unwrap_or('0'));
    }
    id
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        let digit = (value % 36) as u32;
        digits.push(std::char::from_digit(digit, 36).unwrap_or('0'));
        value /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryKv;

    fn empty_store() -> (Rc<MemoryKv>, RecordStore) {
        let backend = Rc::new(MemoryKv::new());
        let store = RecordStore::load(backend.clone()).unwrap();
        (backend, store)
    }

    fn draft(name: &str, course: &str) -> StudentDraft {
        StudentDraft::new(name, format!("{}@x.com", name.to_lowercase()), "555", course)
    }

    #[test]
    fn base36_matches_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_296), "100");
    }

    #[test]
    fn generated_ids_have_random_suffix() {
        let id = generate_id();
        assert!(id.len() > ID_SUFFIX_LEN);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn create_trims_fields_and_prepends() {
        let (_, mut store) = empty_store();
        let first = store.create(&draft("Ann", "Math")).unwrap();
        let second = store
            .create(&StudentDraft::new("  Bo ", " bo@x.com", "556 ", "Art"))
            .unwrap();

        assert_eq!(second.name, "Bo");
        assert_eq!(second.email, "bo@x.com");
        assert_eq!(second.phone, "556");
        let ids: Vec<_> = store.records().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn create_rejects_blank_fields_without_writing() {
        let (backend, mut store) = empty_store();
        let err = store
            .create(&StudentDraft::new("Ann", "", "555", "   "))
            .unwrap_err();
        match err {
            StoreError::Validation { missing } => assert_eq!(missing, vec!["email", "course"]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.is_empty());
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let (_, mut store) = empty_store();
        store.create(&draft("Ann", "Math")).unwrap();
        let err = store.update("missing", &draft("Bo", "Art")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(store.records()[0].name, "Ann");
    }

    #[test]
    fn update_validates_before_lookup() {
        let (_, mut store) = empty_store();
        let err = store
            .update("missing", &StudentDraft::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));
    }

    #[test]
    fn delete_missing_id_does_not_write() {
        let (backend, mut store) = empty_store();
        store.create(&draft("Ann", "Math")).unwrap();
        let writes = backend.write_count();
        store.delete("missing").unwrap();
        assert_eq!(backend.write_count(), writes);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn failed_write_rolls_back_every_mutation() {
        let (backend, mut store) = empty_store();
        let ann = store.create(&draft("Ann", "Math")).unwrap();
        let before = store.records().to_vec();

        backend.fail_writes(true);
        let err = store.create(&draft("Bo", "Art")).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert!(store.update(&ann.id, &draft("Annie", "Math")).is_err());
        assert!(store.delete(&ann.id).is_err());

        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn query_trims_and_ignores_case() {
        let (_, mut store) = empty_store();
        store.create(&draft("Ann", "Math")).unwrap();
        store.create(&draft("Bo", "History")).unwrap();

        let hits = store.query("  MATH ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ann");
        assert_eq!(store.query("   ").len(), 2);
        assert!(store.query("555").is_empty());
    }

    #[test]
    fn load_reads_what_was_persisted() {
        let (backend, mut store) = empty_store();
        store.create(&draft("Ann", "Math")).unwrap();
        store.create(&draft("Bo", "Art")).unwrap();

        let reloaded = RecordStore::load(backend).unwrap();
        assert_eq!(reloaded.records(), store.records());
    }
}
