//! In-memory implementation of the [`KeyValueStore`] trait.
//!
//! Same semantics as the SQLite backend with nothing written to disk. Tests use
//! it to count writes and to simulate a failing backend.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;

use super::{KeyValueStore, StorageResult};
use crate::error::StorageError;

#[derive(Default)]
pub struct MemoryKv {
    entries: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail, simulating a full disk.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::Other,
                "storage quota exceeded",
            )));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_writable()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
