//! Application root: a record store plus the serializer that persists it
//!
//! Each mutation is followed by a wholesale save, then callers re-render from
//! [`Roster::view`].

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::RosterConfig;
use crate::error::Result;
use crate::record::{CourseFilter, RecordUpdate, StudentRecord};
use crate::store::{RecordStore, Serializer};

/// What a caller needs to redraw its record list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterView {
    /// Records passing the current search and course filter
    pub rows: Vec<StudentRecord>,
    /// Course options, "All" first
    pub courses: Vec<String>,
}

/// A record store bound to its durable state
pub struct Roster {
    store: RecordStore,
    serializer: Arc<dyn Serializer>,
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Roster")
            .field("records", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl Roster {
    /// Open the roster described by `config`, loading any saved records
    pub fn open(config: &RosterConfig) -> Result<Self> {
        let serializer = config.build_serializer();
        match serializer.load() {
            Ok(records) => Ok(Self::from_parts(RecordStore::from_records(records), serializer)),
            Err(e) if e.is_corrupt_state() && config.recover_corrupt => {
                warn!(
                    path = %config.data_file.display(),
                    error = %e,
                    "Saved records are corrupt, starting with an empty roster"
                );
                Ok(Self::from_parts(RecordStore::new(), serializer))
            }
            Err(e) => Err(e),
        }
    }

    /// Open with a caller-supplied serializer, loading any saved records
    pub fn with_serializer(serializer: impl Serializer + 'static) -> Result<Self> {
        let serializer: Arc<dyn Serializer> = Arc::new(serializer);
        let records = serializer.load()?;
        Ok(Self::from_parts(RecordStore::from_records(records), serializer))
    }

    fn from_parts(store: RecordStore, serializer: Arc<dyn Serializer>) -> Self {
        info!(records = store.len(), "Roster opened");
        Self { store, serializer }
    }

    /// Read-only access to the records
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Validate, append and save
    pub fn add(&mut self, record: StudentRecord) -> Result<()> {
        let mut next = self.store.clone();
        next.add(record)?;
        self.commit(next)
    }

    /// Update the first record with `id` and save. Returns whether a record matched.
    pub fn update(&mut self, id: &str, update: RecordUpdate) -> Result<bool> {
        let mut next = self.store.clone();
        if !next.update(id, update) {
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Delete every record with `id` and save. Returns how many were removed.
    pub fn delete(&mut self, id: &str) -> Result<usize> {
        let mut next = self.store.clone();
        let removed = next.delete(id);
        if removed > 0 {
            self.commit(next)?;
        }
        Ok(removed)
    }

    // The in-memory store only moves forward once the durable state holds `next`.
    fn commit(&mut self, next: RecordStore) -> Result<()> {
        self.serializer.save(next.list())?;
        self.store = next;
        Ok(())
    }

    /// Write the whole collection to durable state
    pub fn save(&self) -> Result<()> {
        self.serializer.save(self.store.list())
    }

    /// Replace the in-memory records with the durable state
    pub fn reload(&mut self) -> Result<()> {
        self.store = RecordStore::from_records(self.serializer.load()?);
        Ok(())
    }

    /// Filtered rows plus freshly derived course options
    pub fn view(&self, search: &str, course: &CourseFilter) -> RosterView {
        RosterView {
            rows: self.store.filter(search, course).into_iter().cloned().collect(),
            courses: self.store.distinct_courses(),
        }
    }

    pub(crate) fn serializer(&self) -> Arc<dyn Serializer> {
        Arc::clone(&self.serializer)
    }

    pub(crate) fn replace_store(&mut self, store: RecordStore) {
        self.store = store;
    }
}
