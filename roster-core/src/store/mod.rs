//! In-memory record store and its persistence
//!
//! [`RecordStore`] holds the ordered collection. [`Serializer`] implementations
//! write it wholesale to durable storage and read it back.

pub mod codec;
pub mod serializer;

pub use codec::{BincodeCodec, JsonCodec, RecordCodec};
pub use serializer::{FileSerializer, MemorySerializer, Serializer, WriteMode};

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::Result;
use crate::record::{CourseFilter, RecordUpdate, StudentRecord, ALL_COURSES};

/// Ordered collection of student records.
///
/// Insertion order is preserved and identifiers are not required to be
/// unique. `update` acts on the first matching record while `delete` removes
/// every match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<StudentRecord>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already loaded records without validating them
    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    /// Take the records out of the store
    pub fn into_records(self) -> Vec<StudentRecord> {
        self.records
    }

    /// Append a record. Fails without touching the store if any field is empty.
    pub fn add(&mut self, record: StudentRecord) -> Result<()> {
        record.validate()?;
        debug!(id = %record.id, "Adding record");
        self.records.push(record);
        Ok(())
    }

    /// Overwrite fields of the first record with this id.
    ///
    /// Returns `false` when no record matched, in which case nothing changes.
    pub fn update(&mut self, id: &str, update: RecordUpdate) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                debug!(id, "Updating record");
                record.apply(update);
                true
            }
            None => {
                debug!(id, "Update matched no record");
                false
            }
        }
    }

    /// Remove every record with this id and return how many were removed
    pub fn delete(&mut self, id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = before - self.records.len();
        debug!(id, removed, "Deleted records");
        removed
    }

    /// All records in insertion order
    pub fn list(&self) -> &[StudentRecord] {
        &self.records
    }

    /// First record with this id
    pub fn get(&self, id: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records whose name or id contains `search` (case-insensitive) and whose
    /// course passes `course`. An empty search matches everything.
    pub fn filter(&self, search: &str, course: &CourseFilter) -> Vec<&StudentRecord> {
        let needle = search.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.matches_search(&needle) && course.accepts(&r.course))
            .collect()
    }

    /// Course options: "All" followed by each distinct course, sorted
    pub fn distinct_courses(&self) -> Vec<String> {
        let courses: BTreeSet<&str> = self
            .records
            .iter()
            .map(|r| r.course.as_str())
            .filter(|c| *c != ALL_COURSES)
            .collect();
        std::iter::once(ALL_COURSES)
            .chain(courses)
            .map(str::to_string)
            .collect()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
