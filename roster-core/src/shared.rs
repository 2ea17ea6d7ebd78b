//! Async handle for callers that keep file IO off their own thread
//!
//! Every operation goes through one [`tokio::sync::Mutex`], so saves never
//! interleave and each save sees the collection its own mutation produced.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinError;

use crate::config::RosterConfig;
use crate::error::{Error, Result};
use crate::record::{CourseFilter, RecordUpdate, StudentRecord};
use crate::roster::{Roster, RosterView};
use crate::store::RecordStore;

/// Cloneable, single-writer handle to a [`Roster`]
#[derive(Debug, Clone)]
pub struct SharedRoster {
    inner: Arc<Mutex<Roster>>,
}

impl SharedRoster {
    /// Wrap an already opened roster
    pub fn new(roster: Roster) -> Self {
        Self {
            inner: Arc::new(Mutex::new(roster)),
        }
    }

    /// Open the roster on the blocking pool
    pub async fn open(config: RosterConfig) -> Result<Self> {
        let roster = tokio::task::spawn_blocking(move || Roster::open(&config))
            .await
            .map_err(join_error)??;
        Ok(Self::new(roster))
    }

    /// Validate, append and save
    pub async fn add(&self, record: StudentRecord) -> Result<()> {
        let mut roster = self.inner.lock().await;
        let mut next = roster.store().clone();
        next.add(record)?;
        commit(&mut roster, next).await
    }

    /// Update the first record with `id` and save. Returns whether a record matched.
    pub async fn update(&self, id: &str, update: RecordUpdate) -> Result<bool> {
        let mut roster = self.inner.lock().await;
        let mut next = roster.store().clone();
        if !next.update(id, update) {
            return Ok(false);
        }
        commit(&mut roster, next).await?;
        Ok(true)
    }

    /// Delete every record with `id` and save. Returns how many were removed.
    pub async fn delete(&self, id: &str) -> Result<usize> {
        let mut roster = self.inner.lock().await;
        let mut next = roster.store().clone();
        let removed = next.delete(id);
        if removed > 0 {
            commit(&mut roster, next).await?;
        }
        Ok(removed)
    }

    /// Write the whole collection to durable state
    pub async fn save(&self) -> Result<()> {
        let mut roster = self.inner.lock().await;
        let current = roster.store().clone();
        commit(&mut roster, current).await
    }

    /// Replace the in-memory records with the durable state
    pub async fn reload(&self) -> Result<()> {
        let mut roster = self.inner.lock().await;
        let serializer = roster.serializer();
        let records = tokio::task::spawn_blocking(move || serializer.load())
            .await
            .map_err(join_error)??;
        roster.replace_store(RecordStore::from_records(records));
        Ok(())
    }

    /// Copy of every record in insertion order
    pub async fn list(&self) -> Vec<StudentRecord> {
        self.inner.lock().await.store().list().to_vec()
    }

    /// Filtered rows plus freshly derived course options
    pub async fn view(&self, search: &str, course: &CourseFilter) -> RosterView {
        self.inner.lock().await.view(search, course)
    }
}

// Called with the lock held so no other save can start until this one lands.
// The roster only takes `next` once it is on disk.
async fn commit(roster: &mut Roster, next: RecordStore) -> Result<()> {
    let serializer = roster.serializer();
    let next = tokio::task::spawn_blocking(move || serializer.save(next.list()).map(|()| next))
        .await
        .map_err(join_error)??;
    roster.replace_store(next);
    Ok(())
}

fn join_error(e: JoinError) -> Error {
    Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}
