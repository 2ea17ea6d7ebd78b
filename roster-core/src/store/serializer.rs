//! Durable persistence for record collections
//!
//! Every save rewrites the whole collection. A missing file loads as an empty
//! collection; undecodable bytes surface as [`Error::Deserialization`](crate::error::Error::Deserialization).

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use super::codec::{JsonCodec, RecordCodec};
use crate::error::Result;
use crate::record::StudentRecord;

/// Reads and writes a full record collection
pub trait Serializer: Send + Sync {
    /// Overwrite the durable state with `records`
    fn save(&self, records: &[StudentRecord]) -> Result<()>;

    /// Read the durable state; empty when nothing was saved yet
    fn load(&self) -> Result<Vec<StudentRecord>>;
}

/// How a file is replaced on save
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate the file in place and write
    Overwrite,
    /// Write a sibling temp file, then rename it over the target
    #[default]
    Atomic,
}

/// Serializer backed by a single named file
#[derive(Debug, Clone)]
pub struct FileSerializer<C = JsonCodec> {
    path: PathBuf,
    codec: C,
    write_mode: WriteMode,
}

impl FileSerializer<JsonCodec> {
    /// Pretty JSON file at `path`
    pub fn json(path: impl Into<PathBuf>) -> Self {
        Self::new(path, JsonCodec::default())
    }
}

impl<C: RecordCodec> FileSerializer<C> {
    /// File at `path` using `codec`
    pub fn new(path: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            path: path.into(),
            codec,
            write_mode: WriteMode::default(),
        }
    }

    /// Set the write mode
    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    /// Path of the durable file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_atomic(&self, bytes: &[u8]) -> Result<()> {
        let tmp_path = self.temp_path();
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

impl<C: RecordCodec> Serializer for FileSerializer<C> {
    fn save(&self, records: &[StudentRecord]) -> Result<()> {
        let bytes = self.codec.encode(records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        match self.write_mode {
            WriteMode::Overwrite => fs::write(&self.path, &bytes)?,
            WriteMode::Atomic => self.write_atomic(&bytes)?,
        }

        info!(
            path = %self.path.display(),
            codec = self.codec.name(),
            records = records.len(),
            "Saved records"
        );
        Ok(())
    }

    fn load(&self) -> Result<Vec<StudentRecord>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No saved records, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let records = self.codec.decode(&bytes)?;
        info!(
            path = %self.path.display(),
            codec = self.codec.name(),
            records = records.len(),
            "Loaded records"
        );
        Ok(records)
    }
}

/// Serializer that keeps the last saved collection in memory
#[derive(Debug, Default)]
pub struct MemorySerializer {
    saved: Mutex<Option<Vec<StudentRecord>>>,
}

impl MemorySerializer {
    /// Nothing saved yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded with a saved collection
    pub fn with_records(records: Vec<StudentRecord>) -> Self {
        Self {
            saved: Mutex::new(Some(records)),
        }
    }

    /// The last saved collection, if any
    pub fn saved(&self) -> Option<Vec<StudentRecord>> {
        self.saved
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Serializer for MemorySerializer {
    fn save(&self, records: &[StudentRecord]) -> Result<()> {
        *self
            .saved
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(records.to_vec());
        Ok(())
    }

    fn load(&self) -> Result<Vec<StudentRecord>> {
        Ok(self.saved().unwrap_or_default())
    }
}

impl<S: Serializer + ?Sized> Serializer for std::sync::Arc<S> {
    fn save(&self, records: &[StudentRecord]) -> Result<()> {
        (**self).save(records)
    }

    fn load(&self) -> Result<Vec<StudentRecord>> {
        (**self).load()
    }
}
