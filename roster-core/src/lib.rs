//! # Roster Core - Student record management
//!
//! Core types and persistence for a small roster of student records.
//!
//! This crate provides:
//! - Record model (`record`) - Student records, partial updates, course filters
//! - Record store (`store`) - Ordered in-memory collection with add/update/delete/filter
//! - Serializers (`store::serializer`) - Whole-collection file persistence (JSON or bincode)
//! - Roster (`roster`) - Store bound to its durable file; saves after every mutation
//! - Shared roster (`shared`) - Async single-writer handle
//! - Configuration (`config`) and logging (`logging`)
//!
//! ```rust
//! use roster_core::prelude::*;
//!
//! # fn main() -> roster_core::Result<()> {
//! let mut roster = Roster::with_serializer(MemorySerializer::new())?;
//! roster.add(StudentRecord::new("1", "Amy", "20", "Math"))?;
//! roster.add(StudentRecord::new("2", "Bo", "21", "CS"))?;
//!
//! let view = roster.view("", &CourseFilter::from("CS"));
//! assert_eq!(view.rows[0].name, "Bo");
//! assert_eq!(view.courses, vec!["All", "CS", "Math"]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod roster;
pub mod shared;
pub mod store;

pub use error::{Error, Result};

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::config::{Format, RosterConfig};
    pub use crate::error::{Error, Result};
    pub use crate::record::{CourseFilter, RecordUpdate, StudentRecord, ALL_COURSES};
    pub use crate::roster::{Roster, RosterView};
    pub use crate::shared::SharedRoster;
    pub use crate::store::{
        FileSerializer, JsonCodec, MemorySerializer, RecordStore, Serializer, WriteMode,
    };
}
