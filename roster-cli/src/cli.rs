use std::path::PathBuf;

use clap::{Parser, Subcommand};
use roster_core::config::Format;

#[derive(Debug, Parser)]
#[command(name = "roster", about = "Manage a roster of student records", version)]
pub struct CommandLine {
    /// Durable file holding the roster (overrides ROSTER_DATA_FILE)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,
    /// File format: json or bincode (overrides ROSTER_FORMAT)
    #[arg(long, global = true)]
    pub format: Option<Format>,
    /// Write single-line JSON
    #[arg(long, global = true)]
    pub compact: bool,
    /// Start empty when the data file is corrupt
    #[arg(long, global = true)]
    pub recover_corrupt: bool,
    /// Default log filter, e.g. info or roster_core=debug (RUST_LOG wins)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
    /// Also write daily-rotated logs to this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a student
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: String,
        #[arg(long)]
        course: String,
    },
    /// Update the first student with this id
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        course: Option<String>,
    },
    /// Delete every student with this id
    Delete {
        id: String,
    },
    /// List students, optionally filtered
    List {
        /// Case-insensitive match on name or id
        #[arg(long, short, default_value = "")]
        search: String,
        #[arg(long, short, default_value = "All")]
        course: String,
    },
    /// Print the course filter options
    Courses,
}
