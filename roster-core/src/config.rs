//! Roster configuration
//!
//! Defaults can be overridden from the environment:
//!
//! | Variable                 | Values                  | Default         |
//! |--------------------------|-------------------------|-----------------|
//! | `ROSTER_DATA_FILE`       | path                    | `students.json` |
//! | `ROSTER_FORMAT`          | `json`, `bincode`       | `json`          |
//! | `ROSTER_PRETTY`          | `true`, `false`         | `true`          |
//! | `ROSTER_WRITE_MODE`      | `atomic`, `overwrite`   | `atomic`        |
//! | `ROSTER_RECOVER_CORRUPT` | `true`, `false`         | `false`         |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::store::{BincodeCodec, FileSerializer, JsonCodec, Serializer, WriteMode};

/// Default durable file name
pub const DEFAULT_DATA_FILE: &str = "students.json";

/// Durable file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// JSON array of objects
    #[default]
    Json,
    /// Binary blob
    Bincode,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "bincode" | "binary" => Ok(Self::Bincode),
            other => Err(Error::config(format!("unknown format '{}'", other))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Bincode => f.write_str("bincode"),
        }
    }
}

impl FromStr for WriteMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atomic" => Ok(Self::Atomic),
            "overwrite" => Ok(Self::Overwrite),
            other => Err(Error::config(format!("unknown write mode '{}'", other))),
        }
    }
}

/// Configuration for opening a [`Roster`](crate::roster::Roster)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// Path to the durable file
    pub data_file: PathBuf,
    /// Durable file format
    pub format: Format,
    /// Indent JSON output
    pub pretty: bool,
    /// How saves replace the file
    pub write_mode: WriteMode,
    /// Start empty instead of failing when the file is corrupt
    pub recover_corrupt: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            format: Format::default(),
            pretty: true,
            write_mode: WriteMode::default(),
            recover_corrupt: false,
        }
    }
}

impl RosterConfig {
    /// Create config for a data file with default settings
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `ROSTER_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `ROSTER_*` key
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("ROSTER_DATA_FILE").filter(|p| !p.trim().is_empty()) {
            config.data_file = PathBuf::from(path);
        }
        if let Some(format) = lookup("ROSTER_FORMAT") {
            config.format = format.parse()?;
        }
        if let Some(pretty) = lookup("ROSTER_PRETTY") {
            config.pretty = parse_bool("ROSTER_PRETTY", &pretty)?;
        }
        if let Some(mode) = lookup("ROSTER_WRITE_MODE") {
            config.write_mode = mode.parse()?;
        }
        if let Some(recover) = lookup("ROSTER_RECOVER_CORRUPT") {
            config.recover_corrupt = parse_bool("ROSTER_RECOVER_CORRUPT", &recover)?;
        }

        Ok(config)
    }

    /// Set the data file
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Set the format
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Toggle JSON indentation
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set the write mode
    pub fn write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    /// Toggle corrupt-file recovery
    pub fn recover_corrupt(mut self, recover: bool) -> Self {
        self.recover_corrupt = recover;
        self
    }

    /// Build the file serializer this config describes
    pub fn build_serializer(&self) -> Arc<dyn Serializer> {
        let path = self.data_file.clone();
        match self.format {
            Format::Json => {
                let codec = if self.pretty {
                    JsonCodec::pretty()
                } else {
                    JsonCodec::compact()
                };
                Arc::new(FileSerializer::new(path, codec).with_write_mode(self.write_mode))
            }
            Format::Bincode => {
                Arc::new(FileSerializer::new(path, BincodeCodec).with_write_mode(self.write_mode))
            }
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::config(format!("{} must be a boolean, got '{}'", key, other))),
    }
}
