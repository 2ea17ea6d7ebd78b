//! Logging configuration with optional file rotation
//!
//! # Example
//!
//! ```rust,no_run
//! use roster_core::logging::init_logging;
//!
//! init_logging("info", Some(std::path::Path::new("logs"))).unwrap();
//! ```

use std::path::Path;

use crate::error::{Error, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Prefix for rotated log files
pub const LOG_FILE_PREFIX: &str = "roster.log";

/// Initialize logging
///
/// - `level`: Default filter (e.g. "info", "roster_core=debug"); `RUST_LOG` wins when set
/// - `log_dir`: When given, also write daily-rotated logs there
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<()> {
    let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), level)?;

    // Stderr keeps stdout free for command output
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    let file_layer = match log_dir {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .build(dir)
                .map_err(|e| Error::Logging(format!("Failed to create log appender: {}", e)))?;
            Some(fmt::layer().with_writer(appender).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Logging(format!("Failed to init tracing: {}", e)))?;

    Ok(())
}

/// `env_directives` (the `RUST_LOG` value) wins when it parses, otherwise `level`
fn build_filter(env_directives: Option<&str>, level: &str) -> Result<EnvFilter> {
    if let Some(filter) = env_directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
    {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|e| Error::Logging(format!("Invalid log filter '{}': {}", level, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_invalid_level_is_reported() {
        let err = build_filter(None, "roster_core=notalevel").unwrap_err();
        assert!(matches!(err, Error::Logging(_)));
        assert!(err.to_string().contains("roster_core=notalevel"));
    }

    #[test]
    fn test_env_directives_override_level() {
        let filter = build_filter(Some("roster_core=trace"), "warn").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));

        // unusable env value falls back to the configured level
        let filter = build_filter(Some("roster_core=notalevel"), "info").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));

        let filter = build_filter(Some("  "), "debug").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
