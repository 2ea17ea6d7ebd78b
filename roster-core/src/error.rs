//! Error types for the roster store

use thiserror::Error;

/// Result type alias using roster's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the roster store
#[derive(Debug, Error)]
pub enum Error {
    // ============ Store Errors ============
    /// A required record field was empty on add
    #[error("Validation error: field '{field}' is required")]
    Validation {
        /// Name of the first empty field
        field: &'static str,
    },

    // ============ Persistence Errors ============
    /// Durable read or write failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted state could not be decoded
    #[error("Deserialization error ({codec}): {message}")]
    Deserialization {
        /// Codec that rejected the bytes
        codec: &'static str,
        /// Decoder message
        message: String,
    },

    /// Records could not be encoded
    #[error("Serialization error ({codec}): {message}")]
    Serialization {
        /// Codec that failed
        codec: &'static str,
        /// Encoder message
        message: String,
    },

    // ============ System Errors ============
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging could not be initialized
    #[error("Logging error: {0}")]
    Logging(String),
}

impl Error {
    /// Create a new validation error for the named field
    pub fn validation(field: &'static str) -> Self {
        Self::Validation { field }
    }

    /// Create a new deserialization error
    pub fn deserialization(codec: &'static str, message: impl ToString) -> Self {
        Self::Deserialization {
            codec,
            message: message.to_string(),
        }
    }

    /// Create a new serialization error
    pub fn serialization(codec: &'static str, message: impl ToString) -> Self {
        Self::Serialization {
            codec,
            message: message.to_string(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if the error was caused by caller input rather than the environment
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Config(_))
    }

    /// Check if the error means the durable state is corrupt
    pub fn is_corrupt_state(&self) -> bool {
        matches!(self, Self::Deserialization { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(Error::validation("name").is_user_error());
        assert!(Error::config("bad format").is_user_error());
        assert!(!Error::deserialization("json", "eof").is_user_error());
        assert!(Error::deserialization("json", "eof").is_corrupt_state());

        let io: Error = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert!(!io.is_user_error());
        assert!(!io.is_corrupt_state());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::validation("course").to_string(),
            "Validation error: field 'course' is required"
        );
        assert_eq!(
            Error::deserialization("json", "expected value").to_string(),
            "Deserialization error (json): expected value"
        );
    }
}
