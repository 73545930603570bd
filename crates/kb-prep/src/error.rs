//! Error types for document preparation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for preparation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Preparation errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input export could not be loaded
    #[error("Failed to load records from '{}': {message}", .path.display())]
    RecordLoad { path: PathBuf, message: String },

    /// A single record has an unexpected shape
    #[error("Malformed record '{id}': {message}")]
    MalformedRecord { id: String, message: String },

    /// Object store error
    #[error("Object store error: {0}")]
    ObjectStore(String),

    /// Knowledge-base data source error
    #[error("Data source error: {0}")]
    DataSource(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a record load error
    pub fn record_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::RecordLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a malformed record error
    pub fn malformed_record(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create an object store error
    pub fn object_store(message: impl Into<String>) -> Self {
        Self::ObjectStore(message.into())
    }

    /// Create a data source error
    pub fn data_source(message: impl Into<String>) -> Self {
        Self::DataSource(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error aborts a whole run rather than a single record
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::RecordLoad { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(Error::config("missing bucket").is_fatal());
        assert!(Error::record_load("global_events.json", "not found").is_fatal());
        assert!(!Error::malformed_record("evt-1", "bad mentions").is_fatal());
        assert!(!Error::object_store("403").is_fatal());
    }

    #[test]
    fn test_display_includes_context() {
        let err = Error::record_load("global_events.json", "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "Failed to load records from 'global_events.json': expected value at line 1"
        );

        let err = Error::malformed_record("evt-1", "invalid type");
        assert_eq!(err.to_string(), "Malformed record 'evt-1': invalid type");
    }
}
