//! Error types for notegraph.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! This keeps error handling composable across crates.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all notegraph operations.
///
/// Note that a document without a title, an unknown alias, or a missing
/// identifier marker are *not* errors: they degrade to fewer nodes and edges.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unreadable document or directory, with the path that failed
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a read error carrying the offending path
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::config_error("title_max_length must be positive");
        assert!(err.to_string().starts_with("Configuration error"));

        let err = Error::io(io::Error::other("disk on fire"));
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_read_error_mentions_path() {
        let err = Error::read(
            "/ws/missing.md",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/ws/missing.md"));
        assert!(msg.contains("gone"));
    }
}
