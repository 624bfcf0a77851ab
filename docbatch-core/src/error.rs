//! Error types for batch generation

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate
pub type BatchResult<T> = Result<T, BatchError>;

/// Errors raised while scanning the tree or writing the script
#[derive(Debug, Error)]
pub enum BatchError {
    /// The directory walk failed (missing root, unreadable entry, link loop)
    #[error("failed to scan {}: {source}", .path.display())]
    Scan {
        path:   PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A candidate path cannot be embedded in a UTF-8 script
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// A configuration file could not be parsed
    #[error("invalid configuration in {}: {source}", .path.display())]
    Config {
        path:   PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration parsed but holds unusable values
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BatchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BatchError::Io {
            path: path.into(),
            source,
        }
    }
}
