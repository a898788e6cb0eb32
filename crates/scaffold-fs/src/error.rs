//! Error types for scaffold-fs

use std::path::PathBuf;
use std::time::Duration;

/// Result type for scaffold-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures reading, writing or locking project files
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} config for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config extension `{extension}` (expected toml, json, yaml or yml)")]
    UnsupportedFormat { extension: String },

    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Another scaffold process held the file for the whole timeout.
    #[error("Timed out after {timeout:?} waiting for the lock on {path}")]
    LockFailed { path: PathBuf, timeout: Duration },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
