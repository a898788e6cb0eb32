//! Error types for scaffold-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from scaffold-content
    #[error(transparent)]
    Content(#[from] scaffold_content::Error),

    /// Error from scaffold-fs
    #[error(transparent)]
    Fs(#[from] scaffold_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },

    /// Some documents were left for a manual edit; the report already
    /// showed what to add.
    #[error("{count} file(s) could not be updated automatically")]
    Unrecognized { count: usize },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
