//! Error types for loading documents and persisting state.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside the search core, which is total.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A document could not be turned into cheatcodes.
    #[error("Failed to parse {}: {message}", .path.display())]
    Parse {
        /// Offending file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// No loader handles the file's extension.
    #[error("Unsupported document format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The global logger was already installed.
    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl Error {
    /// Create a parse error.
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
