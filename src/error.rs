//! Error types for mkvedit.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for mkvedit.
#[derive(Error, Debug)]
pub enum Error {
    // Working directory errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    // Input errors
    #[error("Invalid processing option: {0}")]
    InvalidMode(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid offsets: {0}")]
    InvalidOffset(String),

    // Commit errors
    #[error("mkvpropedit failed for {path}: {message}")]
    MetadataWriteFailed { path: PathBuf, message: String },

    #[error("Failed to rename {}: {source}", .path.display())]
    RenameFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Target file already exists: {0}")]
    FileAlreadyExists(String),

    // Terminal errors
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    // Config errors
    #[error("Invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Whether the error ends the whole run rather than a single plan or
    /// apply pass.
    pub fn is_fatal_to_run(&self) -> bool {
        matches!(
            self,
            Error::PathNotFound(_) | Error::NotADirectory(_) | Error::InvalidMode(_)
        )
    }
}
