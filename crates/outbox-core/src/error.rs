//! Error types for the selection controller.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while driving the picker state machine.
#[derive(Debug, Error)]
pub enum PickError {
    /// A non-directory path was pushed onto the directory stack. This is a
    /// caller contract violation, not a recoverable runtime condition.
    #[error("Only directories may be pushed: {path}")]
    NotADirectory { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error with path context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Preferences could not be written.
    #[error("Failed to persist preferences: {message}")]
    Prefs { message: String },
}

impl PickError {
    /// Create an I/O error with path context, classifying common kinds.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}
