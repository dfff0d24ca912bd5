//! Error types for walking and writing directory snapshots.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while taking or writing a snapshot.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A followed symbolic link points back at one of its ancestors.
    #[error("Symlink loop at {path} (points back to {ancestor})")]
    SymlinkLoop { path: PathBuf, ancestor: PathBuf },

    /// Two sibling entries map to the same key.
    #[error("Entry name collides with a sibling: {path}")]
    NameCollision { path: PathBuf },

    /// Generic I/O error during traversal.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output destination could not be created or written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tree could not be encoded.
    #[error("Failed to encode schema: {message}")]
    Serialize { message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl SchemaError {
    /// Create a traversal error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an output error with path context.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Check if this error happened while reading the source tree.
    pub fn is_traversal(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied { .. }
                | Self::NotFound { .. }
                | Self::NotADirectory { .. }
                | Self::SymlinkLoop { .. }
                | Self::NameCollision { .. }
                | Self::Io { .. }
        )
    }
}
