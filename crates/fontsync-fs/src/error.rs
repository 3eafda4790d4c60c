//! Error types for fontsync-fs

use std::path::PathBuf;

/// Result type for fontsync-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fontsync-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file disappeared between scan and access. A legitimate race on
    /// cloud-synced directories; callers treat it as a per-file failure.
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error("Copy verification failed for {path}: expected {expected}, wrote {actual}")]
    CopyVerification {
        path: PathBuf,
        expected: String,
        actual: String,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}
