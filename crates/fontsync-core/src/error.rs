//! Error types for fontsync-core

use std::path::PathBuf;

/// Result type for fontsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fontsync-core operations
///
/// Fatal variants (`ConfigNotFound`, `SourceNotConfigured`, scan failures
/// surfaced through `Fs`) abort a sync before any action runs. Per-action
/// failures never appear here; they are captured as failed outcomes in the
/// [`crate::SyncReport`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found at expected path
    #[error("Configuration not found at {path} (run `font-sync init` first)")]
    ConfigNotFound { path: PathBuf },

    /// Source directory missing from the configuration
    #[error("No source directory configured")]
    SourceNotConfigured,

    /// Failed to parse the configuration file
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// State index exists but cannot be parsed. Recoverable: callers treat
    /// this as "no prior state" and let the reconciler re-derive from
    /// actual file content.
    #[error("State index at {path} is corrupt: {message}")]
    CorruptState { path: PathBuf, message: String },

    /// Filesystem error from fontsync-fs
    #[error(transparent)]
    Fs(#[from] fontsync_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
