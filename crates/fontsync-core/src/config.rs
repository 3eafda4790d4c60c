//! Persisted configuration
//!
//! `font-sync` keeps a single TOML config at
//! `~/.config/font-sync/config.toml` holding the source directory, the
//! install directory, and the executor concurrency limit.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default number of concurrent workers in the executor.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Synchronization configuration.
///
/// Unknown fields in the file are ignored so older binaries can read
/// configs written by newer ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Shared source directory, typically on cloud storage.
    pub source_dir: PathBuf,

    /// Local installed-fonts directory.
    #[serde(default = "default_install_dir")]
    pub install_dir: PathBuf,

    /// Concurrency limit for the executor.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

/// Platform font directory for the current user.
pub fn default_install_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    if cfg!(target_os = "macos") {
        home.join("Library").join("Fonts")
    } else {
        home.join(".local").join("share").join("fonts")
    }
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("font-sync")
        .join("config.toml")
}

/// Default location of the state index, next to the config.
pub fn default_state_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("font-sync")
        .join("state.json")
}

impl SyncConfig {
    /// Create a config for the given source directory with platform
    /// defaults for everything else.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            install_dir: default_install_dir(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Load the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if the file does not exist, or
    /// [`Error::ConfigParse`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound { path: path.into() });
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| fontsync_fs::Error::io(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.into(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Save the configuration atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fontsync_fs::io::write_atomic(path, content.as_bytes())?;
        Ok(())
    }

    /// Validate that the source directory exists and is a directory.
    ///
    /// Fatal per the error taxonomy: an unreachable source aborts the sync
    /// before any scanning.
    pub fn validate(&self) -> Result<()> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(Error::SourceNotConfigured);
        }
        if !self.source_dir.is_dir() {
            return Err(fontsync_fs::Error::DirectoryNotFound {
                path: self.source_dir.clone(),
            }
            .into());
        }
        Ok(())
    }
}
