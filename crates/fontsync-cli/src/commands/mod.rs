//! Command implementations
//!
//! Each command is thin: load config and state, call into fontsync-core,
//! render the result.

mod clean;
mod import;
mod init;
mod list;
mod status;
mod sync;

pub use clean::run_clean;
pub use import::run_import;
pub use init::run_init;
pub use list::run_list;
pub use status::run_status;
pub use sync::run_sync;

use std::path::{Path, PathBuf};

use colored::Colorize;

use fontsync_core::{Error as CoreError, StateIndex, SyncConfig};
use fontsync_fs::{Inventory, scan_directory};

use crate::error::Result;

/// Locations of the persisted config and state files. Commands take this
/// explicitly so tests can point them at temp directories.
#[derive(Debug, Clone)]
pub struct Paths {
    pub config: PathBuf,
    pub state: PathBuf,
}

impl Paths {
    pub fn default_locations() -> Self {
        Self {
            config: fontsync_core::default_config_path(),
            state: fontsync_core::default_state_path(),
        }
    }
}

/// Load and validate the configuration. Fatal when missing or when the
/// source directory is unreachable.
pub(crate) fn load_config(paths: &Paths) -> Result<SyncConfig> {
    let config = SyncConfig::load(&paths.config)?;
    config.validate()?;
    Ok(config)
}

/// Load the state index, recovering from corruption with a warning. The
/// index is a cache; the reconciler re-derives correctness from content.
pub(crate) fn load_state_lenient(paths: &Paths) -> Result<StateIndex> {
    match StateIndex::load(&paths.state) {
        Ok(state) => Ok(state),
        Err(CoreError::CorruptState { path, message }) => {
            eprintln!(
                "{}: state index at {} is corrupt ({}), continuing with empty state",
                "warning".yellow().bold(),
                path.display(),
                message
            );
            Ok(StateIndex::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Scan the install directory, treating a not-yet-created directory as an
/// empty inventory. The first sync creates it.
pub(crate) fn scan_installed(install_dir: &Path) -> Result<Inventory> {
    if !install_dir.exists() {
        return Ok(Inventory::new());
    }
    Ok(scan_directory(install_dir)?)
}

/// Runtime for driving the async executor from synchronous commands.
pub(crate) fn build_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}
