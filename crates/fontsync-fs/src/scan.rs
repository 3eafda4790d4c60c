//! Font directory scanning
//!
//! Produces an [`Inventory`] of candidate font files without computing any
//! fingerprints; hashing is deferred to the reconciler so large unchanged
//! fonts stay cheap to rescan.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use crate::{Error, Result};

/// Supported font file extensions, matched case-insensitively.
const FONT_EXTENSIONS: &[&str] = &["otf", "ttf"];

/// File name suffixes that mark an in-flight cloud-sync transfer.
const PARTIAL_SUFFIXES: &[&str] = &[".tmp", ".download", ".partial", "~"];

/// A font file discovered by a directory scan.
///
/// Immutable once read; a new scan produces new values. The content
/// fingerprint is deliberately absent here — it is computed lazily and
/// only for entries the reconciler needs to compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFile {
    /// File name, used as the font's identity. Case-sensitive: `Font.OTF`
    /// and `font.otf` are distinct fonts to the reconciler.
    pub name: String,
    /// Absolute path at scan time.
    pub path: PathBuf,
    /// Byte size at scan time.
    pub size: u64,
    /// Last-modified timestamp at scan time.
    pub modified: SystemTime,
}

/// Ordered mapping from font name to [`FontFile`], built from one scan.
pub type Inventory = BTreeMap<String, FontFile>;

/// Check whether a file name looks like a syncable font.
///
/// Filters to `.otf`/`.ttf` (case-insensitive), rejecting hidden files,
/// iCloud placeholders, and partial-transfer names.
pub fn is_font_file(name: &str) -> bool {
    if name.starts_with('.') {
        return false;
    }
    if name.contains(".icloud") {
        return false;
    }
    if PARTIAL_SUFFIXES.iter().any(|s| name.ends_with(s)) {
        return false;
    }
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            FONT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        }
        _ => false,
    }
}

/// Scan a directory (recursively) for font files.
///
/// Returns an empty [`Inventory`] for an empty but accessible directory.
///
/// # Errors
///
/// Returns [`Error::DirectoryNotFound`] if the path does not exist,
/// [`Error::NotADirectory`] if it is not a directory, or [`Error::Io`]
/// if it cannot be read.
pub fn scan_directory(path: &Path) -> Result<Inventory> {
    if !path.exists() {
        return Err(Error::DirectoryNotFound { path: path.into() });
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory { path: path.into() });
    }

    let mut inventory = Inventory::new();
    scan_into(path, &mut inventory)?;
    debug!(dir = %path.display(), count = inventory.len(), "scanned font directory");
    Ok(inventory)
}

fn scan_into(dir: &Path, inventory: &mut Inventory) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        // Hidden directories (.git, .Trash) are skipped along with
        // hidden files.
        if name.starts_with('.') {
            continue;
        }

        let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;

        if file_type.is_dir() {
            scan_into(&path, inventory)?;
            continue;
        }

        // Symlinks are resolved for files only; a symlink to a directory
        // is skipped rather than followed.
        if file_type.is_symlink() && path.is_dir() {
            continue;
        }

        if !is_font_file(&name) {
            continue;
        }

        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                // Vanished mid-scan. Skip rather than fail the inventory.
                warn!(file = %path.display(), error = %e, "skipping unreadable file");
                continue;
            }
        };

        if !metadata.is_file() {
            continue;
        }

        let modified = metadata.modified().map_err(|e| Error::io(&path, e))?;
        inventory.insert(
            name.clone(),
            FontFile {
                name,
                path,
                size: metadata.len(),
                modified,
            },
        );
    }

    Ok(())
}
