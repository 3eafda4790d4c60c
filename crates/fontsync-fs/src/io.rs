//! Atomic I/O operations
//!
//! All mutations land via write-to-temp-then-rename so a crash or abort
//! never leaves a partial file at the final path.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use sha2::{Digest, Sha256};

use crate::fingerprint::Fingerprint;
use crate::{Error, Result};

const CHUNK_SIZE: usize = 64 * 1024;

/// Temp file path in the same directory as the target, so the final
/// rename stays on one filesystem.
fn temp_sibling(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    path.with_file_name(temp_name)
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename and an advisory lock to prevent
/// concurrent writers corrupting the target.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = temp_sibling(path);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed { path: path.into() })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file
        .sync_all()
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file
        .unlock()
        .map_err(|_| Error::LockFailed { path: path.into() })?;

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Copy a file atomically, hashing the bytes as they are written.
///
/// The copy streams through a temp file next to `dst`. When `expected` is
/// given, the digest of the written bytes is compared against it before the
/// rename; a mismatch (truncated read, concurrent modification of the
/// source) removes the temp file and fails without touching `dst`. The
/// destination adopts the source's permission bits.
///
/// Returns the fingerprint of the bytes actually written.
pub fn copy_atomic(src: &Path, dst: &Path, expected: Option<&Fingerprint>) -> Result<Fingerprint> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut reader = File::open(src).map_err(|e| Error::io(src, e))?;
    let temp_path = temp_sibling(dst);

    let result = copy_into_temp(&mut reader, &temp_path);
    let written = match result {
        Ok(fp) => fp,
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
    };

    if let Some(expected) = expected
        && &written != expected
    {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::CopyVerification {
            path: dst.into(),
            expected: expected.to_string(),
            actual: written.to_string(),
        });
    }

    // Permission bits carry over; timestamps are left to the filesystem.
    if let Ok(metadata) = fs::metadata(src) {
        let _ = fs::set_permissions(&temp_path, metadata.permissions());
    }

    fs::rename(&temp_path, dst).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(dst, e)
    })?;

    Ok(written)
}

fn copy_into_temp(reader: &mut File, temp_path: &Path) -> Result<Fingerprint> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf).map_err(|e| Error::io(temp_path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        temp_file
            .write_all(&buf[..n])
            .map_err(|e| Error::io(temp_path, e))?;
    }

    temp_file
        .sync_all()
        .map_err(|e| Error::io(temp_path, e))?;

    Ok(Fingerprint::from_hex(format!("{:x}", hasher.finalize())))
}

/// Remove a file.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the file is already gone.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::io(path, e))
}
