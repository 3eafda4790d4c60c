//! Persisted state index
//!
//! The [`StateIndex`] records, per font name, the fingerprint that was last
//! successfully synchronized. It is what distinguishes "updated" from
//! "unchanged" and — for fonts that have vanished from the source —
//! "installed by this tool" from "locally managed". The index is an
//! optimization and ownership ledger, not a correctness-critical store:
//! when it is corrupt the sync recovers by re-deriving from actual file
//! content.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fontsync_fs::Fingerprint;

use crate::{Error, Result};

/// One record per font name ever successfully synced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintRecord {
    pub name: String,
    pub fingerprint: Fingerprint,
    /// Source file size at sync time. Skip-hashing heuristic input only;
    /// never part of an equality decision.
    #[serde(default)]
    pub size: u64,
    /// Source file mtime at sync time, as unix seconds. Heuristic input
    /// only, like `size`.
    #[serde(default)]
    pub modified: i64,
    pub last_synced_at: DateTime<Utc>,
}

/// On-disk form: a flat record list. Unknown extra fields are ignored so
/// the format stays forward-readable.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    fonts: Vec<FingerprintRecord>,
}

/// Mapping from font name to its last-synced fingerprint record.
#[derive(Debug, Default, Clone)]
pub struct StateIndex {
    records: BTreeMap<String, FingerprintRecord>,
}

/// Truncate a file mtime to the unix seconds stored in records.
pub fn mtime_secs(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}

/// Inverse of [`mtime_secs`], for tests constructing scan entries.
pub fn secs_to_mtime(secs: i64) -> SystemTime {
    if secs >= 0 {
        UNIX_EPOCH + Duration::from_secs(secs as u64)
    } else {
        UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs())
    }
}

impl StateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the index from disk.
    ///
    /// A missing file yields an empty index. An unparseable file yields
    /// [`Error::CorruptState`]; caller policy is to log a warning and
    /// continue with an empty index rather than abort.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no state index, starting empty");
            return Ok(Self::new());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| fontsync_fs::Error::io(path, e))?;
        let file: StateFile =
            serde_json::from_str(&content).map_err(|e| Error::CorruptState {
                path: path.into(),
                message: e.to_string(),
            })?;

        let mut records = BTreeMap::new();
        for record in file.fonts {
            records.insert(record.name.clone(), record);
        }
        Ok(Self { records })
    }

    /// Persist the index atomically (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = StateFile {
            fonts: self.records.values().cloned().collect(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        fontsync_fs::io::write_atomic(path, content.as_bytes())?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FingerprintRecord> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Upsert the record for a font after a successful install or update.
    pub fn record(&mut self, name: &str, fingerprint: Fingerprint, size: u64, modified: i64) {
        self.records.insert(
            name.to_string(),
            FingerprintRecord {
                name: name.to_string(),
                fingerprint,
                size,
                modified,
                last_synced_at: Utc::now(),
            },
        );
    }

    /// Drop the record for a font after a successful removal.
    pub fn forget(&mut self, name: &str) {
        self.records.remove(name);
    }
}
