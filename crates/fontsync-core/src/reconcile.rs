//! Reconciliation
//!
//! Pure classification of (source inventory, installed inventory, state
//! index) into a [`SyncPlan`]. Per font name in the union of the two
//! inventories:
//!
//! 1. Source only -> Install.
//! 2. Both, fingerprints equal -> no action.
//! 3. Both, fingerprints differ -> Update; source is always authoritative,
//!    never "newest wins by timestamp" (cloud-sync clients rewrite mtimes).
//! 4. Installed only with a state record -> Orphan.
//! 5. Installed only without a record -> no action; the tool never deletes
//!    fonts it did not install.
//!
//! Hashing is avoided when the state record's size+mtime match the source
//! file — a cache heuristic only. When hashing does occur, equality is
//! decided by content digest alone.

use std::path::Path;

use tracing::debug;

use fontsync_fs::scan::FontFile;
use fontsync_fs::{Fingerprint, Inventory, fingerprint_file};

use crate::action::{Action, SyncPlan};
use crate::state::{FingerprintRecord, StateIndex, mtime_secs};

/// Seam for fingerprint computation, so tests can count or stub hashes.
pub trait FileHasher {
    fn fingerprint(&mut self, path: &Path) -> fontsync_fs::Result<Fingerprint>;
}

/// Production hasher: streaming SHA-256 from disk.
#[derive(Debug, Default)]
pub struct DiskHasher;

impl FileHasher for DiskHasher {
    fn fingerprint(&mut self, path: &Path) -> fontsync_fs::Result<Fingerprint> {
        fingerprint_file(path)
    }
}

/// True when the record's size+mtime still describe this file, meaning the
/// recorded fingerprint can stand in for a fresh hash.
fn heuristic_match(record: &FingerprintRecord, file: &FontFile) -> bool {
    record.size == file.size && record.modified == mtime_secs(file.modified)
}

/// Source-side fingerprint, reusing the recorded one when the heuristic
/// holds.
fn source_fingerprint(
    file: &FontFile,
    record: Option<&FingerprintRecord>,
    hasher: &mut dyn FileHasher,
) -> fontsync_fs::Result<Fingerprint> {
    if let Some(record) = record
        && heuristic_match(record, file)
    {
        debug!(font = %file.name, "size+mtime unchanged, skipping hash");
        return Ok(record.fingerprint.clone());
    }
    hasher.fingerprint(&file.path)
}

/// Build the sync plan.
///
/// Pure in effect: reads file content via `hasher` but mutates nothing.
/// Per-file hash failures are collected into the plan instead of aborting,
/// so one unreadable font never blocks the rest of the run.
pub fn reconcile(
    source: &Inventory,
    installed: &Inventory,
    state: &StateIndex,
    hasher: &mut dyn FileHasher,
) -> SyncPlan {
    let mut plan = SyncPlan::default();
    let mut orphans = Vec::new();

    for (name, src) in source {
        let record = state.get(name);

        let src_fp = match source_fingerprint(src, record, hasher) {
            Ok(fp) => fp,
            Err(e) => {
                plan.hash_failures.push((name.clone(), e.to_string()));
                continue;
            }
        };

        let Some(inst) = installed.get(name) else {
            plan.actions.push(Action::Install {
                name: name.clone(),
                source_path: src.path.clone(),
                fingerprint: src_fp,
                size: src.size,
                modified: mtime_secs(src.modified),
            });
            continue;
        };

        // A record's fingerprint was verified against the installed copy
        // at install time, so it stands in for hashing that copy again.
        let installed_fp = match record {
            Some(record) => record.fingerprint.clone(),
            None => match hasher.fingerprint(&inst.path) {
                Ok(fp) => fp,
                Err(e) => {
                    plan.hash_failures.push((name.clone(), e.to_string()));
                    continue;
                }
            },
        };

        if installed_fp == src_fp {
            plan.up_to_date.push(name.clone());
        } else {
            plan.actions.push(Action::Update {
                name: name.clone(),
                source_path: src.path.clone(),
                old_fingerprint: installed_fp,
                new_fingerprint: src_fp,
                size: src.size,
                modified: mtime_secs(src.modified),
            });
        }
    }

    for (name, inst) in installed {
        if source.contains_key(name) {
            continue;
        }
        if state.contains(name) {
            orphans.push(Action::Orphan {
                name: name.clone(),
                installed_path: inst.path.clone(),
            });
        } else {
            plan.untracked.push(name.clone());
        }
    }

    // Non-destructive actions first; the executor's phase split relies on
    // this ordering.
    plan.actions.extend(orphans);
    plan
}
