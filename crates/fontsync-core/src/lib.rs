//! Differential synchronization engine for font-sync
//!
//! This crate coordinates the sync pipeline:
//!
//! ```text
//!   scan(source) + scan(installed) + StateIndex
//!        |
//!    Reconciler  ->  SyncPlan (Install / Update / Orphan)
//!        |
//!   SyncExecutor ->  SyncReport  ->  StateIndex save
//! ```
//!
//! Change detection is content-addressed: a font's identity is its file
//! name, its version is the SHA-256 fingerprint of its bytes. Size and
//! mtime only ever serve as a skip-hashing heuristic.

pub mod action;
pub mod config;
pub mod error;
pub mod executor;
pub mod reconcile;
pub mod report;
pub mod state;

pub use action::{Action, ActionKind, SyncPlan};
pub use config::{DEFAULT_CONCURRENCY, SyncConfig, default_config_path, default_state_path};
pub use error::{Error, Result};
pub use executor::{ExecutorOptions, NullObserver, SyncExecutor, SyncObserver};
pub use reconcile::{DiskHasher, FileHasher, reconcile};
pub use report::{ActionResult, Outcome, SyncReport};
pub use state::{FingerprintRecord, StateIndex};
