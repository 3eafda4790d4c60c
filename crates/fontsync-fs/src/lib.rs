//! Filesystem layer for font-sync
//!
//! Provides content fingerprinting, font directory scanning, and safe
//! (atomic) write/copy/delete primitives.

pub mod error;
pub mod fingerprint;
pub mod io;
pub mod scan;

pub use error::{Error, Result};
pub use fingerprint::{Fingerprint, fingerprint_bytes, fingerprint_file};
pub use scan::{FontFile, Inventory, is_font_file, scan_directory};
