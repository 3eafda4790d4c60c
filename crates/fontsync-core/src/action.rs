//! Sync action model
//!
//! The reconciler classifies every font into at most one [`Action`] per
//! run; the executor consumes them. Actions carry no mutable state.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use fontsync_fs::Fingerprint;

/// One planned filesystem change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Font present in source only: copy it into the install directory.
    Install {
        name: String,
        source_path: PathBuf,
        fingerprint: Fingerprint,
        /// Source size/mtime at plan time, recorded into the state index
        /// on success as the next run's skip-hashing heuristic.
        size: u64,
        modified: i64,
    },

    /// Font present on both sides with differing content: source wins.
    Update {
        name: String,
        source_path: PathBuf,
        old_fingerprint: Fingerprint,
        new_fingerprint: Fingerprint,
        size: u64,
        modified: i64,
    },

    /// Font previously installed by this tool whose source copy is gone:
    /// candidate for removal.
    Orphan { name: String, installed_path: PathBuf },
}

impl Action {
    pub fn name(&self) -> &str {
        match self {
            Action::Install { name, .. }
            | Action::Update { name, .. }
            | Action::Orphan { name, .. } => name,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Install { .. } => ActionKind::Install,
            Action::Update { .. } => ActionKind::Update,
            Action::Orphan { .. } => ActionKind::Orphan,
        }
    }

    /// Orphans mutate by deletion; everything else by copy.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Action::Orphan { .. })
    }
}

/// Discriminant for grouping and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Install,
    Update,
    Orphan,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Install => "install",
            ActionKind::Update => "update",
            ActionKind::Orphan => "orphan",
        }
    }
}

/// Output of the reconciler: the ordered action list plus the names that
/// needed no action, kept for report transparency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPlan {
    /// Install/Update actions first (name order), then Orphans (name
    /// order). The executor additionally enforces the phase boundary.
    pub actions: Vec<Action>,

    /// Fonts whose source and installed content already match.
    pub up_to_date: Vec<String>,

    /// Installed-only fonts with no state record: locally managed, never
    /// touched by this tool.
    pub untracked: Vec<String>,

    /// Names whose fingerprint could not be computed during planning
    /// (vanished or unreadable mid-hash), with the reason. Localized
    /// failures: the rest of the plan proceeds.
    pub hash_failures: Vec<(String, String)>,
}

impl SyncPlan {
    /// True when the plan contains no actions and no planning failures.
    pub fn is_noop(&self) -> bool {
        self.actions.is_empty() && self.hash_failures.is_empty()
    }

    pub fn count(&self, kind: ActionKind) -> usize {
        self.actions.iter().filter(|a| a.kind() == kind).count()
    }
}
