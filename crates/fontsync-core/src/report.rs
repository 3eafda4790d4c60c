//! Sync report
//!
//! The aggregate result of one executor run: one outcome per attempted
//! action, plus the skipped names for transparency. Build-once; callers
//! (CLI rendering, `--json`) only read it.

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionKind};

/// Result of one attempted action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failed { reason: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Outcome::Failed {
            reason: reason.into(),
        }
    }
}

/// An action paired with how it went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub action: Action,
    pub outcome: Outcome,
}

/// Aggregate result of a sync run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    /// Whether this was a preview run with zero filesystem mutation.
    pub dry_run: bool,

    /// One entry per attempted (or, in dry-run, planned) action.
    pub results: Vec<ActionResult>,

    /// Fonts already in sync; no action was emitted for them.
    pub up_to_date: Vec<String>,

    /// Installed-only fonts outside the tool's ownership.
    pub untracked: Vec<String>,

    /// Names that failed during planning, before any action existed.
    pub planning_failures: Vec<(String, String)>,

    /// Actions that were never scheduled because the run was aborted.
    pub aborted: Vec<String>,
}

impl SyncReport {
    pub fn push(&mut self, action: Action, outcome: Outcome) {
        self.results.push(ActionResult { action, outcome });
    }

    fn count(&self, kind: ActionKind, success: bool) -> usize {
        self.results
            .iter()
            .filter(|r| r.action.kind() == kind && r.outcome.is_success() == success)
            .count()
    }

    /// Successful installs.
    pub fn installed(&self) -> usize {
        self.count(ActionKind::Install, true)
    }

    /// Successful updates.
    pub fn updated(&self) -> usize {
        self.count(ActionKind::Update, true)
    }

    /// Successful orphan removals.
    pub fn removed(&self) -> usize {
        self.count(ActionKind::Orphan, true)
    }

    /// All failures, including planning-time hash failures.
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.outcome.is_success()).count()
            + self.planning_failures.len()
    }

    /// Iterate failed action results with their reasons.
    pub fn failures(&self) -> impl Iterator<Item = (&ActionResult, &str)> {
        self.results.iter().filter_map(|r| match &r.outcome {
            Outcome::Failed { reason } => Some((r, reason.as_str())),
            Outcome::Success => None,
        })
    }

    /// A run with any failure exits non-zero, even if others succeeded.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontsync_fs::fingerprint_bytes;

    fn install(name: &str) -> Action {
        Action::Install {
            name: name.into(),
            source_path: format!("/src/{name}").into(),
            fingerprint: fingerprint_bytes(name.as_bytes()),
            size: 1,
            modified: 1,
        }
    }

    #[test]
    fn counts_by_kind_and_outcome() {
        let mut report = SyncReport::default();
        report.push(install("A.otf"), Outcome::Success);
        report.push(install("B.otf"), Outcome::failed("disk full"));
        report.push(
            Action::Orphan {
                name: "C.otf".into(),
                installed_path: "/fonts/C.otf".into(),
            },
            Outcome::Success,
        );

        assert_eq!(report.installed(), 1);
        assert_eq!(report.updated(), 0);
        assert_eq!(report.removed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
    }

    #[test]
    fn planning_failures_count_as_failed() {
        let mut report = SyncReport::default();
        report
            .planning_failures
            .push(("Gone.otf".into(), "file not found".into()));
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
    }

    #[test]
    fn empty_report_is_success() {
        let report = SyncReport::default();
        assert!(report.is_success());
        assert_eq!(report.failed(), 0);
    }

    #[test]
    fn failures_expose_reasons() {
        let mut report = SyncReport::default();
        report.push(install("A.otf"), Outcome::failed("permission denied"));
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].1, "permission denied");
        assert_eq!(failures[0].0.action.name(), "A.otf");
    }

    #[test]
    fn serializes_to_json() {
        let mut report = SyncReport::default();
        report.push(install("A.otf"), Outcome::Success);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["results"][0]["outcome"]["status"], "success");
        assert_eq!(json["results"][0]["action"]["kind"], "install");
    }
}
