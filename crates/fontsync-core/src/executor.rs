//! Action execution
//!
//! Runs a [`SyncPlan`] in two phases — non-destructive copies first,
//! orphan removals second — under a bounded tokio worker pool. Each action
//! runs independently: one failure never aborts the others.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use fontsync_fs::io::{copy_atomic, remove_file};

use crate::action::Action;
use crate::config::DEFAULT_CONCURRENCY;
use crate::report::{Outcome, SyncReport};
use crate::state::StateIndex;

/// Callback invoked after each completed action. Rendering (progress
/// lines, counters) consumes this; core logic never depends on it.
pub trait SyncObserver: Send + Sync {
    fn action_completed(&self, action: &Action, outcome: &Outcome);
}

/// Observer that ignores everything.
#[derive(Debug, Default)]
pub struct NullObserver;

impl SyncObserver for NullObserver {
    fn action_completed(&self, _action: &Action, _outcome: &Outcome) {}
}

/// Options for a [`SyncExecutor`].
#[derive(Clone)]
pub struct ExecutorOptions {
    /// Classify and report without mutating the filesystem or the state
    /// index.
    pub dry_run: bool,
    /// Worker pool size; caps concurrent open file handles.
    pub concurrency: usize,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Executes sync plans against an install directory.
pub struct SyncExecutor {
    options: ExecutorOptions,
    observer: Arc<dyn SyncObserver>,
    abort: Arc<AtomicBool>,
}

impl SyncExecutor {
    pub fn new(options: ExecutorOptions) -> Self {
        Self {
            options,
            observer: Arc::new(NullObserver),
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SyncObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Flag that stops scheduling new actions when set. In-flight copies
    /// finish or fail cleanly; temp-then-rename means no partial file ever
    /// lands at a destination path.
    pub fn abort_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    /// Execute the plan.
    ///
    /// All Install/Update actions complete (successfully or not) before
    /// any Orphan runs. State index mutations happen only after an action
    /// verifiably succeeds and are serialized through a single lock; the
    /// caller persists the index once after the batch.
    pub async fn execute(
        &self,
        plan: crate::action::SyncPlan,
        install_dir: &Path,
        state: &mut StateIndex,
    ) -> SyncReport {
        let mut report = SyncReport {
            dry_run: self.options.dry_run,
            up_to_date: plan.up_to_date,
            untracked: plan.untracked,
            planning_failures: plan.hash_failures,
            ..Default::default()
        };

        if self.options.dry_run {
            for action in plan.actions {
                let outcome = Outcome::Success;
                self.observer.action_completed(&action, &outcome);
                report.push(action, outcome);
            }
            return report;
        }

        let (copies, removals): (Vec<_>, Vec<_>) =
            plan.actions.into_iter().partition(|a| !a.is_destructive());

        let shared = Arc::new(Mutex::new(std::mem::take(state)));

        self.run_phase(copies, install_dir, &shared, &mut report).await;
        self.run_phase(removals, install_dir, &shared, &mut report).await;

        *state = Arc::into_inner(shared)
            .expect("executor tasks joined")
            .into_inner()
            .expect("state lock poisoned");
        report
    }

    async fn run_phase(
        &self,
        actions: Vec<Action>,
        install_dir: &Path,
        state: &Arc<Mutex<StateIndex>>,
        report: &mut SyncReport,
    ) {
        if actions.is_empty() {
            return;
        }

        let semaphore = Arc::new(Semaphore::new(self.options.concurrency.max(1)));
        let mut tasks: JoinSet<(usize, Action, Outcome)> = JoinSet::new();
        let mut results: Vec<Option<(Action, Outcome)>> = Vec::new();

        for (idx, action) in actions.into_iter().enumerate() {
            if self.abort.load(Ordering::SeqCst) {
                warn!(font = action.name(), "aborted before scheduling");
                report.aborted.push(action.name().to_string());
                continue;
            }
            results.push(None);

            let semaphore = Arc::clone(&semaphore);
            let state = Arc::clone(state);
            let observer = Arc::clone(&self.observer);
            let install_dir = install_dir.to_path_buf();

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");

                let blocking_action = action.clone();
                let outcome = tokio::task::spawn_blocking(move || {
                    apply_action(&blocking_action, &install_dir, &state)
                })
                .await
                .unwrap_or_else(|e| Outcome::failed(format!("worker panicked: {e}")));

                observer.action_completed(&action, &outcome);
                (idx, action, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, action, outcome)) => results[idx] = Some((action, outcome)),
                Err(e) => warn!(error = %e, "executor task failed to join"),
            }
        }

        // Completion order is nondeterministic; report in plan order.
        for entry in results.into_iter().flatten() {
            report.push(entry.0, entry.1);
        }
    }
}

/// Apply one action on a blocking thread. The state index is mutated only
/// after the filesystem change verifiably completed.
fn apply_action(action: &Action, install_dir: &Path, state: &Mutex<StateIndex>) -> Outcome {
    match action {
        Action::Install {
            name,
            source_path,
            fingerprint,
            size,
            modified,
        }
        | Action::Update {
            name,
            source_path,
            new_fingerprint: fingerprint,
            size,
            modified,
            ..
        } => {
            let dst = install_dir.join(name);
            match copy_atomic(source_path, &dst, Some(fingerprint)) {
                Ok(written) => {
                    debug!(font = name, fingerprint = written.short(), "copied");
                    state
                        .lock()
                        .expect("state lock poisoned")
                        .record(name, written, *size, *modified);
                    Outcome::Success
                }
                Err(e) => Outcome::failed(e.to_string()),
            }
        }

        Action::Orphan {
            name,
            installed_path,
        } => {
            match remove_file(installed_path) {
                Ok(()) => {}
                // Already gone: the goal state is reached, so the record
                // is still dropped.
                Err(fontsync_fs::Error::NotFound { .. }) => {
                    debug!(font = name, "orphan already absent");
                }
                Err(e) => return Outcome::failed(e.to_string()),
            }
            state.lock().expect("state lock poisoned").forget(name);
            Outcome::Success
        }
    }
}
