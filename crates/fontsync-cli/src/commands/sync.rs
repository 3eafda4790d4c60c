//! Sync command: the full scan -> reconcile -> execute pipeline

use std::sync::Arc;

use colored::Colorize;

use fontsync_core::{
    Action, DiskHasher, ExecutorOptions, Outcome, SyncExecutor, SyncObserver, SyncReport,
    reconcile,
};
use fontsync_fs::scan_directory;

use crate::error::{CliError, Result};

use super::{Paths, build_runtime, load_config, load_state_lenient, scan_installed};

/// Observer that prints one line per completed action.
struct ConsoleObserver {
    dry_run: bool,
}

impl SyncObserver for ConsoleObserver {
    fn action_completed(&self, action: &Action, outcome: &Outcome) {
        let verb = match action {
            Action::Install { .. } => "install",
            Action::Update { .. } => "update",
            Action::Orphan { .. } => "remove",
        };
        match outcome {
            Outcome::Success if self.dry_run => {
                println!("   {} would {} {}", "~".yellow(), verb, action.name().cyan());
            }
            Outcome::Success => {
                println!("   {} {} {}", "+".green(), verb, action.name().cyan());
            }
            Outcome::Failed { reason } => {
                println!(
                    "   {} {} {}: {}",
                    "!".red(),
                    verb,
                    action.name().cyan(),
                    reason
                );
            }
        }
    }
}

pub fn run_sync(paths: &Paths, dry_run: bool, json: bool) -> Result<()> {
    let config = load_config(paths)?;

    if !json {
        println!(
            "{} Syncing fonts from {}",
            "=>".blue().bold(),
            config.source_dir.display().to_string().cyan()
        );
    }

    let source = scan_directory(&config.source_dir)?;
    let installed = scan_installed(&config.install_dir)?;
    let mut state = load_state_lenient(paths)?;

    let mut hasher = DiskHasher;
    let plan = reconcile(&source, &installed, &state, &mut hasher);

    if plan.is_noop() {
        if json {
            let report = SyncReport {
                dry_run,
                up_to_date: plan.up_to_date,
                untracked: plan.untracked,
                ..Default::default()
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!(
                "{} All fonts are up to date ({} installed).",
                "OK".green().bold(),
                plan.up_to_date.len()
            );
        }
        return Ok(());
    }

    let mut executor = SyncExecutor::new(ExecutorOptions {
        dry_run,
        concurrency: config.concurrency,
    });
    if !json {
        executor = executor.with_observer(Arc::new(ConsoleObserver { dry_run }));
    }

    let runtime = build_runtime()?;
    let report = runtime.block_on(executor.execute(plan, &config.install_dir, &mut state));

    if !dry_run {
        state.save(&paths.state)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_summary(&report);
    }

    if !report.is_success() {
        return Err(CliError::user(format!(
            "{} font(s) failed to sync",
            report.failed()
        )));
    }
    Ok(())
}

fn render_summary(report: &SyncReport) {
    println!();
    if report.dry_run {
        println!(
            "{} Dry run: {} action(s) planned, nothing was changed.",
            "OK".yellow().bold(),
            report.results.len()
        );
        return;
    }

    println!(
        "{} {} installed, {} updated, {} removed, {} up to date.",
        "OK".green().bold(),
        report.installed(),
        report.updated(),
        report.removed(),
        report.up_to_date.len()
    );
    if !report.untracked.is_empty() {
        println!(
            "   {} untracked font(s) left alone: {}",
            report.untracked.len(),
            report.untracked.join(", ").dimmed()
        );
    }
    for (name, reason) in &report.planning_failures {
        println!("   {} {}: {}", "!".red(), name.cyan(), reason);
    }
    if report.failed() > 0 {
        println!(
            "{} {} font(s) failed; successful ones were kept.",
            "ERROR".red().bold(),
            report.failed()
        );
    }
}
