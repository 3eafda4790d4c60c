//! Clean command: orphan detection and removal
//!
//! Restricted to the destructive side of the pipeline. Dry-run by
//! default; deletion requires --execute plus confirmation.

use colored::Colorize;
use dialoguer::Confirm;

use fontsync_core::{
    DiskHasher, ExecutorOptions, SyncExecutor, SyncPlan, reconcile,
};
use fontsync_fs::scan_directory;

use crate::error::{CliError, Result};

use super::{Paths, build_runtime, load_config, load_state_lenient, scan_installed};

pub fn run_clean(paths: &Paths, execute: bool, yes: bool) -> Result<()> {
    let config = load_config(paths)?;

    let source = scan_directory(&config.source_dir)?;
    let installed = scan_installed(&config.install_dir)?;
    let mut state = load_state_lenient(paths)?;

    let mut hasher = DiskHasher;
    let full_plan = reconcile(&source, &installed, &state, &mut hasher);

    // Only the orphans; installs and updates belong to `sync`.
    let plan = SyncPlan {
        actions: full_plan
            .actions
            .into_iter()
            .filter(|a| a.is_destructive())
            .collect(),
        ..Default::default()
    };

    if plan.actions.is_empty() {
        println!("{} No orphaned fonts to clean up.", "OK".green().bold());
        return Ok(());
    }

    println!(
        "{} {} font(s) no longer present in the source:",
        "=>".blue().bold(),
        plan.actions.len()
    );
    for action in &plan.actions {
        let synced = state
            .get(action.name())
            .map(|r| r.last_synced_at.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!(
            "   {} {} {}",
            "-".yellow(),
            action.name().cyan(),
            format!("(synced {synced})").dimmed()
        );
    }

    if !execute {
        println!();
        println!(
            "{} Dry run: nothing was deleted. Pass {} to remove.",
            "OK".yellow().bold(),
            "--execute".cyan()
        );
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} font(s)?", plan.actions.len()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Cancelled.".yellow());
            return Ok(());
        }
    }

    let executor = SyncExecutor::new(ExecutorOptions {
        dry_run: false,
        concurrency: config.concurrency,
    });
    let runtime = build_runtime()?;
    let report = runtime.block_on(executor.execute(plan, &config.install_dir, &mut state));

    state.save(&paths.state)?;

    println!();
    println!("{} {} font(s) removed.", "OK".green().bold(), report.removed());
    if !report.is_success() {
        for (result, reason) in report.failures() {
            println!("   {} {}: {}", "!".red(), result.action.name().cyan(), reason);
        }
        return Err(CliError::user(format!(
            "{} font(s) could not be removed",
            report.failed()
        )));
    }
    Ok(())
}
