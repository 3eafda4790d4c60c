//! List command: per-font sync status

use colored::Colorize;
use serde_json::json;

use fontsync_core::{Action, DiskHasher, reconcile};
use fontsync_fs::scan_directory;

use crate::error::Result;

use super::{Paths, load_config, load_state_lenient, scan_installed};

pub fn run_list(paths: &Paths, json: bool) -> Result<()> {
    let config = load_config(paths)?;

    let source = scan_directory(&config.source_dir)?;
    let installed = scan_installed(&config.install_dir)?;
    let state = load_state_lenient(paths)?;

    let mut hasher = DiskHasher;
    let plan = reconcile(&source, &installed, &state, &mut hasher);

    // name -> status, derived from the same classification sync would use.
    let mut rows: Vec<(String, &'static str)> = Vec::new();
    for action in &plan.actions {
        match action {
            Action::Install { name, .. } => rows.push((name.clone(), "new")),
            Action::Update { name, .. } => rows.push((name.clone(), "changed")),
            Action::Orphan { name, .. } => rows.push((name.clone(), "orphaned")),
        }
    }
    for name in &plan.up_to_date {
        rows.push((name.clone(), "synced"));
    }
    for name in &plan.untracked {
        rows.push((name.clone(), "untracked"));
    }
    for (name, _) in &plan.hash_failures {
        rows.push((name.clone(), "unreadable"));
    }
    rows.sort();

    if json {
        let entries: Vec<_> = rows
            .iter()
            .map(|(name, status)| json!({"name": name, "status": status}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("{} No fonts found.", "OK".green().bold());
        return Ok(());
    }

    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, status) in &rows {
        let status_colored = match *status {
            "new" => status.green(),
            "changed" => status.yellow(),
            "orphaned" | "unreadable" => status.red(),
            "untracked" => status.dimmed(),
            _ => status.normal(),
        };
        println!("   {name:<width$}  {status_colored}");
    }
    println!();
    println!(
        "{} fonts in source, {} installed, {} tracked",
        source.len(),
        installed.len(),
        state.len()
    );
    Ok(())
}
