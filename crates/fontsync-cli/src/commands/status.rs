//! Status command: configuration summary and inventory counts

use colored::Colorize;

use fontsync_fs::scan_directory;

use crate::error::Result;

use super::{Paths, load_config, load_state_lenient, scan_installed};

pub fn run_status(paths: &Paths) -> Result<()> {
    let config = load_config(paths)?;
    let state = load_state_lenient(paths)?;

    println!("{} font-sync status", "=>".blue().bold());
    println!("   config:  {}", paths.config.display());
    println!("   source:  {}", config.source_dir.display().to_string().cyan());
    println!("   install: {}", config.install_dir.display().to_string().cyan());
    println!("   workers: {}", config.concurrency);
    println!();

    let source_count = scan_directory(&config.source_dir)?.len();
    let installed_count = scan_installed(&config.install_dir)?.len();

    println!("   {} font(s) in source", source_count);
    println!("   {} font(s) installed", installed_count);
    println!("   {} font(s) tracked in the state index", state.len());
    Ok(())
}
