//! font-sync CLI
//!
//! Thin wiring around the fontsync-core pipeline: each command loads
//! configuration and state, drives the engine, and renders the result.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::Paths;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let paths = Paths::default_locations();

    match cli.command {
        Some(cmd) => execute_command(cmd, &paths),
        None => {
            println!("{} font synchronization", "font-sync".green().bold());
            println!();
            println!("Run {} for available commands.", "font-sync --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, paths: &Paths) -> Result<()> {
    match cmd {
        Commands::Init {
            source,
            install_dir,
            force,
        } => commands::run_init(paths, source.as_deref(), install_dir.as_deref(), force),
        Commands::Sync { dry_run, json } => commands::run_sync(paths, dry_run, json),
        Commands::Clean { execute, yes } => commands::run_clean(paths, execute, yes),
        Commands::Import { files } => commands::run_import(paths, &files),
        Commands::List { json } => commands::run_list(paths, json),
        Commands::Status => commands::run_status(paths),
    }
}
