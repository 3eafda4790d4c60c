//! Init command: write the initial configuration

use std::path::Path;

use colored::Colorize;
use dialoguer::Input;

use fontsync_core::SyncConfig;

use crate::error::{CliError, Result};

use super::Paths;

pub fn run_init(
    paths: &Paths,
    source: Option<&Path>,
    install_dir: Option<&Path>,
    force: bool,
) -> Result<()> {
    if paths.config.exists() && !force {
        return Err(CliError::user(format!(
            "Configuration already exists at {} (use --force to overwrite)",
            paths.config.display()
        )));
    }

    let source = match source {
        Some(source) => source.to_path_buf(),
        None => {
            let input: String = Input::new()
                .with_prompt("Source font directory")
                .interact_text()?;
            shellexpand_home(&input)
        }
    };

    if !source.is_dir() {
        return Err(CliError::user(format!(
            "Source directory does not exist: {}",
            source.display()
        )));
    }

    let mut config = SyncConfig::new(source);
    if let Some(install_dir) = install_dir {
        config.install_dir = install_dir.to_path_buf();
    }
    config.save(&paths.config)?;

    println!(
        "{} Configuration written to {}",
        "OK".green().bold(),
        paths.config.display()
    );
    println!("   source:  {}", config.source_dir.display().to_string().cyan());
    println!("   install: {}", config.install_dir.display().to_string().cyan());
    println!();
    println!("Run {} to synchronize.", "font-sync sync".cyan());
    Ok(())
}

/// Expand a leading `~/` to the home directory.
fn shellexpand_home(input: &str) -> std::path::PathBuf {
    if let Some(rest) = input.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    input.into()
}
