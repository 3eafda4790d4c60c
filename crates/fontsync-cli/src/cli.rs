//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// font-sync - Keep a shared font folder and your installed fonts in sync
#[derive(Parser, Debug)]
#[command(name = "font-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Initialize configuration
    ///
    /// Records the shared source directory and the install directory.
    ///
    /// Examples:
    ///   font-sync init --source ~/Dropbox/Fonts
    ///   font-sync init                # prompts for the source directory
    Init {
        /// Shared source directory (prompted for when omitted)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Install directory (defaults to the platform font directory)
        #[arg(long)]
        install_dir: Option<PathBuf>,

        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Synchronize fonts from the source directory
    Sync {
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Output the report as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Remove fonts whose source copy was deleted
    ///
    /// Dry-run by default; pass --execute to actually delete.
    Clean {
        /// Actually delete the orphaned fonts
        #[arg(long)]
        execute: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Copy font files into the source directory
    Import {
        /// Font files to import
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List source fonts and their sync status
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show configuration and inventory counts
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sync_flags_parse() {
        let cli = Cli::parse_from(["font-sync", "sync", "--dry-run", "--json"]);
        assert_eq!(
            cli.command,
            Some(Commands::Sync {
                dry_run: true,
                json: true
            })
        );
    }

    #[test]
    fn clean_defaults_to_dry_run() {
        let cli = Cli::parse_from(["font-sync", "clean"]);
        assert_eq!(
            cli.command,
            Some(Commands::Clean {
                execute: false,
                yes: false
            })
        );
    }

    #[test]
    fn import_requires_files() {
        assert!(Cli::try_parse_from(["font-sync", "import"]).is_err());
    }
}
