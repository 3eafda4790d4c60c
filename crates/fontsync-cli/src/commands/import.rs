//! Import command: copy external font files into the source directory

use std::path::PathBuf;

use colored::Colorize;

use fontsync_fs::{io::copy_atomic, is_font_file};

use crate::error::{CliError, Result};

use super::{Paths, load_config};

pub fn run_import(paths: &Paths, files: &[PathBuf]) -> Result<()> {
    let config = load_config(paths)?;

    let mut imported = 0usize;
    let mut errors = Vec::new();

    for file in files {
        let Some(name) = file.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            errors.push(format!("{}: not a file path", file.display()));
            continue;
        };
        if !is_font_file(&name) {
            errors.push(format!("{name}: not a .otf/.ttf font file"));
            continue;
        }

        let dst = config.source_dir.join(&name);
        match copy_atomic(file, &dst, None) {
            Ok(fp) => {
                println!(
                    "   {} imported {} {}",
                    "+".green(),
                    name.cyan(),
                    format!("({})", fp.short()).dimmed()
                );
                imported += 1;
            }
            Err(e) => errors.push(format!("{name}: {e}")),
        }
    }

    println!();
    println!(
        "{} {} font(s) imported into {}",
        "OK".green().bold(),
        imported,
        config.source_dir.display().to_string().cyan()
    );
    if imported > 0 {
        println!("Run {} to install them.", "font-sync sync".cyan());
    }

    if !errors.is_empty() {
        for error in &errors {
            eprintln!("   {} {}", "!".red(), error);
        }
        return Err(CliError::user(format!(
            "{} file(s) could not be imported",
            errors.len()
        )));
    }
    Ok(())
}
