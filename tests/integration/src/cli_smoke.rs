//! Smoke tests for the `font-sync` binary.
//!
//! Config and state are redirected into a temp directory through
//! `XDG_CONFIG_HOME`, so these tests never touch the real user profile.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn font_sync(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("font-sync").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("font-sync")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn no_command_prints_hint() {
    let dir = TempDir::new().unwrap();
    font_sync(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("font-sync --help"));
}

#[test]
fn sync_without_config_suggests_init() {
    let dir = TempDir::new().unwrap();
    font_sync(dir.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("font-sync init"));
}

#[test]
fn init_then_sync_installs_fonts() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("shared-fonts");
    let install = dir.path().join("installed-fonts");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("Inter.otf"), b"inter glyph data").unwrap();

    font_sync(dir.path())
        .args(["init", "--source"])
        .arg(&source)
        .arg("--install-dir")
        .arg(&install)
        .assert()
        .success();

    font_sync(dir.path())
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inter.otf"));
    assert!(!install.join("Inter.otf").exists());

    font_sync(dir.path()).arg("sync").assert().success();
    assert_eq!(
        fs::read(install.join("Inter.otf")).unwrap(),
        b"inter glyph data"
    );

    // Second run is a no-op.
    font_sync(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

#[test]
fn sync_json_emits_report() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("shared-fonts");
    let install = dir.path().join("installed-fonts");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("Mono.ttf"), b"mono").unwrap();

    font_sync(dir.path())
        .args(["init", "--source"])
        .arg(&source)
        .arg("--install-dir")
        .arg(&install)
        .assert()
        .success();

    let output = font_sync(dir.path())
        .args(["sync", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["results"][0]["action"]["name"], "Mono.ttf");
    assert_eq!(report["results"][0]["outcome"]["status"], "success");
}

#[test]
fn list_reports_untracked_fonts() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("shared-fonts");
    let install = dir.path().join("installed-fonts");
    fs::create_dir_all(&source).unwrap();
    fs::create_dir_all(&install).unwrap();
    fs::write(install.join("Manual.otf"), b"hand installed").unwrap();

    font_sync(dir.path())
        .args(["init", "--source"])
        .arg(&source)
        .arg("--install-dir")
        .arg(&install)
        .assert()
        .success();

    font_sync(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manual.otf"))
        .stdout(predicate::str::contains("untracked"));
}

#[test]
fn clean_removes_orphans_only_with_execute() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("shared-fonts");
    let install = dir.path().join("installed-fonts");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("Gone.otf"), b"soon to vanish").unwrap();

    font_sync(dir.path())
        .args(["init", "--source"])
        .arg(&source)
        .arg("--install-dir")
        .arg(&install)
        .assert()
        .success();
    font_sync(dir.path()).arg("sync").assert().success();
    assert!(install.join("Gone.otf").exists());

    fs::remove_file(source.join("Gone.otf")).unwrap();

    // Default is a preview.
    font_sync(dir.path())
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gone.otf"));
    assert!(install.join("Gone.otf").exists());

    font_sync(dir.path())
        .args(["clean", "--execute", "--yes"])
        .assert()
        .success();
    assert!(!install.join("Gone.otf").exists());
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("font-sync")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
