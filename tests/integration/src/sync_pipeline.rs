//! End-to-end pipeline tests: scan -> reconcile -> execute -> state save,
//! driven over real temp directories.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use fontsync_core::{
    DiskHasher, ExecutorOptions, StateIndex, SyncExecutor, SyncReport, reconcile,
};
use fontsync_fs::{Inventory, fingerprint_bytes, fingerprint_file, scan_directory};

struct World {
    _dir: TempDir,
    source: PathBuf,
    install: PathBuf,
    state_path: PathBuf,
}

impl World {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source");
        let install = dir.path().join("fonts");
        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(&install).unwrap();
        Self {
            state_path: dir.path().join("state.json"),
            _dir: dir,
            source,
            install,
        }
    }

    fn add_source(&self, name: &str, content: &[u8]) {
        fs::write(self.source.join(name), content).unwrap();
    }

    fn add_installed(&self, name: &str, content: &[u8]) {
        fs::write(self.install.join(name), content).unwrap();
    }

    fn installed_names(&self) -> Vec<String> {
        scan_directory(&self.install)
            .unwrap()
            .keys()
            .cloned()
            .collect()
    }

    /// One full sync run, the way the CLI drives it.
    fn sync(&self, dry_run: bool) -> SyncReport {
        let source = scan_directory(&self.source).unwrap();
        let installed = if self.install.exists() {
            scan_directory(&self.install).unwrap()
        } else {
            Inventory::new()
        };
        let mut state = StateIndex::load(&self.state_path).unwrap_or_default();

        let mut hasher = DiskHasher;
        let plan = reconcile(&source, &installed, &state, &mut hasher);

        let executor = SyncExecutor::new(ExecutorOptions {
            dry_run,
            concurrency: 2,
        });
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        let report = runtime.block_on(executor.execute(plan, &self.install, &mut state));

        if !dry_run {
            state.save(&self.state_path).unwrap();
        }
        report
    }

    fn state(&self) -> StateIndex {
        StateIndex::load(&self.state_path).unwrap()
    }
}

#[test]
fn install_round_trip_preserves_fingerprint() {
    let world = World::new();
    world.add_source("Mono.ttf", b"monospaced glyphs");

    let report = world.sync(false);
    assert!(report.is_success());
    assert_eq!(report.installed(), 1);

    let installed_fp = fingerprint_file(&world.install.join("Mono.ttf")).unwrap();
    let source_fp = fingerprint_file(&world.source.join("Mono.ttf")).unwrap();
    assert_eq!(installed_fp, source_fp);
    assert_eq!(world.state().get("Mono.ttf").unwrap().fingerprint, source_fp);
}

#[test]
fn second_sync_with_no_changes_plans_nothing() {
    let world = World::new();
    world.add_source("A.otf", b"aaa");
    world.add_source("B.ttf", b"bbb");

    let first = world.sync(false);
    assert_eq!(first.installed(), 2);

    let second = world.sync(false);
    assert!(second.results.is_empty(), "second run must be a no-op");
    assert_eq!(second.up_to_date.len(), 2);
}

#[test]
fn source_change_propagates_as_update() {
    let world = World::new();
    world.add_source("A.otf", b"version one");
    world.sync(false);

    world.add_source("A.otf", b"version two, longer");
    let report = world.sync(false);

    assert_eq!(report.updated(), 1);
    assert_eq!(
        fs::read(world.install.join("A.otf")).unwrap(),
        b"version two, longer"
    );
    assert_eq!(
        world.state().get("A.otf").unwrap().fingerprint,
        fingerprint_bytes(b"version two, longer")
    );
}

/// Source has A (new), installed has B (tracked) and C (untracked).
/// After an executed sync, installed = {A, C}.
#[test]
fn orphan_removal_spares_untracked_fonts() {
    let world = World::new();
    world.add_source("A.otf", b"the new font");
    world.add_installed("B.otf", b"previously synced");
    world.add_installed("C.otf", b"manually installed");

    // B was installed by an earlier sync; C never was.
    let mut state = StateIndex::new();
    state.record("B.otf", fingerprint_bytes(b"previously synced"), 17, 1);
    state.save(&world.state_path).unwrap();

    let report = world.sync(false);
    assert!(report.is_success());
    assert_eq!(report.installed(), 1);
    assert_eq!(report.removed(), 1);
    assert_eq!(report.untracked, vec!["C.otf"]);

    assert_eq!(world.installed_names(), vec!["A.otf", "C.otf"]);
    let state = world.state();
    assert!(state.contains("A.otf"));
    assert!(!state.contains("B.otf"));
    assert!(!state.contains("C.otf"));
}

#[test]
fn dry_run_leaves_filesystem_and_state_untouched() {
    let world = World::new();
    world.add_source("A.otf", b"aaa");
    world.add_installed("B.otf", b"bbb");
    let mut state = StateIndex::new();
    state.record("B.otf", fingerprint_bytes(b"bbb"), 3, 1);
    state.save(&world.state_path).unwrap();
    let state_bytes = fs::read(&world.state_path).unwrap();

    let report = world.sync(true);
    assert!(report.dry_run);
    assert_eq!(report.results.len(), 2, "install A + orphan B planned");

    assert!(!world.install.join("A.otf").exists());
    assert!(world.install.join("B.otf").exists());
    assert_eq!(fs::read(&world.state_path).unwrap(), state_bytes);
}

/// One of three installs fails; the other two succeed and only they
/// are recorded.
#[test]
fn partial_failure_records_only_successes() {
    let world = World::new();
    world.add_source("A.otf", b"aaa");
    world.add_source("B.otf", b"bbb");
    world.add_source("C.otf", b"ccc");

    // Occupy B's destination with a directory so the final rename fails.
    fs::create_dir_all(world.install.join("B.otf")).unwrap();

    let report = world.sync(false);
    assert_eq!(report.installed(), 2);
    assert_eq!(report.failed(), 1);
    assert!(!report.is_success());

    let state = world.state();
    assert!(state.contains("A.otf"));
    assert!(state.contains("C.otf"));
    assert!(!state.contains("B.otf"));
}

#[test]
fn corrupt_state_index_recovers_by_rehashing() {
    let world = World::new();
    world.add_source("A.otf", b"aaa");
    world.add_installed("A.otf", b"aaa");
    fs::write(&world.state_path, "{{{ not json").unwrap();

    // CLI policy: corrupt state -> empty state. The reconciler then
    // hashes both sides and finds them equal.
    assert!(StateIndex::load(&world.state_path).is_err());
    fs::remove_file(&world.state_path).unwrap();

    let report = world.sync(false);
    assert!(report.results.is_empty());
    assert_eq!(report.up_to_date, vec!["A.otf"]);
}

#[test]
fn report_serializes_for_scripting() {
    let world = World::new();
    world.add_source("A.otf", b"aaa");

    let report = world.sync(false);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["results"][0]["action"]["name"], "A.otf");
    assert_eq!(json["results"][0]["outcome"]["status"], "success");
}
