//! End-to-end reconciliation properties: idempotence, union completeness,
//! newest-wins, equal-timestamp no-op, and exclusions.

use std::fs;
use std::path::Path;

use filetime::{set_file_mtime, FileTime};
use tempfile::TempDir;

use twinsync_core::{Root, SyncConfig};
use twinsync_sync::{pipeline, CopyReason, Outcome};

struct Trees {
    _tmp: TempDir,
    a: Root,
    b: Root,
}

fn trees() -> Trees {
    let tmp = TempDir::new().expect("tmp");
    let a = tmp.path().join("A");
    let b = tmp.path().join("B");
    fs::create_dir_all(&a).expect("mkdir A");
    fs::create_dir_all(&b).expect("mkdir B");
    Trees {
        a: Root::open(&a).expect("root A"),
        b: Root::open(&b).expect("root B"),
        _tmp: tmp,
    }
}

fn put(root: &Root, rel: &str, content: &str, secs: i64) {
    let path = root.path().join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(&path, content).expect("write");
    set_file_mtime(&path, FileTime::from_unix_time(secs, 0)).expect("set mtime");
}

fn mtime(path: &Path) -> FileTime {
    FileTime::from_last_modification_time(&fs::metadata(path).expect("metadata"))
}

fn sync(t: &Trees) -> twinsync_sync::ReconcileReport {
    pipeline::run(&t.a, &t.b, &SyncConfig::default(), false)
        .expect("session")
        .report
}

#[test]
fn scenario_newer_b_wins_and_extra_propagates() {
    let t = trees();
    put(&t.a, "report.txt", "A version", 1_000);
    put(&t.a, "extra.txt", "extra", 1_500);
    put(&t.b, "report.txt", "B version, longer", 2_000);

    let report = sync(&t);

    assert_eq!(report.copied(), 2);
    assert_eq!(
        fs::read_to_string(t.a.path().join("report.txt")).expect("read"),
        "B version, longer"
    );
    assert_eq!(
        mtime(&t.a.path().join("report.txt")),
        FileTime::from_unix_time(2_000, 0)
    );
    assert_eq!(fs::read_to_string(t.b.path().join("extra.txt")).expect("read"), "extra");
    assert_eq!(
        mtime(&t.b.path().join("extra.txt")),
        FileTime::from_unix_time(1_500, 0)
    );
    // B's report.txt is untouched.
    assert_eq!(
        mtime(&t.b.path().join("report.txt")),
        FileTime::from_unix_time(2_000, 0)
    );
}

#[test]
fn scenario_recycle_bin_ghost_is_never_copied() {
    let t = trees();
    put(&t.a, "$RECYCLE.BIN/ghost.txt", "boo", 1_000);

    let report = sync(&t);

    assert!(report.outcomes.is_empty(), "got: {:?}", report.outcomes);
    assert!(!t.b.path().join("$RECYCLE.BIN").exists());
    assert!(report.copies().all(|(from, _)| !from.ends_with("ghost.txt")));
}

#[test]
fn second_run_is_a_no_op() {
    let t = trees();
    put(&t.a, "docs/a.txt", "a", 1_000);
    put(&t.a, "shared.txt", "old", 1_000);
    put(&t.b, "shared.txt", "new", 3_000);
    put(&t.b, "pics/b.jpg", "b", 2_000);

    let first = sync(&t);
    assert_eq!(first.copied(), 3);

    let second = sync(&t);
    assert_eq!(second.copied(), 0, "second run copied: {:?}", second.outcomes);
    assert_eq!(second.failed(), 0);
    assert_eq!(second.settled(), 3);
}

#[test]
fn union_is_complete_with_matching_size_and_mtime() {
    let t = trees();
    put(&t.a, "only_a/one.txt", "1", 1_111);
    put(&t.a, "two.txt", "22", 2_222);
    put(&t.b, "deep/er/three.txt", "333", 3_333);

    sync(&t);

    for rel in ["only_a/one.txt", "two.txt", "deep/er/three.txt"] {
        let a = t.a.path().join(rel);
        let b = t.b.path().join(rel);
        let (ma, mb) = (fs::metadata(&a).expect("a"), fs::metadata(&b).expect("b"));
        assert_eq!(ma.len(), mb.len(), "size differs for {rel}");
        assert_eq!(mtime(&a), mtime(&b), "mtime differs for {rel}");
    }
}

#[test]
fn newer_a_overwrites_b_and_leaves_a_untouched() {
    let t = trees();
    put(&t.a, "x.txt", "fresh content", 9_000);
    put(&t.b, "x.txt", "stale", 1_000);

    let report = sync(&t);

    assert!(matches!(
        report.outcomes.as_slice(),
        [Outcome::Copied { reason: CopyReason::NewerOnA, .. }]
    ));
    assert_eq!(fs::read_to_string(t.b.path().join("x.txt")).expect("read"), "fresh content");
    assert_eq!(mtime(&t.b.path().join("x.txt")), FileTime::from_unix_time(9_000, 0));
    assert_eq!(fs::read_to_string(t.a.path().join("x.txt")).expect("read"), "fresh content");
}

#[test]
fn equal_mtime_with_different_content_is_left_alone() {
    let t = trees();
    put(&t.a, "same.txt", "left", 5_000);
    put(&t.b, "same.txt", "right side", 5_000);

    let report = sync(&t);

    assert_eq!(report.copied(), 0);
    assert_eq!(report.settled(), 1);
    assert_eq!(fs::read_to_string(t.a.path().join("same.txt")).expect("read"), "left");
    assert_eq!(fs::read_to_string(t.b.path().join("same.txt")).expect("read"), "right side");
}

#[test]
fn desktop_ini_is_never_copied() {
    let t = trees();
    put(&t.a, "desktop.ini", "[.ShellClassInfo]", 1_000);
    put(&t.b, "music/Desktop.ini", "[.ShellClassInfo]", 1_000);

    let report = sync(&t);

    assert_eq!(report.copied(), 0);
    assert!(!t.b.path().join("desktop.ini").exists());
    assert!(!t.a.path().join("music").exists());
}

#[test]
fn missing_root_is_a_config_error_and_nothing_is_touched() {
    let t = trees();
    put(&t.a, "x.txt", "x", 1_000);
    let b_path = t.b.path().to_path_buf();
    fs::remove_dir(&b_path).expect("remove B");

    let err = pipeline::run(&t.a, &t.b, &SyncConfig::default(), false)
        .expect_err("missing root");
    assert!(err.is_config(), "got: {err}");
    assert!(!b_path.exists());
}

#[test]
fn user_file_named_like_a_staging_file_survives_on_both_roots() {
    let t = trees();
    put(&t.a, "r.txt", "report", 1_000);
    put(&t.b, "r.txt.twinsync.tmp", "precious user data", 2_000);

    let report = sync(&t);

    assert_eq!(report.copied(), 2, "got: {:?}", report.outcomes);
    assert_eq!(report.skipped(), 0);
    for root in [&t.a, &t.b] {
        assert_eq!(
            fs::read_to_string(root.path().join("r.txt")).expect("read"),
            "report"
        );
        assert_eq!(
            fs::read_to_string(root.path().join("r.txt.twinsync.tmp")).expect("read"),
            "precious user data"
        );
    }
}
