//! Config loading, error-message, and root validation integration tests.

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;
use twinsync_core::{ConfigError, MatchMode, RelPath, Root, SyncConfig};

// ---------------------------------------------------------------------------
// 1. Loading
// ---------------------------------------------------------------------------

#[test]
fn missing_home_config_yields_defaults() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let cfg = SyncConfig::load_at(home.path()).expect("load");
    assert_eq!(cfg, SyncConfig::default());
    home.child(".twinsync").assert(predicate::path::missing());
}

#[test]
fn home_config_is_read() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".twinsync/config.yaml")
        .write_str("match_mode: relative_path\nlist_depth: 5\nexclusions:\n  reserved_file: Thumbs.db\n")
        .expect("write");

    let cfg = SyncConfig::load_at(home.path()).expect("load");
    assert_eq!(cfg.match_mode, MatchMode::RelativePath);
    assert_eq!(cfg.list_depth, 5);
    assert_eq!(cfg.exclusions.reserved_file, "Thumbs.db");
    assert_eq!(cfg.exclusions.reserved_folder, "$RECYCLE.BIN");
}

#[test]
fn empty_config_file_is_default() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("twinsync.yaml");
    file.write_str("\n").expect("write");
    assert_eq!(SyncConfig::load_from(file.path()).expect("load"), SyncConfig::default());
}

// ---------------------------------------------------------------------------
// 2. Error messages
// ---------------------------------------------------------------------------

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let err = SyncConfig::load_from(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::ConfigNotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn unknown_key_is_a_parse_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("twinsync.yaml");
    file.write_str("match_mode: basename\nrecycle: yes\n").expect("write");

    let err = SyncConfig::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("twinsync.yaml"));
}

#[test]
fn bad_match_mode_is_a_parse_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("twinsync.yaml");
    file.write_str("match_mode: fuzzy\n").expect("write");
    assert!(matches!(
        SyncConfig::load_from(file.path()),
        Err(ConfigError::Parse { .. })
    ));
}

// ---------------------------------------------------------------------------
// 3. Roots and entries
// ---------------------------------------------------------------------------

#[test]
fn root_errors_name_the_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let err = Root::open(&dir.path().join("gone")).unwrap_err();
    assert!(err.to_string().contains("root does not exist"));
    assert!(err.to_string().contains("gone"));
}

#[rstest]
#[case("report.txt", "report.txt")]
#[case("docs/report.txt", "report.txt")]
#[case(r"docs\2024\Q1 review.xlsx", "Q1 review.xlsx")]
#[case("  \"a/b/c.tar.gz\"  ", "c.tar.gz")]
fn basename_is_the_last_component(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(RelPath::parse(raw).expect("parse").basename(), expected);
}

#[rstest]
#[case("../escape.txt")]
#[case("a/../../escape.txt")]
#[case("")]
fn entries_never_leave_their_root(#[case] raw: &str) {
    assert!(RelPath::parse(raw).is_err());
}
