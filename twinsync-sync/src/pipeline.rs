//! Shared session entrypoint used by the CLI: scan (or load) both lists, then
//! reconcile.

use std::path::Path;

use twinsync_core::{RelPath, Root, SyncConfig};
use twinsync_scan::{list_file, scan};

use crate::{reconcile, ReconcileOptions, ReconcileReport, SyncError};

/// Everything a session produced: the lists it worked from and the outcome.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub list_a: Vec<RelPath>,
    pub list_b: Vec<RelPath>,
    pub report: ReconcileReport,
}

/// Scan both roots and reconcile them.
///
/// The two scans are read-only and independent, so they run in parallel; the
/// copy phase that follows is serial.
pub fn run(
    root_a: &Root,
    root_b: &Root,
    config: &SyncConfig,
    dry_run: bool,
) -> Result<SessionReport, SyncError> {
    root_a.ensure_disjoint(root_b)?;

    let rules = &config.exclusions;
    let (list_a, list_b) = rayon::join(|| scan(root_a, rules), || scan(root_b, rules));
    let (list_a, list_b) = (list_a?, list_b?);

    finish(root_a, root_b, list_a, list_b, config, dry_run)
}

/// Reconcile from list files written by an earlier scan.
///
/// Entries the current exclusion rules would have skipped are dropped, so a
/// hand-edited list cannot smuggle `desktop.ini` across.
pub fn run_from_lists(
    root_a: &Root,
    root_b: &Root,
    list_a_file: &Path,
    list_b_file: &Path,
    config: &SyncConfig,
    dry_run: bool,
) -> Result<SessionReport, SyncError> {
    root_a.ensure_disjoint(root_b)?;

    let rules = &config.exclusions;
    let mut list_a = list_file::read_at(list_a_file)?;
    let mut list_b = list_file::read_at(list_b_file)?;
    list_a.retain(|e| !rules.excludes_file(e));
    list_b.retain(|e| !rules.excludes_file(e));

    finish(root_a, root_b, list_a, list_b, config, dry_run)
}

fn finish(
    root_a: &Root,
    root_b: &Root,
    list_a: Vec<RelPath>,
    list_b: Vec<RelPath>,
    config: &SyncConfig,
    dry_run: bool,
) -> Result<SessionReport, SyncError> {
    let options = ReconcileOptions {
        match_mode: config.match_mode,
        dry_run,
    };
    let report = reconcile(root_a, root_b, &list_a, &list_b, &options)?;
    Ok(SessionReport {
        list_a,
        list_b,
        report,
    })
}
