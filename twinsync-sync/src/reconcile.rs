//! Two-pass reconciliation of a pair of roots.
//!
//! ## Pass 1 — drive from A
//!
//! For every entry of list A still on disk, find the first entry of list B
//! with the same match key that is still on disk.
//! - match found: the strictly newer modification time wins and is copied
//!   over the older file; equal times are settled and left alone
//! - no match: A's file is copied to B under the same relative path
//!
//! ## Pass 2 — drive from B, fill gaps only
//!
//! Every entry of list B still on disk whose key never appears in list A
//! (on disk or not) is copied to A under the same relative path. Times are
//! not compared again; pass 1 already handled every pair.
//!
//! Per-file failures are logged and recorded in the [`ReconcileReport`];
//! only a bad root aborts the run, and it does so before anything is touched.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

use twinsync_core::{FileMetadata, MatchMode, RelPath, Root, Side};

use crate::copy::copy_file;
use crate::error::{CopyError, SyncError};
use crate::stat::{stat, Lookup};

// ---------------------------------------------------------------------------
// Options and outcomes
// ---------------------------------------------------------------------------

/// Knobs for a single reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    pub match_mode: MatchMode,
    /// Decide everything, copy nothing.
    pub dry_run: bool,
}

/// Why a file was (or would be) copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyReason {
    /// Matched pair, A's copy is newer.
    NewerOnA,
    /// Matched pair, B's copy is newer.
    NewerOnB,
    /// A has it, B does not.
    MissingOnB,
    /// B has it, A does not.
    MissingOnA,
}

impl CopyReason {
    /// The side the content is copied from.
    pub fn source(self) -> Side {
        match self {
            CopyReason::NewerOnA | CopyReason::MissingOnB => Side::A,
            CopyReason::NewerOnB | CopyReason::MissingOnA => Side::B,
        }
    }
}

impl fmt::Display for CopyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyReason::NewerOnA => write!(f, "newer on A"),
            CopyReason::NewerOnB => write!(f, "newer on B"),
            CopyReason::MissingOnB => write!(f, "missing on B"),
            CopyReason::MissingOnA => write!(f, "missing on A"),
        }
    }
}

/// What happened to one entry, in processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Copied {
        from: PathBuf,
        to: PathBuf,
        reason: CopyReason,
    },
    /// `--dry-run`: the copy *would* have happened.
    WouldCopy {
        from: PathBuf,
        to: PathBuf,
        reason: CopyReason,
    },
    /// Matched pair with equal modification times.
    Settled { a: PathBuf, b: PathBuf },
    /// Entry vanished or became unreadable since the scan.
    Skipped {
        side: Side,
        path: PathBuf,
        reason: String,
    },
    /// The copy was attempted and failed.
    Failed {
        from: PathBuf,
        to: PathBuf,
        reason: CopyReason,
        error: String,
    },
}

/// Ordered record of a reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub outcomes: Vec<Outcome>,
}

impl ReconcileReport {
    pub fn copied(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Copied { .. }))
    }

    pub fn would_copy(&self) -> usize {
        self.count(|o| matches!(o, Outcome::WouldCopy { .. }))
    }

    pub fn settled(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Settled { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    /// Source and destination of every performed copy.
    pub fn copies(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.outcomes.iter().filter_map(|o| match o {
            Outcome::Copied { from, to, .. } => Some((from.as_path(), to.as_path())),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

// ---------------------------------------------------------------------------
// reconcile
// ---------------------------------------------------------------------------

/// Converge `root_a` and `root_b` using their (possibly stale) scan lists.
///
/// With [`MatchMode::Basename`], duplicate names on one side are resolved by
/// list order: the first candidate still on disk is the match.
pub fn reconcile(
    root_a: &Root,
    root_b: &Root,
    list_a: &[RelPath],
    list_b: &[RelPath],
    options: &ReconcileOptions,
) -> Result<ReconcileReport, SyncError> {
    Root::open(root_a.path())?;
    Root::open(root_b.path())?;
    root_a.ensure_disjoint(root_b)?;

    tracing::info!(
        "reconciling {} ({} entries) <-> {} ({} entries), match by {}",
        root_a,
        list_a.len(),
        root_b,
        list_b.len(),
        options.match_mode
    );

    let mut run = Reconciler {
        root_a: root_a.path(),
        root_b: root_b.path(),
        options,
        report: ReconcileReport::default(),
    };
    run.pass_from_a(list_a, list_b);
    run.pass_from_b(list_a, list_b);

    let report = run.report;
    tracing::info!(
        "done: {} copied, {} would copy, {} settled, {} skipped, {} failed",
        report.copied(),
        report.would_copy(),
        report.settled(),
        report.skipped(),
        report.failed()
    );
    Ok(report)
}

struct Reconciler<'a> {
    root_a: &'a Path,
    root_b: &'a Path,
    options: &'a ReconcileOptions,
    report: ReconcileReport,
}

impl Reconciler<'_> {
    fn pass_from_a(&mut self, list_a: &[RelPath], list_b: &[RelPath]) {
        let mode = self.options.match_mode;
        let index_b = index_by_key(list_b, mode);

        for a in list_a {
            let a_path = a.resolve(self.root_a);
            let Some(meta_a) = self.lookup(Side::A, &a_path) else {
                continue;
            };

            let matched = index_b
                .get(a.match_key(mode))
                .into_iter()
                .flatten()
                .map(|b| b.resolve(self.root_b))
                .find(|b_path| b_path.is_file());

            let Some(b_path) = matched else {
                let target = a.resolve(self.root_b);
                self.copy(&a_path, &target, CopyReason::MissingOnB);
                continue;
            };

            let Some(meta_b) = self.lookup(Side::B, &b_path) else {
                continue;
            };
            match meta_a.modified_at.cmp(&meta_b.modified_at) {
                Ordering::Greater => {
                    log_comparison(&meta_a, &meta_b);
                    self.copy(&a_path, &b_path, CopyReason::NewerOnA);
                }
                Ordering::Less => {
                    log_comparison(&meta_a, &meta_b);
                    self.copy(&b_path, &a_path, CopyReason::NewerOnB);
                }
                Ordering::Equal => {
                    tracing::debug!("settled: {} = {}", a_path.display(), b_path.display());
                    self.report.outcomes.push(Outcome::Settled {
                        a: a_path,
                        b: b_path,
                    });
                }
            }
        }
    }

    fn pass_from_b(&mut self, list_a: &[RelPath], list_b: &[RelPath]) {
        let mode = self.options.match_mode;
        let keys_a: HashSet<&str> = list_a.iter().map(|a| a.match_key(mode)).collect();

        for b in list_b {
            let b_path = b.resolve(self.root_b);
            if !b_path.is_file() {
                self.skip(Side::B, b_path, "no longer exists");
                continue;
            }
            if keys_a.contains(b.match_key(mode)) {
                continue;
            }
            let target = b.resolve(self.root_a);
            self.copy(&b_path, &target, CopyReason::MissingOnA);
        }
    }

    /// Fresh metadata for `path`, or `None` after recording why it is unusable.
    fn lookup(&mut self, side: Side, path: &Path) -> Option<FileMetadata> {
        match stat(path) {
            Ok(Lookup::Found(meta)) => Some(meta),
            Ok(Lookup::Absent(why)) => {
                self.skip(side, path.to_path_buf(), why.to_string());
                None
            }
            Err(err) => {
                self.skip(side, path.to_path_buf(), err.to_string());
                None
            }
        }
    }

    fn copy(&mut self, from: &Path, to: &Path, reason: CopyReason) {
        let (from, to) = (from.to_path_buf(), to.to_path_buf());

        if self.options.dry_run {
            tracing::info!(
                "[dry-run] would copy ({reason}): {} -> {}",
                from.display(),
                to.display()
            );
            self.report
                .outcomes
                .push(Outcome::WouldCopy { from, to, reason });
            return;
        }

        match copy_file(&from, &to) {
            Ok(_) => {
                tracing::info!("copied ({reason}): {} -> {}", from.display(), to.display());
                self.report.outcomes.push(Outcome::Copied { from, to, reason });
            }
            Err(CopyError::SourceVanished { path }) => {
                self.skip(reason.source(), path, "vanished before copy");
            }
            Err(err) => {
                tracing::error!(
                    "copy failed ({reason}): {} -> {}: {err}",
                    from.display(),
                    to.display()
                );
                self.report.outcomes.push(Outcome::Failed {
                    from,
                    to,
                    reason,
                    error: err.to_string(),
                });
            }
        }
    }

    fn skip(&mut self, side: Side, path: PathBuf, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!("skipped {side}: {} ({reason})", path.display());
        self.report
            .outcomes
            .push(Outcome::Skipped { side, path, reason });
    }
}

/// Match key -> entries sharing it, in list order.
fn index_by_key(list: &[RelPath], mode: MatchMode) -> HashMap<&str, Vec<&RelPath>> {
    let mut index: HashMap<&str, Vec<&RelPath>> = HashMap::new();
    for entry in list {
        index.entry(entry.match_key(mode)).or_default().push(entry);
    }
    index
}

fn log_comparison(a: &FileMetadata, b: &FileMetadata) {
    tracing::debug!(
        "{}: A modified {} ({} bytes), B modified {} ({} bytes)",
        a.basename,
        format_timestamp(a.modified_at),
        a.size_bytes,
        format_timestamp(b.modified_at),
        b.size_bytes
    );
}

/// Local wall-clock rendering used in log lines.
pub fn format_timestamp(timestamp: SystemTime) -> String {
    DateTime::<Local>::from(timestamp)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
