pub mod list;
pub mod reconcile;
pub mod scan;
pub mod split;
pub mod sync;

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use twinsync_core::SyncConfig;
use twinsync_sync::{Outcome, ReconcileReport};

/// `--config FILE` if given, otherwise `~/.twinsync/config.yaml` or defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<SyncConfig> {
    match explicit {
        Some(path) => SyncConfig::load_from(path)
            .with_context(|| format!("cannot load config '{}'", path.display())),
        None => SyncConfig::load().context("cannot load ~/.twinsync/config.yaml"),
    }
}

/// Print one line per copy, skip and failure, then a summary line.
pub fn print_report(label: &str, report: &ReconcileReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    for outcome in &report.outcomes {
        match outcome {
            Outcome::Copied { from, to, reason } => println!(
                "  {}  {} -> {} ({reason})",
                "✎".green(),
                from.display(),
                to.display()
            ),
            Outcome::WouldCopy { from, to, reason } => println!(
                "  ~  {} -> {} ({reason})",
                from.display(),
                to.display()
            ),
            Outcome::Skipped { side, path, reason } => println!(
                "  {}  [{side}] {} ({reason})",
                "!".yellow(),
                path.display()
            ),
            Outcome::Failed {
                from, to, error, ..
            } => println!(
                "  {}  {} -> {}: {error}",
                "✗".red(),
                from.display(),
                to.display()
            ),
            Outcome::Settled { .. } => {}
        }
    }

    let copied = if dry_run {
        report.would_copy()
    } else {
        report.copied()
    };
    let verb = if dry_run { "to copy" } else { "copied" };
    let summary = format!(
        "{prefix}✓ {label} — {copied} {verb}, {} settled, {} skipped, {} failed",
        report.settled(),
        report.skipped(),
        report.failed()
    );
    if report.failed() > 0 {
        println!("{}", summary.yellow());
    } else {
        println!("{summary}");
    }
}
