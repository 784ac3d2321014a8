//! Recursive file enumeration with exclusion rules.

use std::path::Path;

use walkdir::WalkDir;

use twinsync_core::{ExclusionRules, RelPath, Root};

use crate::ScanError;

/// Walk `root` and return the relative path of every regular file, in
/// file-name-sorted walk order.
///
/// - the reserved folder directly under `root` is skipped with its subtree
/// - files named like the reserved marker file are skipped anywhere
/// - entries that cannot be read (permissions, vanished mid-walk) are logged
///   at warning level and skipped
///
/// Fails only when `root` itself is gone or no longer a directory.
pub fn scan(root: &Root, rules: &ExclusionRules) -> Result<Vec<RelPath>, ScanError> {
    // The root may have disappeared since it was opened.
    Root::open(root.path())?;

    let mut entries = Vec::new();
    let mut walker = WalkDir::new(root.path())
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();

    while let Some(next) = walker.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().map(|p| p.display().to_string()).unwrap_or_default();
                tracing::warn!(error = %err, "skipping unreadable entry {path}");
                continue;
            }
        };

        let is_dir = entry.file_type().is_dir();
        let rel = match entry
            .path()
            .strip_prefix(root.path())
            .map_err(|e| e.to_string())
            .and_then(|p| RelPath::from_path(p).map_err(|e| e.to_string()))
        {
            Ok(rel) => rel,
            Err(err) => {
                tracing::warn!("skipping {}: {err}", entry.path().display());
                if is_dir {
                    walker.skip_current_dir();
                }
                continue;
            }
        };

        if is_dir {
            if rules.excludes_dir(&rel) {
                tracing::info!("skipped excluded folder: {rel}");
                walker.skip_current_dir();
            }
            continue;
        }

        if rules.excludes_file(&rel) {
            tracing::info!("skipped excluded file: {rel}");
            continue;
        }

        // Symlinks count when they lead to a regular file; sockets, fifos and
        // links to directories do not.
        if !entry.path().is_file() {
            tracing::debug!("skipped non-regular file: {rel}");
            continue;
        }

        entries.push(rel);
    }

    tracing::debug!("scanned {}: {} file(s)", root, entries.len());
    Ok(entries)
}

/// Convenience wrapper: open `path` as a root, then [`scan`] it.
pub fn scan_path(path: &Path, rules: &ExclusionRules) -> Result<Vec<RelPath>, ScanError> {
    let root = Root::open(path)?;
    scan(&root, rules)
}
