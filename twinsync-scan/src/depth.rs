//! Depth-limited listing: a shallow overview of a tree where everything below
//! a cut-off depth is collapsed into a single folder marker.
//!
//! Depth counts the folders between the root and the file: files directly in
//! the root are depth 0, `a/x.txt` is depth 1. With `max_depth = 3`:
//!
//! ```text
//! notes.txt            File    (depth 0)
//! a/b/c/d.txt          File    (depth 3)
//! a/b/c/e/             Folder  (contents of e/ are deeper than 3)
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use twinsync_core::{ExclusionRules, RelPath, Root};

use crate::ScanError;

/// One line of a depth-limited listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingEntry {
    File(RelPath),
    /// A folder whose contents lie beyond the depth limit.
    Folder(RelPath),
}

/// Folders render with a trailing `/` so list files stay self-describing.
impl fmt::Display for ListingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingEntry::File(rel) => write!(f, "{rel}"),
            ListingEntry::Folder(rel) => write!(f, "{rel}/"),
        }
    }
}

/// List files up to `max_depth` and folder markers for anything deeper.
pub fn list_within_depth(
    root: &Root,
    max_depth: usize,
    rules: &ExclusionRules,
) -> Result<Vec<ListingEntry>, ScanError> {
    Root::open(root.path())?;

    // walkdir counts the root's children as depth 1, one more than ours.
    let cutoff = max_depth.saturating_add(1);
    let mut listing = Vec::new();
    let mut walker = WalkDir::new(root.path())
        .min_depth(1)
        .max_depth(cutoff)
        .sort_by_file_name()
        .into_iter();

    while let Some(next) = walker.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let Some(rel) = entry
            .path()
            .strip_prefix(root.path())
            .ok()
            .and_then(|p| RelPath::from_path(p).ok())
        else {
            tracing::warn!("skipping unrepresentable path {}", entry.path().display());
            continue;
        };

        if entry.file_type().is_dir() {
            if rules.excludes_dir(&rel) {
                walker.skip_current_dir();
            } else if entry.depth() == cutoff {
                listing.push(ListingEntry::Folder(rel));
            }
            continue;
        }

        if !rules.excludes_file(&rel) {
            listing.push(ListingEntry::File(rel));
        }
    }

    Ok(listing)
}

/// A listing partitioned by what each line refers to on disk right now.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SplitListing {
    /// Absolute paths of lines that are directories.
    pub dirs: Vec<PathBuf>,
    /// Absolute paths of lines that are files.
    pub files: Vec<PathBuf>,
}

/// Resolve each listing line under `root` and sort it into directories and
/// files. Lines that do not parse or no longer exist are logged and dropped.
pub fn split_by_kind<'a>(root: &Path, lines: impl IntoIterator<Item = &'a str>) -> SplitListing {
    let mut split = SplitListing::default();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let rel = match RelPath::parse(line) {
            Ok(rel) => rel,
            Err(err) => {
                tracing::warn!("invalid listing line '{line}': {err}");
                continue;
            }
        };
        let path = rel.resolve(root);
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => split.dirs.push(path),
            Ok(meta) if meta.is_file() => split.files.push(path),
            Ok(_) => tracing::debug!("ignoring special file {}", path.display()),
            Err(_) => tracing::warn!("path does not exist: {}", path.display()),
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    fn lines(listing: &[ListingEntry]) -> Vec<String> {
        listing.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn deep_folders_collapse_into_markers() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "top.txt");
        touch(tmp.path(), "a/one.txt");
        touch(tmp.path(), "a/b/two.txt");
        touch(tmp.path(), "a/b/deep/three.txt");
        touch(tmp.path(), "a/b/deep/deeper/four.txt");

        let root = Root::open(tmp.path()).unwrap();
        let listing = list_within_depth(&root, 2, &ExclusionRules::default()).unwrap();
        assert_eq!(
            lines(&listing),
            vec!["a/b/deep/", "a/b/two.txt", "a/one.txt", "top.txt"]
        );
    }

    #[test]
    fn depth_zero_lists_root_files_and_top_folders() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "top.txt");
        touch(tmp.path(), "a/one.txt");

        let root = Root::open(tmp.path()).unwrap();
        let listing = list_within_depth(&root, 0, &ExclusionRules::default()).unwrap();
        assert_eq!(
            listing,
            vec![
                ListingEntry::Folder(RelPath::parse("a").unwrap()),
                ListingEntry::File(RelPath::parse("top.txt").unwrap()),
            ]
        );
    }

    #[test]
    fn unbounded_depth_lists_every_file() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "top.txt");
        touch(tmp.path(), "a/b/c/d/e.txt");

        let root = Root::open(tmp.path()).unwrap();
        let listing = list_within_depth(&root, usize::MAX, &ExclusionRules::default()).unwrap();
        assert_eq!(lines(&listing), vec!["a/b/c/d/e.txt", "top.txt"]);
    }

    #[test]
    fn exclusions_apply_to_listings() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "$RECYCLE.BIN/x/ghost.txt");
        touch(tmp.path(), "desktop.ini");
        touch(tmp.path(), "keep.txt");

        let root = Root::open(tmp.path()).unwrap();
        let listing = list_within_depth(&root, 0, &ExclusionRules::default()).unwrap();
        assert_eq!(lines(&listing), vec!["keep.txt"]);
    }

    #[test]
    fn split_separates_dirs_and_files_and_drops_missing() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a/one.txt");
        fs::create_dir_all(tmp.path().join("a/b/deep")).unwrap();

        let split = split_by_kind(tmp.path(), ["a/one.txt", "a/b/deep/", "", "gone.txt", "../up"]);
        assert_eq!(split.files, vec![tmp.path().join("a").join("one.txt")]);
        assert_eq!(split.dirs, vec![tmp.path().join("a").join("b").join("deep")]);
    }
}
