//! Plain-text list files: one relative path per line, UTF-8, `\n`-terminated.
//!
//! Writes use the `.tmp` + rename pattern so a reader never sees a
//! half-written list.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use twinsync_core::RelPath;

use crate::depth::split_by_kind;
use crate::error::{io_err, ScanError};

/// Write `items` to `path`, one per line, replacing any existing file.
///
/// Parent directories are created as needed.
pub fn write_at<T: Display>(path: &Path, items: &[T]) -> Result<(), ScanError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }

    let mut body = String::new();
    for item in items {
        body.push_str(&item.to_string());
        body.push('\n');
    }

    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    std::fs::write(&tmp, body).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

/// Read the raw, non-blank lines of a list file with line endings removed.
pub fn read_lines_at(path: &Path) -> Result<Vec<String>, ScanError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    Ok(contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect())
}

/// Read a scan list. Lines that are not valid relative paths are logged and
/// skipped, so one bad line never discards the rest of the list.
pub fn read_at(path: &Path) -> Result<Vec<RelPath>, ScanError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let mut entries = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match RelPath::parse(line) {
            Ok(rel) => entries.push(rel),
            Err(err) => tracing::warn!(
                "{}:{}: skipping invalid entry '{line}': {err}",
                path.display(),
                index + 1
            ),
        }
    }
    Ok(entries)
}

/// Split a listing file into `<stem>_dir.txt` and `<stem>_file.txt` next to
/// it, holding the absolute directory and file paths found under `root`.
///
/// Returns the two output paths.
pub fn split_at(list: &Path, root: &Path) -> Result<(PathBuf, PathBuf), ScanError> {
    let lines = read_lines_at(list)?;
    let split = split_by_kind(root, lines.iter().map(String::as_str));

    let stem = list
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "list".to_string());
    let dir_out = list.with_file_name(format!("{stem}_dir.txt"));
    let file_out = list.with_file_name(format!("{stem}_file.txt"));

    let display = |paths: &[PathBuf]| -> Vec<String> {
        paths.iter().map(|p| p.display().to_string()).collect()
    };
    write_at(&dir_out, &display(&split.dirs))?;
    write_at(&file_out, &display(&split.files))?;
    Ok((dir_out, file_out))
}
