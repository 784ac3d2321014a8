//! Copy executor.
//!
//! ## `copy_file` — 5-step protocol
//!
//! 1. Read source metadata (a vanished source is [`CopyError::SourceVanished`]).
//! 2. Create missing ancestor directories of the destination.
//! 3. Copy content and permission bits into a fresh `.twinsync-*.tmp` file
//!    next to the destination. The name is unique per copy, so an existing
//!    file in the user's tree is never reused as the staging file.
//! 4. Stamp the source's access and modification times on the temp file.
//! 5. Persist (rename) the temp file over the destination (atomic on POSIX).
//!
//! Because the modification time travels with the content, the next
//! reconciliation sees equal timestamps and leaves the pair alone.

use std::io::ErrorKind;
use std::path::Path;

use filetime::FileTime;
use tempfile::{Builder, NamedTempFile};

use crate::error::CopyError;

const TMP_PREFIX: &str = ".twinsync-";
const TMP_SUFFIX: &str = ".tmp";

/// Copy `src` over `dst`, preserving modification time and permissions.
///
/// Returns the number of bytes copied. On failure the temp file is removed
/// and any pre-existing `dst` is left as it was.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64, CopyError> {
    // Step 1.
    let meta = std::fs::metadata(src).map_err(|e| source_err(src, e))?;

    // Step 2.
    let parent = match dst.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| CopyError::CreateDir {
        path: parent.to_path_buf(),
        source: e,
    })?;

    // Step 3. Dropping `tmp` on any early return deletes it.
    let tmp = staging_file(parent)?;
    let bytes = std::fs::copy(src, tmp.path()).map_err(|e| copy_err(src, dst, e))?;

    // Step 4.
    let mtime = FileTime::from_last_modification_time(&meta);
    let atime = FileTime::from_last_access_time(&meta);
    filetime::set_file_times(tmp.path(), atime, mtime).map_err(|e| CopyError::Io {
        path: dst.to_path_buf(),
        source: e,
    })?;

    // Step 5.
    tmp.persist(dst).map_err(|e| CopyError::Io {
        path: dst.to_path_buf(),
        source: e.error,
    })?;

    Ok(bytes)
}

fn staging_file(dir: &Path) -> Result<NamedTempFile, CopyError> {
    Builder::new()
        .prefix(TMP_PREFIX)
        .suffix(TMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| CopyError::Io {
            path: dir.to_path_buf(),
            source: e,
        })
}

fn source_err(src: &Path, err: std::io::Error) -> CopyError {
    if err.kind() == ErrorKind::NotFound {
        CopyError::SourceVanished {
            path: src.to_path_buf(),
        }
    } else {
        CopyError::Io {
            path: src.to_path_buf(),
            source: err,
        }
    }
}

/// Blame the side that failed: a source that can no longer be opened is the
/// source's fault, anything else happened while writing the destination.
fn copy_err(src: &Path, dst: &Path, err: std::io::Error) -> CopyError {
    match std::fs::File::open(src) {
        Err(open) if open.kind() == ErrorKind::NotFound => CopyError::SourceVanished {
            path: src.to_path_buf(),
        },
        Err(_) => CopyError::Io {
            path: src.to_path_buf(),
            source: err,
        },
        Ok(_) => CopyError::Io {
            path: dst.to_path_buf(),
            source: err,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
