//! Entry metadata reader.
//!
//! Files routinely vanish between a scan and the moment they are compared, so
//! "not there" is an ordinary answer ([`Lookup::Absent`]) rather than an
//! error, and it is never confused with a zero-byte file.

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use twinsync_core::FileMetadata;

use crate::error::{io_err, SyncError};

/// Result of looking a file up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(FileMetadata),
    Absent(Absence),
}

/// Why a lookup found nothing usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    NotFound,
    PermissionDenied,
    /// Something exists at the path but it is a directory or special file.
    NotAFile,
}

impl fmt::Display for Absence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Absence::NotFound => write!(f, "not found"),
            Absence::PermissionDenied => write!(f, "permission denied"),
            Absence::NotAFile => write!(f, "not a regular file"),
        }
    }
}

/// Read name, size and modification time of the file at `path`.
///
/// Returns `Err` only for unexpected I/O failures; missing and unreadable
/// files come back as [`Lookup::Absent`].
pub fn stat(path: &Path) -> Result<Lookup, SyncError> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Ok(Lookup::Absent(Absence::NotFound))
        }
        Err(err) if err.kind() == ErrorKind::PermissionDenied => {
            return Ok(Lookup::Absent(Absence::PermissionDenied))
        }
        Err(err) => return Err(io_err(path, err)),
    };
    if !meta.is_file() {
        return Ok(Lookup::Absent(Absence::NotAFile));
    }

    let modified_at = meta.modified().map_err(|e| io_err(path, e))?;
    let basename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Lookup::Found(FileMetadata {
        basename,
        size_bytes: meta.len(),
        modified_at,
    }))
}
