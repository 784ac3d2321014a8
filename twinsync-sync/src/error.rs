//! Error types for twinsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use twinsync_core::ConfigError;
use twinsync_scan::ScanError;

/// Errors that end a reconciliation session.
///
/// Per-file problems never surface here; they become entries in the
/// [`ReconcileReport`](crate::ReconcileReport).
#[derive(Debug, Error)]
pub enum SyncError {
    /// A root is missing, not a directory, or overlaps the other root.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scanning a root or reading a list file failed.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Whether this is a configuration problem (bad root, bad config file)
    /// rather than an operational failure.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            SyncError::Config(_) | SyncError::Scan(ScanError::Config(_))
        )
    }
}

/// Why a single file copy did not happen.
#[derive(Debug, Error)]
pub enum CopyError {
    /// The source disappeared between the metadata read and the copy.
    #[error("source vanished before copy: {path}")]
    SourceVanished { path: PathBuf },

    /// A missing ancestor directory of the destination could not be created.
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the source or writing the destination failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
