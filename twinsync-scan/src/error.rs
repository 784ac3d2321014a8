use std::path::PathBuf;

use thiserror::Error;

use twinsync_core::ConfigError;

/// Errors that stop a scan or a list-file operation outright.
///
/// Unreadable entries inside a walk are not errors; they are logged and
/// skipped.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ScanError {
    ScanError::Io {
        path: path.into(),
        source,
    }
}
