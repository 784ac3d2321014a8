//! Error types for twinsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that make a reconciliation session impossible to start.
///
/// These are the only failures that propagate to the caller as hard errors;
/// everything that goes wrong with an individual file is logged and reported
/// instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A root directory passed by the caller does not exist.
    #[error("root does not exist: {path}")]
    RootNotFound { path: PathBuf },

    /// A root path exists but is a file (or something else) rather than a directory.
    #[error("root is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Both roots point at the same tree, or one root lives inside the other.
    #[error("roots overlap: {a} and {b}")]
    OverlappingRoots { a: PathBuf, b: PathBuf },

    /// A user-supplied path string could not be normalized.
    #[error("invalid path '{raw}': {source}")]
    InvalidPath {
        raw: String,
        #[source]
        source: PathError,
    },

    /// YAML parse error on load, with the file that failed.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Underlying I/O failure, annotated with the path involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An explicitly requested config file is missing.
    #[error("config file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

/// Why a raw path string was rejected by [`crate::path::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("{0}")]
    Invalid(String),
}

/// Convenience constructor for [`ConfigError::Io`].
pub fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
