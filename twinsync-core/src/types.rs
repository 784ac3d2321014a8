//! Domain types shared by the scanner and the reconciler.
//!
//! All filesystem paths are `PathBuf`; relative scan entries are the one
//! exception and are stored as `/`-separated strings so that list files are
//! portable between hosts.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError, PathError};
use crate::path;

// ---------------------------------------------------------------------------
// RelPath
// ---------------------------------------------------------------------------

/// A file path relative to a [`Root`], stored with `/` separators.
///
/// Construction guarantees the path is non-empty, relative, and free of `..`
/// components, so [`RelPath::resolve`] can never escape its root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelPath(String);

impl RelPath {
    /// Parse a raw string (list-file line, CLI argument) into a relative path.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let normalized = path::normalize(raw)?;
        Self::from_path(&normalized)
    }

    /// Build from an already-split host path, e.g. the output of `strip_prefix`.
    pub fn from_path(p: &Path) -> Result<Self, PathError> {
        let mut parts = Vec::new();
        for component in p.components() {
            match component {
                Component::Normal(part) => {
                    let part = part.to_str().ok_or_else(|| {
                        PathError::Invalid(format!("not valid UTF-8: {}", p.display()))
                    })?;
                    parts.push(part);
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(PathError::Invalid(format!(
                        "'{}' escapes its root",
                        p.display()
                    )))
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(PathError::Invalid(format!(
                        "'{}' is not a relative path",
                        p.display()
                    )))
                }
            }
        }
        if parts.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self(parts.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name plus extension; the default cross-side match key.
    pub fn basename(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }

    /// The key this entry is correlated by under `mode`.
    pub fn match_key(&self, mode: MatchMode) -> &str {
        match mode {
            MatchMode::Basename => self.basename(),
            MatchMode::RelativePath => self.as_str(),
        }
    }

    /// Absolute path of this entry under `root`, using host separators.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        self.0.split('/').fold(root.to_path_buf(), |acc, part| acc.join(part))
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

/// An existing directory taking part in a reconciliation session.
///
/// Roots are owned by the caller; nothing in this workspace creates or
/// deletes one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root(PathBuf);

impl Root {
    /// Parse a user-supplied path string (possibly quoted) and open it.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let normalized = path::normalize(raw).map_err(|source| ConfigError::InvalidPath {
            raw: raw.to_string(),
            source,
        })?;
        Self::open(&normalized)
    }

    /// Validate that `p` exists and is a directory.
    ///
    /// Relative paths are made absolute against the current directory.
    pub fn open(p: &Path) -> Result<Self, ConfigError> {
        let absolute = if p.is_absolute() {
            path::clean(p)
        } else {
            let cwd = std::env::current_dir().map_err(|e| io_err(p, e))?;
            path::clean(&cwd.join(p))
        };

        match std::fs::metadata(&absolute) {
            Ok(meta) if meta.is_dir() => Ok(Self(absolute)),
            Ok(_) => Err(ConfigError::NotADirectory { path: absolute }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(ConfigError::RootNotFound { path: absolute })
            }
            Err(err) => Err(io_err(absolute, err)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Fail when both roots are the same directory or one contains the other.
    ///
    /// Symlinks are resolved first so two spellings of one tree are caught.
    pub fn ensure_disjoint(&self, other: &Root) -> Result<(), ConfigError> {
        Root::open(&self.0)?;
        Root::open(&other.0)?;
        let a = std::fs::canonicalize(&self.0).map_err(|e| io_err(&self.0, e))?;
        let b = std::fs::canonicalize(&other.0).map_err(|e| io_err(&other.0, e))?;
        if a.starts_with(&b) || b.starts_with(&a) {
            return Err(ConfigError::OverlappingRoots {
                a: self.0.clone(),
                b: other.0.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

impl AsRef<Path> for Root {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which of the two roots an entry or action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// How entries on one side are correlated with entries on the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// File name plus extension, wherever it lives under the root.
    #[default]
    Basename,
    /// Full `/`-separated path relative to the root.
    RelativePath,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Basename => write!(f, "basename"),
            MatchMode::RelativePath => write!(f, "relative_path"),
        }
    }
}

// ---------------------------------------------------------------------------
// FileMetadata
// ---------------------------------------------------------------------------

/// What the reconciler knows about a file at comparison time.
///
/// Never cached: it is read fresh right before each decision because the
/// scan list may be stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub basename: String,
    pub size_bytes: u64,
    pub modified_at: SystemTime,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
