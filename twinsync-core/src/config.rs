//! Exclusion rules and session configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.twinsync/
//!   config.yaml   (optional — defaults apply when absent)
//! ```
//!
//! ```yaml
//! exclusions:
//!   reserved_folder: $RECYCLE.BIN
//!   reserved_file: desktop.ini
//!   skip_temp_files: true
//! match_mode: basename
//! list_depth: 3
//! ```
//!
//! As with the rest of the workspace, `load_at(home)` takes an explicit home
//! and `load()` derives it from `dirs::home_dir()`. Tests use `_at`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError};
use crate::types::{MatchMode, RelPath};

pub const DEFAULT_RESERVED_FOLDER: &str = "$RECYCLE.BIN";
pub const DEFAULT_RESERVED_FILE: &str = "desktop.ini";
pub const DEFAULT_LIST_DEPTH: usize = 3;

// ---------------------------------------------------------------------------
// ExclusionRules
// ---------------------------------------------------------------------------

/// What the scanner leaves out. All comparisons ignore ASCII case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExclusionRules {
    /// Top-level folder whose whole subtree is skipped.
    pub reserved_folder: String,
    /// File name skipped wherever it appears.
    pub reserved_file: String,
    /// Also skip editor lock and scratch files.
    pub skip_temp_files: bool,
    /// Substrings marking a temp file, e.g. Word's `~WRL0001.tmp`.
    pub temp_markers: Vec<String>,
    /// Suffixes marking a temp file.
    pub temp_suffixes: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            reserved_folder: DEFAULT_RESERVED_FOLDER.to_string(),
            reserved_file: DEFAULT_RESERVED_FILE.to_string(),
            skip_temp_files: false,
            temp_markers: vec!["~WRL".to_string()],
            temp_suffixes: vec![".tmp".to_string()],
        }
    }
}

impl ExclusionRules {
    /// Whether the directory at `rel` (relative to the root) is skipped
    /// together with everything below it.
    ///
    /// Only the reserved folder directly under the root counts; a nested
    /// `docs/$RECYCLE.BIN` is an ordinary folder.
    pub fn excludes_dir(&self, rel: &RelPath) -> bool {
        if self.reserved_folder.is_empty() {
            return false;
        }
        let top = rel.as_str().split('/').next().unwrap_or_default();
        top.eq_ignore_ascii_case(&self.reserved_folder)
    }

    /// Whether the file at `rel` is skipped.
    pub fn excludes_file(&self, rel: &RelPath) -> bool {
        if self.excludes_dir(rel) {
            return true;
        }
        let name = rel.basename();
        if !self.reserved_file.is_empty() && name.eq_ignore_ascii_case(&self.reserved_file) {
            return true;
        }
        self.skip_temp_files && self.is_temp_file(rel)
    }

    fn is_temp_file(&self, rel: &RelPath) -> bool {
        let lower = rel.basename().to_ascii_lowercase();
        self.temp_markers
            .iter()
            .any(|m| !m.is_empty() && lower.contains(&m.to_ascii_lowercase()))
            || self
                .temp_suffixes
                .iter()
                .any(|s| !s.is_empty() && lower.ends_with(&s.to_ascii_lowercase()))
    }
}

// ---------------------------------------------------------------------------
// SyncConfig
// ---------------------------------------------------------------------------

/// Session-wide settings, loaded from YAML with every field optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    pub exclusions: ExclusionRules,
    pub match_mode: MatchMode,
    /// Depth used by `twinsync list` when no `--depth` is given.
    pub list_depth: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            exclusions: ExclusionRules::default(),
            match_mode: MatchMode::default(),
            list_depth: DEFAULT_LIST_DEPTH,
        }
    }
}

impl SyncConfig {
    /// `<home>/.twinsync/config.yaml` — pure, no I/O.
    pub fn path_at(home: &Path) -> PathBuf {
        home.join(".twinsync").join("config.yaml")
    }

    /// Load `<home>/.twinsync/config.yaml`, falling back to defaults when the
    /// file does not exist.
    pub fn load_at(home: &Path) -> Result<Self, ConfigError> {
        let path = Self::path_at(home);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// `load_at` convenience wrapper.
    pub fn load() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Self::load_at(&home)
    }

    /// Load an explicitly named config file. A missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
