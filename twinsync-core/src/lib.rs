//! twinsync core library — domain types, path normalization, configuration,
//! errors.
//!
//! - [`types`] — [`RelPath`], [`Root`], [`FileMetadata`] and friends
//! - [`path`] — normalization of raw path strings
//! - [`config`] — [`ExclusionRules`] and [`SyncConfig`]
//! - [`error`] — [`ConfigError`], [`PathError`]

pub mod config;
pub mod error;
pub mod path;
pub mod types;

pub use config::{ExclusionRules, SyncConfig};
pub use error::{ConfigError, PathError};
pub use types::{FileMetadata, MatchMode, RelPath, Root, Side};
