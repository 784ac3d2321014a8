//! Tree scanning for `twinsync-scan`.
//!
//! [`scan`] walks a root and returns every file it should reconcile as a
//! [`RelPath`](twinsync_core::RelPath). [`depth`] produces the shallow
//! overview listing, and [`list_file`] reads and writes the plain-text list
//! format that decouples scanning from reconciliation.

pub mod depth;
mod error;
pub mod list_file;
mod walk;

pub use depth::{list_within_depth, split_by_kind, ListingEntry, SplitListing};
pub use error::ScanError;
pub use walk::{scan, scan_path};
