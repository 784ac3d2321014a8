//! # twinsync-sync
//!
//! Bidirectional reconciliation of two mirrored directory trees.
//!
//! Call [`pipeline::run`] to scan both roots and converge them, or
//! [`reconcile`] directly when the scan lists come from elsewhere (for
//! example list files written by an earlier `twinsync scan`).

pub mod copy;
pub mod error;
pub mod pipeline;
pub mod reconcile;
pub mod stat;

pub use copy::copy_file;
pub use error::{CopyError, SyncError};
pub use pipeline::SessionReport;
pub use reconcile::{reconcile, CopyReason, Outcome, ReconcileOptions, ReconcileReport};
pub use stat::{stat, Absence, Lookup};
