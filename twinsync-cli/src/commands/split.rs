//! `twinsync split <LIST> <ROOT>` — separate a listing into folders and files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use twinsync_core::Root;
use twinsync_scan::list_file;

/// Arguments for `twinsync split`.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Listing written by `twinsync list` or `twinsync scan`.
    pub list: PathBuf,

    /// Root the listing is relative to.
    pub root: String,
}

impl SplitArgs {
    pub fn run(self) -> Result<()> {
        let root = Root::parse(&self.root).context("invalid root")?;
        let (dirs, files) = list_file::split_at(&self.list, root.path())
            .with_context(|| format!("split failed for '{}'", self.list.display()))?;
        println!("✓ folders: {}", dirs.display());
        println!("✓ files:   {}", files.display());
        Ok(())
    }
}
