//! `twinsync scan <ROOT>` — write the scan list of one root.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use twinsync_core::Root;
use twinsync_scan::{list_file, scan};

use super::load_config;

/// Arguments for `twinsync scan`.
#[derive(Args, Debug)]
pub struct ScanArgs {
    pub root: String,

    /// Write the list here instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file to use instead of ~/.twinsync/config.yaml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ScanArgs {
    pub fn run(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;
        let root = Root::parse(&self.root).context("invalid root")?;
        let entries = scan(&root, &config.exclusions)
            .with_context(|| format!("scan failed for '{root}'"))?;

        match &self.output {
            Some(path) => {
                list_file::write_at(path, &entries)
                    .with_context(|| format!("cannot write '{}'", path.display()))?;
                println!("✓ {} file(s) listed to {}", entries.len(), path.display());
            }
            None => {
                for entry in &entries {
                    println!("{entry}");
                }
            }
        }
        Ok(())
    }
}
