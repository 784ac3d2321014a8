//! `twinsync list <ROOT> [--depth N]` — shallow overview of a tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use twinsync_core::Root;
use twinsync_scan::{list_file, list_within_depth};

use super::load_config;

/// Arguments for `twinsync list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    pub root: String,

    /// Deepest folder level whose files are listed; deeper folders appear as
    /// `name/` markers. Defaults to `list_depth` from the config (3).
    #[arg(long, short = 'd', value_name = "N")]
    pub depth: Option<usize>,

    /// Write the listing here instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file to use instead of ~/.twinsync/config.yaml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;
        let depth = self.depth.unwrap_or(config.list_depth);
        let root = Root::parse(&self.root).context("invalid root")?;
        let listing = list_within_depth(&root, depth, &config.exclusions)
            .with_context(|| format!("listing failed for '{root}'"))?;

        match &self.output {
            Some(path) => {
                list_file::write_at(path, &listing)
                    .with_context(|| format!("cannot write '{}'", path.display()))?;
                println!("✓ {} line(s) written to {}", listing.len(), path.display());
            }
            None => {
                for entry in &listing {
                    println!("{entry}");
                }
            }
        }
        Ok(())
    }
}
