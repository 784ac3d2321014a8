//! `twinsync sync` — scan both roots and converge them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use twinsync_core::Root;
use twinsync_scan::list_file;
use twinsync_sync::pipeline;

use super::{load_config, print_report};
use crate::MatchModeArg;

/// Arguments for `twinsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// First root. Quotes and mixed separators are accepted.
    pub root_a: String,

    /// Second root.
    pub root_b: String,

    /// Show what would be copied without copying anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Correlate files by `basename` (default) or full relative `path`.
    #[arg(long, value_name = "MODE")]
    pub match_by: Option<MatchModeArg>,

    /// Config file to use instead of ~/.twinsync/config.yaml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write the two scan lists as `a.txt` and `b.txt` into DIR.
    #[arg(long, value_name = "DIR")]
    pub save_lists: Option<PathBuf>,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(mode) = self.match_by {
            config.match_mode = mode.into();
        }

        let root_a = Root::parse(&self.root_a).context("invalid root A")?;
        let root_b = Root::parse(&self.root_b).context("invalid root B")?;

        let session = pipeline::run(&root_a, &root_b, &config, self.dry_run)
            .with_context(|| format!("sync failed for '{root_a}' <-> '{root_b}'"))?;

        if let Some(dir) = &self.save_lists {
            list_file::write_at(&dir.join("a.txt"), &session.list_a)
                .context("cannot save list for root A")?;
            list_file::write_at(&dir.join("b.txt"), &session.list_b)
                .context("cannot save list for root B")?;
        }

        print_report(
            &format!("'{root_a}' <-> '{root_b}'"),
            &session.report,
            self.dry_run,
        );
        Ok(())
    }
}
