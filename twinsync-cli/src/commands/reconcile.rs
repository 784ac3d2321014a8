//! `twinsync reconcile` — converge two roots from saved scan lists.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use twinsync_core::Root;
use twinsync_sync::pipeline;

use super::{load_config, print_report};
use crate::MatchModeArg;

/// Arguments for `twinsync reconcile`.
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    pub root_a: String,

    pub root_b: String,

    /// Scan list of root A, one relative path per line.
    #[arg(long, value_name = "FILE")]
    pub list_a: PathBuf,

    /// Scan list of root B.
    #[arg(long, value_name = "FILE")]
    pub list_b: PathBuf,

    /// Show what would be copied without copying anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Correlate files by `basename` (default) or full relative `path`.
    #[arg(long, value_name = "MODE")]
    pub match_by: Option<MatchModeArg>,

    /// Config file to use instead of ~/.twinsync/config.yaml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ReconcileArgs {
    pub fn run(self) -> Result<()> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(mode) = self.match_by {
            config.match_mode = mode.into();
        }

        let root_a = Root::parse(&self.root_a).context("invalid root A")?;
        let root_b = Root::parse(&self.root_b).context("invalid root B")?;

        let session = pipeline::run_from_lists(
            &root_a,
            &root_b,
            &self.list_a,
            &self.list_b,
            &config,
            self.dry_run,
        )
        .with_context(|| format!("reconcile failed for '{root_a}' <-> '{root_b}'"))?;

        print_report(
            &format!("'{root_a}' <-> '{root_b}'"),
            &session.report,
            self.dry_run,
        );
        Ok(())
    }
}
