//! twinsync — keep two mirrored folder trees converged.
//!
//! # Usage
//!
//! ```text
//! twinsync sync <ROOT_A> <ROOT_B> [--dry-run] [--match-by basename|path] [--save-lists DIR]
//! twinsync scan <ROOT> [-o FILE]
//! twinsync reconcile <ROOT_A> <ROOT_B> --list-a FILE --list-b FILE [--dry-run]
//! twinsync list <ROOT> [--depth N] [-o FILE]
//! twinsync split <LIST> <ROOT>
//! ```
//!
//! Exit status is 0 when a run completes, even if individual files failed;
//! 2 when a root or config file is unusable; 1 for anything else.

mod commands;
mod logging;

use std::fmt;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use commands::{
    list::ListArgs, reconcile::ReconcileArgs, scan::ScanArgs, split::SplitArgs, sync::SyncArgs,
};
use twinsync_core::{ConfigError, MatchMode};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "twinsync",
    version,
    about = "Converge two mirrored folder trees; the newest copy of each file wins",
    long_about = None,
)]
struct Cli {
    /// Log more (-v debug). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan both roots and reconcile them.
    Sync(SyncArgs),

    /// Write the scan list of one root.
    Scan(ScanArgs),

    /// Reconcile two roots from previously written scan lists.
    Reconcile(ReconcileArgs),

    /// Depth-limited listing with deep folders collapsed.
    List(ListArgs),

    /// Split a listing into its folders and files.
    Split(SplitArgs),
}

// ---------------------------------------------------------------------------
// Shared MatchMode argument — parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `MatchMode` from CLI args.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchModeArg(pub MatchMode);

impl FromStr for MatchModeArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basename" | "name" => Ok(Self(MatchMode::Basename)),
            "path" | "relative-path" | "relative_path" => Ok(Self(MatchMode::RelativePath)),
            other => Err(format!(
                "unknown match mode '{other}'; expected: basename, path"
            )),
        }
    }
}

impl fmt::Display for MatchModeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<MatchModeArg> for MatchMode {
    fn from(m: MatchModeArg) -> Self {
        m.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let result: Result<()> = match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Scan(args) => args.run(),
        Commands::Reconcile(args) => args.run(),
        Commands::List(args) => args.run(),
        Commands::Split(args) => args.run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            if err.chain().any(|cause| cause.is::<ConfigError>()) {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
