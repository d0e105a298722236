//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Pay-per-hour computer club day simulator.
///
/// Replays a chronological event log for a single club day, enforcing the
/// house rules, and prints the derived event stream plus per-table revenue
/// and occupied time.
#[derive(Debug, Parser)]
#[command(name = "club", version, about, long_about = None)]
pub struct Cli {
    /// Path to the input event log.
    pub file: PathBuf,

    /// Emit the report as JSON instead of the plain transcript.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
