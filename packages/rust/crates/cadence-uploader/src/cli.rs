//! Command-line definitions for the `cadence` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command-line interface of the `cadence` binary.
#[derive(Debug, Parser)]
#[command(name = "cadence")]
#[command(about = "Upload synthetic metrics on a drift-corrected schedule, or preview the data.")]
pub struct Cli {
    /// Override config home (reads `<conf>/cadence/settings.yaml`).
    #[arg(long, global = true)]
    pub conf: Option<PathBuf>,

    /// Debug logging unless `RUST_LOG` is set.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// `cadence` subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Post one perfect square per interval to a custom metric.
    Upload(UploadArgs),
    /// Print the first records of the synthetic data stream as JSON lines.
    Sample {
        /// Number of records to print.
        #[arg(long, default_value_t = 10)]
        count: u64,

        /// Seed for the random lane (default: time and pid).
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Flags for `cadence upload`. Unset values fall back to settings files.
#[derive(Debug, Clone, Default, Args)]
pub struct UploadArgs {
    /// Metrics service base URL (e.g. `https://grok.example.com/`).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Custom metric name to post to.
    #[arg(long)]
    pub source_name: Option<String>,

    /// Seconds between uploads; fractions allowed.
    #[arg(long)]
    pub interval: Option<f64>,

    /// Number of uploads before exiting; negative or absent means forever.
    #[arg(long, allow_negative_numbers = true)]
    pub max_iterations: Option<i64>,

    /// Retry transport failures instead of exiting on them.
    #[arg(long)]
    pub tenacious: bool,

    /// Milliseconds between clock checks while waiting (default: 1).
    #[arg(long)]
    pub resolution_ms: Option<u64>,

    /// Credentials file holding `username:password` (default: `~/.grok-auth-data`).
    #[arg(long)]
    pub auth_file: Option<PathBuf>,

    /// Per-request timeout in seconds (default: 30).
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Skip TLS certificate verification.
    #[arg(long)]
    pub insecure_tls: bool,
}
