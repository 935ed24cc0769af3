use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// netwatch: network device monitor
///
/// Polls a fleet of network devices, keeps a rolling window per metric,
/// and flags statistically anomalous readings.
#[derive(Parser, Debug)]
#[command(name = "netwatch")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the device source continuously and report anomalies
    #[command(alias = "w")]
    Watch {
        /// Polling interval override in milliseconds
        #[arg(short, long)]
        interval_ms: Option<u64>,
    },

    /// Run a recorded snapshot file through the detector
    #[command(alias = "r")]
    Replay {
        /// JSON file holding an array of ticks (each an array of devices)
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch the fleet once and show device status
    #[command(alias = "s")]
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    #[command(alias = "c")]
    Config,
}
