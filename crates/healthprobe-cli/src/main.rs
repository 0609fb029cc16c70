//! CLI for healthprobe — on-device hardware health micro-benchmarks.

mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "healthprobe")]
#[command(about = "healthprobe — device health micro-benchmarks, scored and uploaded")]
#[command(version = healthprobe_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every command that runs probes.
#[derive(Args)]
struct ProbeArgs {
    /// Directory for the storage probe scratch file (default: system temp dir)
    #[arg(long)]
    scratch_dir: Option<PathBuf>,

    /// Power-supply sysfs root scanned by the battery probe
    #[arg(long)]
    power_supply_root: Option<PathBuf>,

    /// CPU probe wall-clock budget in milliseconds
    #[arg(long)]
    cpu_budget_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the health probes and whether each can run on this machine
    Scan(ProbeArgs),

    /// Run every probe and print the diagnostic report as JSON
    Collect {
        #[command(flatten)]
        probe_args: ProbeArgs,

        /// Write the report JSON to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run a single probe by name (partial match) and print its score
    Probe {
        /// Probe name, e.g. "battery", "cpu", "storage", "ram"
        name: String,

        #[command(flatten)]
        probe_args: ProbeArgs,
    },

    /// Collect a report and upload the flattened payload to a collector
    Upload {
        /// Collector base URL, e.g. http://collector.example.com
        #[arg(long)]
        base_url: String,

        #[command(flatten)]
        probe_args: ProbeArgs,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(probe_args) => commands::scan::run(&commands::collector_config(&probe_args)),
        Commands::Collect { probe_args, output } => {
            commands::collect::run(&commands::collector_config(&probe_args), output.as_deref())
        }
        Commands::Probe { name, probe_args } => {
            commands::probe::run(&commands::collector_config(&probe_args), &name)
        }
        Commands::Upload {
            base_url,
            probe_args,
        } => commands::upload::run(&commands::collector_config(&probe_args), &base_url).await,
    }
}
