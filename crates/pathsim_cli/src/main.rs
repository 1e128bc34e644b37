//! pathsim CLI - Correlated GBM Path Simulation
//!
//! Operational entry point for the path engine.
//!
//! # Commands
//!
//! - `pathsim run` - Run a parallel batch of trials and report phase timings
//! - `pathsim sample` - Simulate one set of paths and print it
//! - `pathsim check` - Validate settings and factorise the correlation matrix
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate owns everything process-level:
//! settings files, environment overrides, logging setup and output formats.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;
mod settings;

pub use error::{CliError, Result};

use commands::sample::OutputFormat;

/// Correlated GBM path simulation CLI
#[derive(Parser)]
#[command(name = "pathsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (TOML); the built-in two-asset setup is used if omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a batch of independent trials
    Run {
        /// Number of trials (overrides settings)
        #[arg(short = 'n', long)]
        trials: Option<usize>,

        /// Base seed (overrides settings)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Simulate and print a single set of paths
    Sample {
        /// Seed (overrides settings)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Validate settings without simulating
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise tracing; stdout is reserved for command output
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Run { trials, seed } => {
            commands::run::run(config, trials, seed).context("batch run failed")
        }
        Commands::Sample { seed, format } => {
            commands::sample::run(config, seed, format).context("sampling failed")
        }
        Commands::Check => commands::check::run(config).context("configuration check failed"),
    }
}
