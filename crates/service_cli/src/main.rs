//! Rejection Sampler CLI - Command Line Operations for the Sampling Engine
//!
//! This is the operational entry point for the `sampler_engine` library.
//!
//! # Commands
//!
//! - `rejection-sampler sample --scenario sine --count 1000000` - Draw samples
//!   from a built-in scenario
//! - `rejection-sampler check` - Validate configuration
//!
//! # Configuration
//!
//! Settings are read from `sampler.toml` (or `--config <FILE>`), then
//! `SAMPLER_*` environment variables, then command-line flags.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod scenario;

pub use error::{CliError, Result};

use commands::sample::{OutputFormat, SampleArgs};
use config::CliConfig;
use scenario::Scenario;

/// Rejection sampling engine CLI
#[derive(Parser)]
#[command(name = "rejection-sampler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "sampler.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw samples from a built-in scenario
    Sample {
        /// Target/proposal pair to sample
        #[arg(short, long, value_enum, default_value = "sine")]
        scenario: Scenario,

        /// Number of samples to draw
        #[arg(short = 'n', long, default_value = "100000")]
        count: usize,

        /// Envelope constant (defaults to the scenario's bound)
        #[arg(short, long)]
        k: Option<f64>,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Proposals generated per refill
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Ceiling on acceptance tests
        #[arg(long)]
        max_attempts: Option<u64>,

        /// Cancel the run after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate configuration and print the effective settings
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_with_env_and_validate(&cli.config)?;
    let log_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    init_tracing(log_level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(config = ?config, path = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Sample {
            scenario,
            count,
            k,
            seed,
            batch_size,
            max_attempts,
            timeout_secs,
            format,
            output,
        } => commands::sample::run(
            &SampleArgs {
                scenario,
                count,
                k,
                seed,
                batch_size,
                max_attempts,
                timeout_secs,
                format,
                output,
            },
            &config,
        ),
        Commands::Check => commands::check::run(&cli.config, &config),
    }
}
