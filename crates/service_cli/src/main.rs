//! Pricer CLI - command-line entry point for the pricing workspace.
//!
//! # Commands
//!
//! - `pricer basis-swap` - Value a floating/floating basis swap
//! - `pricer shout-option --scheme <cn|implicit|explicit>` - Value a dividend
//!   shout option on the finite-difference grid
//!
//! Inputs come from an optional TOML file (`--config`). The log level is taken
//! from `--log-level`, then `PRICER_LOG_LEVEL`, then the file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{build_config, CliOverrides, LOG_LEVEL_ENV};

/// Instrument pricing CLI
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a basis swap with the discounting engine
    BasisSwap,

    /// Value a dividend shout option with the finite-difference engine
    ShoutOption {
        /// Time-stepping scheme (cn, implicit, explicit)
        #[arg(short, long)]
        scheme: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let scheme = match &cli.command {
        Commands::ShoutOption { scheme } => scheme.clone(),
        Commands::BasisSwap => None,
    };
    let overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        scheme,
    };
    let config = build_config(
        cli.config.as_deref(),
        std::env::var(LOG_LEVEL_ENV).ok(),
        &overrides,
    )?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::new(config.log_level.as_filter_str()))
        .init();

    info!("Pricer CLI v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &cli.config {
        info!("Configuration loaded from {}", path.display());
    }

    match cli.command {
        Commands::BasisSwap => commands::basis_swap::run(&config.basis_swap),
        Commands::ShoutOption { .. } => commands::shout_option::run(&config.shout_option),
    }
}
