//! raster-cli: Command-line interface for raster void filling.
//!
//! This tool fills the no-data voids of a raster with values synthesized
//! from the surrounding known samples, suitable for scripting and batch
//! pipelines.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=raster_fill=info` - Basic operation logging
//! - `RUST_LOG=raster_fill=debug` - Per-level recursion logging
//! - `RUST_LOG=raster_fill::timing=debug` - Performance timing
//! - `RUST_LOG=debug` - All debug output
//!
//! # Example
//!
//! ```bash
//! # Fill voids with info logging
//! RUST_LOG=raster_fill=info raster fill dem.asc -o dem_filled.asc
//!
//! # Inspect a raster's voids
//! raster info dem.asc --detailed
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;

use commands::{fill, info};

/// raster - A command-line tool for filling no-data voids in rasters.
///
/// Detect connected no-data regions and synthesize plausible values for
/// them from the surrounding samples.
#[derive(Parser)]
#[command(name = "raster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Display raster statistics and void information
    Info {
        /// Input raster file (ESRI ASCII grid)
        input: PathBuf,

        /// Show per-void statistics
        #[arg(long)]
        detailed: bool,
    },

    /// Fill no-data voids in a raster
    Fill {
        /// Input raster file (ESRI ASCII grid)
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Seed the output with the source raster so the result is a
        /// complete surface instead of fill patches only
        #[arg(long)]
        merge: bool,

        /// Overwrite the output file if it already exists
        #[arg(long)]
        force: bool,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    // If quiet, don't initialize any tracing
    if quiet {
        return;
    }

    // Check RUST_LOG first, then fall back to -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "raster_fill=info",
            2 => "raster_fill=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    #[cfg(debug_assertions)]
    miette::set_panic_hook();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Info { input, detailed } => info::run(input, *detailed, &cli),
        Commands::Fill {
            input,
            output,
            merge,
            force,
        } => fill::run(input, output, *merge, *force, &cli),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            // FillError carries a machine-readable code worth surfacing
            if let Some(fill_err) = e.downcast_ref::<raster_fill::FillError>() {
                eprintln!("{}: {}", "Error".red().bold(), fill_err);
                eprintln!("  {}: {}", "Code".cyan(), fill_err.code());
            } else {
                eprintln!("{}: {}", "Error".red().bold(), e);
                for cause in e.chain().skip(1) {
                    eprintln!("  {}: {}", "Caused by".yellow(), cause);
                }
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
