//! docnav CLI - Site navigation descriptor loader.
//!
//! Provides commands for:
//! - `check`: Validate a site declaration and print a summary
//! - `show`: Print the normalized site configuration as JSON
//! - `lookup`: Print the sidebar groups shown for a page

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, LookupArgs, ShowArgs};
use output::Output;

/// docnav - Site navigation descriptor loader.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    /// Enable verbose output (log loading steps).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a site declaration.
    Check(CheckArgs),
    /// Print the normalized site configuration as JSON.
    Show(ShowArgs),
    /// Print the sidebar groups for a page path.
    Lookup(LookupArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Show(args) => args.execute(),
        Commands::Lookup(args) => args.execute(),
    };

    if let Err(err) = result {
        tracing::debug!(error = ?err, "Command failed");
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
