//! playground-export: turn a Flow playground project into a test scaffold
//!
//! ## Commands
//!
//! - **export**: write the full scaffold (tests, configs, Cadence sources)
//! - **inspect**: show what the extractor finds in one Cadence file
//! - **render**: print the generated test file without writing anything
//!
//! ## Example Usage
//!
//! ```bash
//! # Export to a directory, fetching scaffold files from the default location
//! playground-export export --project project.json --out ./my-tests
//!
//! # Offline export as a single JSON package
//! playground-export export --project project.json --out export.json \
//!     --format json --scaffold-dir ./flow-playground-scaffold
//!
//! # Look at the facts extracted from a transaction
//! playground-export inspect transfer.cdc --json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod export_cli;

use export_cli::{export::ExportCmd, inspect::InspectCmd, render::RenderCmd};

#[derive(Parser)]
#[command(
    name = "playground-export",
    author,
    version,
    about = "Generate flow-js-testing scaffolds from playground projects"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (debug level unless RUST_LOG is set)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a project as a runnable test scaffold
    Export(ExportCmd),

    /// Print the facts extracted from a Cadence file
    Inspect(InspectCmd),

    /// Print the generated test file for a project
    Render(RenderCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli { command, verbose } = Cli::parse();

    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Export(cmd) => cmd.execute().await,
        Commands::Inspect(cmd) => cmd.execute(),
        Commands::Render(cmd) => cmd.execute().await,
    }
}
