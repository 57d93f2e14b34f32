//! ReportSmith CLI: the main entry point.
//!
//! Commands:
//! - `serve`: Start the web UI and HTTP API
//! - `generate`: Research one topic and write the PDF
//! - `doctor`: Check configuration

use clap::{Parser, Subcommand};
use reportsmith_core::depth::DepthLevel;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "reportsmith",
    about = "ReportSmith: research any topic and get a PDF report",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web UI and HTTP API
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate a single report from the terminal
    Generate {
        /// What the report is about
        #[arg(short, long)]
        topic: String,

        /// Beginner, Intermediate or Advanced
        #[arg(short, long, default_value_t = DepthLevel::Intermediate)]
        depth: DepthLevel,

        /// Where to write the PDF (defaults to report_<topic>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check configuration and provider credentials
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Generate {
            topic,
            depth,
            output,
        } => commands::generate::run(&topic, depth, output).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
