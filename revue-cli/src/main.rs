//! Revue CLI - Command line interface for Revue
//!
//! Streaming merge-request review against a server-sent-event backend.

mod commands;

use clap::{Parser, Subcommand};
use revue_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::ReviewArgs;

/// Revue: streaming merge-request review
#[derive(Parser, Debug)]
#[command(name = "revue")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Review backend endpoint (overrides config and env)
    #[arg(long, global = true, env = "REVUE_ENDPOINT")]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Submit a prompt and stream the merge request list
    #[command(visible_alias = "r")]
    Review(ReviewArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.endpoint.clone())?;

    if cli.verbose {
        tracing::info!(endpoint = %config.server.endpoint, "Configuration loaded");
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("revue {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Review(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Config) => {
            println!("Revue Configuration");
            println!("===================");
            println!();
            println!("Server Settings:");
            println!("  endpoint: {}", config.server.endpoint);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Revue - streaming merge-request review");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
