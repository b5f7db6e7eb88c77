//! sensord - Hardware sensor telemetry over HTTP
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use sensord::cli::{Cli, Commands};
use sensord::config::ConfigManager;
use sensord::error::SensordResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> SensordResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = info, 1 = debug, 2+ = trace
    let filter = match cli.verbose {
        0 => EnvFilter::new("sensord=info"),
        1 => EnvFilter::new("sensord=debug"),
        _ => EnvFilter::new("sensord=trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = manager.load().await?;

    match cli.command {
        Commands::Serve(args) => sensord::cli::commands::serve(args, &config).await,
        Commands::Check => sensord::cli::commands::check(&config).await,
        Commands::Config(args) => sensord::cli::commands::config(args, &config, &manager).await,
    }
}
