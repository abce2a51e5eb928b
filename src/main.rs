//! precache - cache-first handler for revisioned static assets
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use precache::cli::{Cli, Commands};
use precache::config::{Config, ConfigManager};
use precache::error::PrecacheResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> PrecacheResult<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::from_cli(cli.config.clone());
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);

    match cli.command {
        Commands::Key(args) => precache::cli::commands::key(args, &config).await,
        Commands::Resolve(args) => precache::cli::commands::resolve(args, &config).await,
        Commands::Manifest(args) => precache::cli::commands::manifest(args, &config).await,
        Commands::Fetch(args) => precache::cli::commands::fetch(args, &config).await,
        Commands::Config(args) => {
            precache::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug; `general.verbose` lifts 0 to info
fn init_logging(verbose: u8, config: &Config) {
    let level = match (verbose, config.general.verbose) {
        (0, false) => "warn",
        (0, true) | (1, _) => "info",
        _ => "debug",
    };
    let filter = EnvFilter::new(format!("precache={}", level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
