// mismo-anon - MISMO Loan Document Anonymizer
// Copyright (c) 2025 mismo-anon Contributors
// Licensed under the MIT License

use clap::Parser;
use mismo_anon::cli::{Cli, Commands};
use mismo_anon::config::{load_config_or_default, LoggingConfig, MismoAnonConfig};
use mismo_anon::domain::AnonError;
use mismo_anon::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let loaded = load_config_or_default(cli.config.as_deref());

    // Fall back to console-only logging when the configuration is unusable
    let (log_level, logging_config) = match &loaded {
        Ok(config) => (
            cli.log_level
                .clone()
                .unwrap_or_else(|| config.application.log_level.clone()),
            config.logging.clone(),
        ),
        Err(_) => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::default(),
        ),
    };
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(e.exit_code());
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "mismo-anon - MISMO Loan Document Anonymizer"
    );

    let exit_code = match execute_command(&cli, loaded).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(
    cli: &Cli,
    loaded: Result<MismoAnonConfig, AnonError>,
) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::ValidateConfig(args) => return args.execute(cli.config.as_deref()).await,
        Commands::Init(args) => return args.execute().await,
        _ => {}
    }

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            return Ok(e.exit_code());
        }
    };

    match &cli.command {
        Commands::Anonymize(args) => args.execute(&config).await,
        Commands::AnonymizeText(args) => args.execute(&config).await,
        Commands::Folder(args) => args.execute(&config).await,
        Commands::ValidateConfig(_) | Commands::Init(_) => Ok(0),
    }
}
