//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for mismo-anon using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mismo-anon - MISMO loan document anonymizer
#[derive(Parser, Debug)]
#[command(name = "mismo-anon")]
#[command(version, about, long_about = None)]
#[command(author = "mismo-anon Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to ./mismo-anon.toml when present)
    #[arg(short, long, env = "MISMO_ANON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MISMO_ANON_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize a single XML file
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Anonymize XML given as an argument or on stdin
    AnonymizeText(commands::text::AnonymizeTextArgs),

    /// Anonymize every XML file in a folder into an output subfolder
    Folder(commands::folder::FolderArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_anonymize() {
        let cli = Cli::parse_from(["mismo-anon", "anonymize", "loan.xml"]);
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Anonymize(args) => {
                assert_eq!(args.file, PathBuf::from("loan.xml"));
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["mismo-anon", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["mismo-anon", "--log-level", "debug", "folder", "./loans"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Folder(_)));
    }

    #[test]
    fn test_cli_parse_anonymize_text_stdin() {
        let cli = Cli::parse_from(["mismo-anon", "anonymize-text"]);
        match cli.command {
            Commands::AnonymizeText(args) => assert!(args.text.is_none()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["mismo-anon", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }
}
