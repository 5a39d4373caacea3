//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for stowage using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// stowage - collection and storage backup tool
#[derive(Parser, Debug)]
#[command(name = "stowage")]
#[command(version, about, long_about = None)]
#[command(author = "stowage contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "stowage.toml", env = "STOWAGE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "STOWAGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a backup of the configured collections and storage tree
    Backup(commands::backup::BackupArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_backup() {
        let cli = Cli::parse_from(["stowage", "backup"]);
        assert_eq!(cli.config, "stowage.toml");
        assert!(matches!(cli.command, Commands::Backup(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["stowage", "--config", "custom.toml", "backup"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["stowage", "--log-level", "debug", "backup"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["stowage", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["stowage", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_parse_backup_flags() {
        let cli = Cli::parse_from(["stowage", "backup", "--skip-storage", "--output", "/tmp/out"]);
        let Commands::Backup(args) = cli.command else {
            panic!("expected backup command");
        };
        assert!(args.skip_storage);
        assert!(!args.skip_documents);
        assert_eq!(args.output, Some("/tmp/out".to_string()));
    }
}
