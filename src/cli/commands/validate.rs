//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the stowage configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after parsing
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Application: {}", config.application.name);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Source: {}", config.source.base_url);
        println!(
            "  API Key: {}",
            if config.source.api_key.is_some() {
                "configured"
            } else {
                "none"
            }
        );
        println!(
            "  Collections: {}",
            if config.source.collections.is_empty() {
                "discovered at run time".to_string()
            } else {
                format!("{:?}", config.source.collections)
            }
        );
        println!("  Include Documents: {}", config.backup.include_documents);
        println!("  Include Storage: {}", config.backup.include_storage);
        println!("  Output Directory: {}", config.backup.output_dir);
        println!("  Format: {:?}", config.backup.format);
        println!("  Max Fetch Attempts: {}", config.backup.retry.max_attempts);
        println!();
        Ok(0)
    }
}
