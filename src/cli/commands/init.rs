//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "stowage.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing stowage configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set STOWAGE_API_KEY in the environment or a .env file");
                println!("  3. Validate configuration: stowage validate-config");
                println!("  4. Run a backup: stowage backup");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn sample_config() -> &'static str {
        r#"# stowage Configuration File
# Backup tool for document collections and blob storage trees

[application]
name = "stowage"
log_level = "info"

[source]
base_url = "https://backend.example.com/api"
# Bearer token, substituted from the environment
api_key = "${STOWAGE_API_KEY}"
timeout_seconds = 30
tls_verify = true
# Leave empty to discover collections from the backend
collections = ["blogs", "contacts", "media"]

[backup]
include_documents = true
include_storage = true
output_dir = "./backups"
# zip | directory
format = "zip"

[backup.retry]
max_attempts = 3
initial_delay_ms = 500
max_delay_ms = 8000
backoff_multiplier = 2.0
jitter = true

[logging]
local_enabled = false
local_path = "logs"
# daily | hourly | never
local_rotation = "daily"
"#
    }
}
