//! Configuration management for stowage.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! stowage uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `STOWAGE_*` environment variable overrides
//! - Default values for optional settings
//! - Type-safe configuration structs with validation
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [source]
//! base_url = "https://backend.example.com/api"
//! api_key = "${STOWAGE_API_KEY}"
//! collections = ["blogs", "contacts", "media"]
//!
//! [backup]
//! output_dir = "./backups"
//! format = "zip"
//!
//! [backup.retry]
//! max_attempts = 3
//! initial_delay_ms = 500
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stowage::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("stowage.toml")?;
//! println!("Source: {}", config.source.base_url);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ArchiveFormat, BackupConfig, LoggingConfig, RetrySettings, SourceConfig,
    StowageConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
