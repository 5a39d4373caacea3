//! Configuration schema types
//!
//! This module defines the configuration structure for stowage. The root
//! [`StowageConfig`] maps 1:1 to the TOML file.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Archive container format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    /// A single zip container
    #[default]
    Zip,
    /// A plain directory tree
    Directory,
}

/// Main stowage configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StowageConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Remote source (document + blob store) configuration
    pub source: SourceConfig,

    /// Backup run settings
    #[serde(default)]
    pub backup: BackupConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StowageConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.source.validate()?;
        self.backup.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name, used in logs
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

/// Remote source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the REST backend
    pub base_url: String,

    /// Bearer API key, if the backend requires one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Verify TLS certificates
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Collections to back up. Empty means discover via the backend.
    #[serde(default)]
    pub collections: Vec<String>,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("source.base_url must not be empty".to_string());
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("source.base_url is not a valid URL: {}", self.base_url));
        }
        if self.timeout_seconds == 0 {
            return Err("source.timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
            collections: Vec::new(),
        }
    }
}

/// Backup run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Capture the structured document collections
    #[serde(default = "default_true")]
    pub include_documents: bool,

    /// Capture the hierarchical blob store
    #[serde(default = "default_true")]
    pub include_storage: bool,

    /// Directory the archive is written into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Archive container format
    #[serde(default)]
    pub format: ArchiveFormat,

    /// Retry behavior for object fetches
    #[serde(default)]
    pub retry: RetrySettings,
}

impl BackupConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("backup.output_dir must not be empty".to_string());
        }
        self.retry.validate()
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            include_documents: true,
            include_storage: true,
            output_dir: default_output_dir(),
            format: ArchiveFormat::default(),
            retry: RetrySettings::default(),
        }
    }
}

/// Retry and backoff settings for object fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Maximum fetch attempts per object (at least 1)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry, in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Upper bound on any single delay, in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Multiplier applied to the delay after each failed attempt
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to each delay
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl RetrySettings {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("backup.retry.max_attempts must be at least 1".to_string());
        }
        if self.backoff_multiplier < 1.0 {
            return Err("backup.retry.backoff_multiplier must be >= 1.0".to_string());
        }
        if self.max_delay_ms < self.initial_delay_ms {
            return Err(
                "backup.retry.max_delay_ms must be >= backup.retry.initial_delay_ms".to_string(),
            );
        }
        Ok(())
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to rotating local files in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        const ROTATIONS: [&str; 3] = ["daily", "hourly", "never"];
        if !ROTATIONS.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: daily, hourly, never",
                self.local_rotation
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path must not be empty when local logging is enabled"
                .to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

fn default_app_name() -> String {
    "stowage".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> String {
    "./backups".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    8_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> StowageConfig {
        StowageConfig {
            application: ApplicationConfig::default(),
            source: SourceConfig::default(),
            backup: BackupConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = valid_config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let mut config = valid_config();
        config.source.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_base_url_rejected() {
        let mut config = valid_config();
        config.source.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = valid_config();
        config.source.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_attempts_rejected() {
        let mut config = valid_config();
        config.backup.retry.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backoff_multiplier_below_one_rejected() {
        let mut config = valid_config();
        config.backup.retry.backoff_multiplier = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation_rejected() {
        let mut config = valid_config();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_archive_format_deserializes_lowercase() {
        let format: ArchiveFormat = serde_json::from_str("\"directory\"").unwrap();
        assert_eq!(format, ArchiveFormat::Directory);

        let format: ArchiveFormat = serde_json::from_str("\"zip\"").unwrap();
        assert_eq!(format, ArchiveFormat::Zip);
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: StowageConfig = toml::from_str(
            r#"
[source]
base_url = "https://backend.example.com/api"
"#,
        )
        .unwrap();

        assert_eq!(config.application.name, "stowage");
        assert!(config.backup.include_documents);
        assert!(config.backup.include_storage);
        assert_eq!(config.backup.retry.max_attempts, 3);
        assert_eq!(config.backup.format, ArchiveFormat::Zip);
        assert!(config.source.collections.is_empty());
    }
}
