//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{ArchiveFormat, StowageConfig};
use crate::config::secret_string;
use crate::domain::errors::StowageError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into StowageConfig
/// 4. Applies environment variable overrides (STOWAGE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use stowage::config::loader::load_config;
///
/// let config = load_config("stowage.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<StowageConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StowageError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        StowageError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: StowageConfig = toml::from_str(&contents)
        .map_err(|e| StowageError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        StowageError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static pattern");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(StowageError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the STOWAGE_* prefix
///
/// Environment variables follow the pattern: STOWAGE_<SECTION>_<KEY>
/// For example: STOWAGE_SOURCE_BASE_URL, STOWAGE_BACKUP_OUTPUT_DIR
fn apply_env_overrides(config: &mut StowageConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("STOWAGE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Source overrides
    if let Ok(val) = std::env::var("STOWAGE_SOURCE_BASE_URL") {
        config.source.base_url = val;
    }
    if let Ok(val) = std::env::var("STOWAGE_SOURCE_API_KEY") {
        config.source.api_key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("STOWAGE_SOURCE_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.source.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("STOWAGE_SOURCE_COLLECTIONS") {
        config.source.collections = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    // Backup overrides
    if let Ok(val) = std::env::var("STOWAGE_BACKUP_INCLUDE_DOCUMENTS") {
        config.backup.include_documents = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("STOWAGE_BACKUP_INCLUDE_STORAGE") {
        config.backup.include_storage = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("STOWAGE_BACKUP_OUTPUT_DIR") {
        config.backup.output_dir = val;
    }
    if let Ok(val) = std::env::var("STOWAGE_BACKUP_FORMAT") {
        match val.to_lowercase().as_str() {
            "zip" => config.backup.format = ArchiveFormat::Zip,
            "directory" => config.backup.format = ArchiveFormat::Directory,
            other => tracing::warn!(format = other, "Ignoring unknown STOWAGE_BACKUP_FORMAT"),
        }
    }
    if let Ok(val) = std::env::var("STOWAGE_BACKUP_RETRY_MAX_ATTEMPTS") {
        if let Ok(attempts) = val.parse() {
            config.backup.retry.max_attempts = attempts;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("STOWAGE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("STOWAGE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
