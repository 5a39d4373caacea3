//! # stowage - collection and storage backup tool
//!
//! stowage captures a remote backend's structured document collections and
//! hierarchical blob storage into a single portable archive: a manifest, one
//! JSON snapshot per collection, and the storage tree laid out under its
//! original paths.
//!
//! ## Architecture
//!
//! stowage follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Backup engine (progress, enumeration, fetch, assembly)
//! - [`adapters`] - External integrations (REST store, archive renderers)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chrono::Utc;
//! use stowage::adapters::archive::ZipArchiveWriter;
//! use stowage::adapters::rest::RestStoreClient;
//! use stowage::config::load_config;
//! use stowage::core::backup::{BackupCoordinator, BackupOptions};
//! use stowage::core::fetch::RetryConfig;
//! use stowage::core::progress::NullObserver;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("stowage.toml")?;
//!     let client = Arc::new(RestStoreClient::new(&config.source)?);
//!
//!     let coordinator = BackupCoordinator::new(
//!         client.clone(),
//!         client,
//!         config.source.collections.clone(),
//!         RetryConfig::from(&config.backup.retry),
//!     );
//!
//!     let folder = BackupCoordinator::folder_name(Utc::now());
//!     let mut writer = ZipArchiveWriter::create(
//!         std::path::Path::new(&format!("{folder}.zip")),
//!         folder.clone(),
//!     )?;
//!
//!     let summary = coordinator
//!         .run(&BackupOptions::default(), &folder, &mut writer, Arc::new(NullObserver))
//!         .await?;
//!
//!     println!("Fetched {} objects", summary.objects_fetched);
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Containment
//!
//! A backup run treats item-level failures as gaps, not aborts: a collection
//! that cannot be read is captured as an empty snapshot, an object that
//! exhausts its fetch retries is skipped, and both are recorded in the run
//! summary. Only failures that would corrupt the archive itself (a manifest
//! that cannot be written, a container that cannot be finalized) fail the
//! run.
//!
//! ## Error Handling
//!
//! stowage uses the [`domain::StowageError`] type for run-fatal errors:
//!
//! ```rust,no_run
//! use stowage::domain::StowageError;
//!
//! fn example() -> Result<(), StowageError> {
//!     let config = stowage::config::load_config("stowage.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! stowage uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting backup");
//! warn!(path = "media/logo.png", "Fetch attempt failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
