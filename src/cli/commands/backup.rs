//! Backup command implementation
//!
//! This module implements the `backup` command for capturing the configured
//! collections and storage tree into an archive.

use crate::adapters::archive::{ArchiveWriter, DirectoryArchiveWriter, ZipArchiveWriter};
use crate::adapters::rest::RestStoreClient;
use crate::adapters::store::{BlobStore, DocumentStore};
use crate::config::{load_config, ArchiveFormat};
use crate::core::backup::{BackupCoordinator, BackupOptions};
use crate::core::fetch::RetryConfig;
use crate::core::progress::ProgressObserver;
use crate::domain::StowageError;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the backup command
#[derive(Args, Debug)]
pub struct BackupArgs {
    /// Skip the structured document collections
    #[arg(long)]
    pub skip_documents: bool,

    /// Skip the storage tree
    #[arg(long)]
    pub skip_storage: bool,

    /// Override output directory
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override archive format (zip or directory)
    #[arg(long)]
    pub format: Option<String>,

    /// Override collection(s) to back up (comma-separated)
    #[arg(long)]
    pub collection: Option<String>,
}

/// Observer that renders progress on the console
struct ConsoleObserver;

impl ProgressObserver for ConsoleObserver {
    fn on_progress(&self, message: &str, percentage: u8) {
        println!("[{percentage:>3}%] {message}");
    }
}

impl BackupArgs {
    /// Execute the backup command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting backup command");

        // Load configuration
        let mut config = load_config(config_path)?;

        // Apply CLI overrides
        if let Some(output) = &self.output {
            tracing::info!(output = %output, "Overriding output directory from CLI");
            config.backup.output_dir = output.clone();
        }

        if let Some(format) = &self.format {
            config.backup.format = match format.to_lowercase().as_str() {
                "zip" => ArchiveFormat::Zip,
                "directory" | "dir" => ArchiveFormat::Directory,
                other => {
                    tracing::error!(format = other, "Invalid archive format");
                    eprintln!("Invalid archive format: {other}. Use 'zip' or 'directory'");
                    return Ok(2);
                }
            };
        }

        if let Some(collections) = &self.collection {
            let names: Vec<String> = collections
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            tracing::info!(collections = ?names, "Overriding collections from CLI");
            config.source.collections = names;
        }

        if self.skip_documents && self.skip_storage {
            eprintln!("Nothing to back up: both documents and storage are skipped");
            return Ok(2);
        }

        let options = BackupOptions {
            include_documents: config.backup.include_documents && !self.skip_documents,
            include_storage: config.backup.include_storage && !self.skip_storage,
        };

        // Create the store client
        let client = match RestStoreClient::new(&config.source) {
            Ok(c) => Arc::new(c),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create store client");
                eprintln!("Failed to connect to source: {e}");
                return Ok(4); // Connection error exit code
            }
        };
        let documents: Arc<dyn DocumentStore> = client.clone();
        let blobs: Arc<dyn BlobStore> = client;

        let coordinator = BackupCoordinator::new(
            documents,
            blobs,
            config.source.collections.clone(),
            RetryConfig::from(&config.backup.retry),
        );

        // Create the archive writer
        let folder_name = BackupCoordinator::folder_name(Utc::now());
        let output_dir = PathBuf::from(&config.backup.output_dir);
        std::fs::create_dir_all(&output_dir)?;

        let (mut writer, destination): (Box<dyn ArchiveWriter>, PathBuf) =
            match config.backup.format {
                ArchiveFormat::Zip => {
                    let path = output_dir.join(format!("{folder_name}.zip"));
                    let writer = ZipArchiveWriter::create(&path, folder_name.clone())
                        .map_err(StowageError::from)?;
                    (Box::new(writer), path)
                }
                ArchiveFormat::Directory => {
                    let path = output_dir.join(&folder_name);
                    let writer =
                        DirectoryArchiveWriter::create(&path).map_err(StowageError::from)?;
                    (Box::new(writer), path)
                }
            };

        println!("🚀 Starting backup...");
        println!("  Source: {}", config.source.base_url);
        println!("  Destination: {}", destination.display());
        println!();

        // Execute the run
        let summary = match coordinator
            .run(&options, &folder_name, writer.as_mut(), Arc::new(ConsoleObserver))
            .await
        {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Backup failed");
                eprintln!("Backup failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Display summary
        println!();
        println!("📊 Backup Summary:");
        println!("  Run ID: {}", summary.run_id);
        println!(
            "  Collections: {} captured, {} failed",
            summary.collections_captured, summary.collections_failed
        );
        println!("  Records: {}", summary.records_exported);
        println!(
            "  Objects: {} fetched, {} skipped ({} discovered)",
            summary.objects_fetched, summary.objects_skipped, summary.objects_discovered
        );
        println!("  Bytes: {}", summary.bytes_fetched);
        println!(
            "  Duration: {:.2}s",
            summary.duration().num_milliseconds() as f64 / 1000.0
        );
        println!();

        if !summary.errors.is_empty() {
            println!("⚠️  Errors encountered:");
            for error in &summary.errors {
                println!("  - [{}] {}: {}", error.stage, error.item, error.message);
            }
            println!();
        }

        let exit_code = if summary.is_successful() {
            println!("✅ Backup completed successfully!");
            0
        } else {
            println!("⚠️  Backup completed with errors");
            1 // Partial success
        };

        Ok(exit_code)
    }
}
