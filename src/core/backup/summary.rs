//! Backup run summary

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A single recorded error with enough context to investigate
#[derive(Debug, Clone, Serialize)]
pub struct BackupErrorDetail {
    /// Stage that produced the error (discover, collect, fetch, assemble)
    pub stage: String,

    /// The collection name or object path involved
    pub item: String,

    /// Error message
    pub message: String,
}

/// Statistics for one backup run
#[derive(Debug, Clone, Serialize)]
pub struct BackupSummary {
    /// Unique run identifier
    pub run_id: Uuid,

    /// Archive root folder name
    pub folder_name: String,

    /// Run start time
    pub started_at: DateTime<Utc>,

    /// Run end time
    pub completed_at: Option<DateTime<Utc>>,

    /// Collections captured with records
    pub collections_captured: usize,

    /// Collections recorded as empty gaps after a capture failure
    pub collections_failed: usize,

    /// Total records exported across all collections
    pub records_exported: usize,

    /// Leaf objects found by enumeration
    pub objects_discovered: usize,

    /// Objects fetched and written into the archive
    pub objects_fetched: usize,

    /// Objects skipped after exhausting fetch retries
    pub objects_skipped: usize,

    /// Total payload bytes fetched
    pub bytes_fetched: u64,

    /// Errors recorded during the run
    pub errors: Vec<BackupErrorDetail>,
}

impl BackupSummary {
    /// Create a new summary for a run starting now
    pub fn new(folder_name: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            folder_name: folder_name.into(),
            started_at: Utc::now(),
            completed_at: None,
            collections_captured: 0,
            collections_failed: 0,
            records_exported: 0,
            objects_discovered: 0,
            objects_fetched: 0,
            objects_skipped: 0,
            bytes_fetched: 0,
            errors: Vec::new(),
        }
    }

    /// Record an error with stage and item context
    pub fn add_error(
        &mut self,
        stage: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.errors.push(BackupErrorDetail {
            stage: stage.into(),
            item: item.into(),
            message: message.into(),
        });
    }

    /// Mark the run as finished
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Run duration, up to now if still in flight
    pub fn duration(&self) -> chrono::Duration {
        self.completed_at.unwrap_or_else(Utc::now) - self.started_at
    }

    /// Whether the run completed without any recorded errors
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the run produced an archive but recorded item-level errors
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Log the summary at the appropriate level
    pub fn log_summary(&self) {
        let duration_secs = self.duration().num_milliseconds() as f64 / 1000.0;

        if self.is_successful() {
            tracing::info!(
                run_id = %self.run_id,
                folder = %self.folder_name,
                collections = self.collections_captured,
                records = self.records_exported,
                objects = self.objects_fetched,
                bytes = self.bytes_fetched,
                duration_secs,
                "Backup completed successfully"
            );
        } else {
            tracing::warn!(
                run_id = %self.run_id,
                folder = %self.folder_name,
                collections = self.collections_captured,
                collections_failed = self.collections_failed,
                objects = self.objects_fetched,
                objects_skipped = self.objects_skipped,
                errors = self.errors.len(),
                duration_secs,
                "Backup completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    stage = %error.stage,
                    item = %error.item,
                    message = %error.message,
                    "Run error"
                );
            }
        }
    }
}
