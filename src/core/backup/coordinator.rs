//! Backup run coordination
//!
//! The coordinator drives one backup run end to end: capture the document
//! collections, enumerate and fetch the blob store, assemble the archive,
//! and report a summary. Item-level failures are contained and recorded;
//! only archive finalization failures abort the run.

use crate::adapters::archive::ArchiveWriter;
use crate::adapters::store::{BlobStore, DocumentStore};
use crate::core::assemble::{assemble, MANIFEST_ENTRY};
use crate::core::collect::collect_all;
use crate::core::enumerate::enumerate;
use crate::core::fetch::{fetch_object, RetryConfig};
use crate::core::progress::{ProgressObserver, ProgressTracker};
use crate::domain::{FetchedObject, Manifest, ObjectHandle, Result, StowageError};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::summary::BackupSummary;

/// Per-run feature toggles
#[derive(Debug, Clone)]
pub struct BackupOptions {
    /// Capture the structured document collections
    pub include_documents: bool,

    /// Capture the hierarchical blob store
    pub include_storage: bool,
}

impl Default for BackupOptions {
    fn default() -> Self {
        Self {
            include_documents: true,
            include_storage: true,
        }
    }
}

/// Orchestrates backup runs against a document store and a blob store
///
/// At most one run may be in flight per coordinator; a second concurrent
/// `run` call fails immediately with [`StowageError::RunInProgress`].
pub struct BackupCoordinator {
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    collections: Vec<String>,
    retry: RetryConfig,
    run_guard: Mutex<()>,
}

impl BackupCoordinator {
    /// Create a coordinator
    ///
    /// An empty `collections` list means the collection set is discovered
    /// from the document store at run time.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        collections: Vec<String>,
        retry: RetryConfig,
    ) -> Self {
        Self {
            documents,
            blobs,
            collections,
            retry,
            run_guard: Mutex::new(()),
        }
    }

    /// Archive root folder name for a run starting at `now`
    ///
    /// The millisecond timestamp makes the name unique per run; the
    /// day-and-month prefix keeps it human readable.
    pub fn folder_name(now: DateTime<Utc>) -> String {
        format!("backup_{}_{}", now.format("%d_%b"), now.timestamp_millis())
    }

    /// Execute one backup run into `writer`
    ///
    /// The returned summary is `Ok` even when individual collections or
    /// objects failed; those are recorded inside it. Only a concurrent run,
    /// a manifest write failure or archive finalization failure yields `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`StowageError::RunInProgress`] if a run is already in
    /// flight, or [`StowageError::Archive`] if the archive cannot be
    /// materialized.
    pub async fn run(
        &self,
        options: &BackupOptions,
        folder_name: &str,
        writer: &mut dyn ArchiveWriter,
        observer: Arc<dyn ProgressObserver>,
    ) -> Result<BackupSummary> {
        let _guard = self
            .run_guard
            .try_lock()
            .map_err(|_| StowageError::RunInProgress)?;

        let mut tracker = ProgressTracker::new(observer);
        let mut summary = BackupSummary::new(folder_name);

        tracing::info!(
            run_id = %summary.run_id,
            folder = %folder_name,
            include_documents = options.include_documents,
            include_storage = options.include_storage,
            "Starting backup run"
        );
        tracker.notify("Starting backup");

        // Enumerate storage up front so the item total is final before any
        // processing starts; the percentage then never decreases mid-run.
        let handles = if options.include_storage {
            tracker.notify("Enumerating storage");
            let handles = enumerate(self.blobs.as_ref(), "/").await;

            // A misbehaving store can report the same path twice; keep the first.
            let mut seen = HashSet::new();
            let handles: Vec<_> = handles
                .into_iter()
                .filter(|h| seen.insert(h.path.clone()))
                .collect();

            summary.objects_discovered = handles.len();
            tracker.record_discovered(handles.len());
            handles
        } else {
            Vec::new()
        };

        let collections = if options.include_documents {
            let mut names = self.resolve_collection_names(&mut summary).await;

            // A duplicated configured name would collapse into one snapshot
            // while being counted twice; capture each collection once.
            let mut seen = HashSet::new();
            names.retain(|name| seen.insert(name.clone()));

            let outcome = collect_all(self.documents.as_ref(), &names, &mut tracker).await;

            for name in &outcome.failed {
                summary.add_error("collect", name, "collection capture failed");
            }
            summary.collections_failed = outcome.failed.len();
            summary.collections_captured = outcome.snapshots.len() - outcome.failed.len();
            summary.records_exported = outcome.record_count();
            outcome.snapshots
        } else {
            Default::default()
        };

        let objects = self.fetch_objects(&handles, &mut summary, &mut tracker).await;

        let manifest = Manifest::new(
            summary.started_at.to_rfc3339(),
            collections.keys().cloned().collect(),
            &objects,
        );

        let assembled = assemble(writer, &collections, &objects, &manifest)
            .and_then(|report| writer.finish().map(|()| report));
        let report = match assembled {
            Ok(report) => report,
            Err(e) => {
                summary.add_error("assemble", MANIFEST_ENTRY, e.to_string());
                summary.complete();
                summary.log_summary();
                tracker.notify_failure(&format!("Error: {}", e));
                return Err(e.into());
            }
        };

        if report.entries_skipped > 0 {
            summary.add_error(
                "assemble",
                "archive",
                format!("{} entries failed to write", report.entries_skipped),
            );
        }

        summary.complete();
        summary.log_summary();
        tracker.notify_complete("Backup completed successfully");

        Ok(summary)
    }

    /// Resolve which collections to capture, discovering them when no
    /// explicit list is configured. Discovery failure is contained: the run
    /// proceeds with no collections and the error is recorded.
    async fn resolve_collection_names(&self, summary: &mut BackupSummary) -> Vec<String> {
        if !self.collections.is_empty() {
            return self.collections.clone();
        }

        match self.documents.list_collections().await {
            Ok(names) => {
                tracing::info!(count = names.len(), "Discovered collections");
                names
            }
            Err(e) => {
                tracing::error!(error = %e, "Collection discovery failed");
                summary.add_error("discover", "collections", e.to_string());
                Vec::new()
            }
        }
    }

    async fn fetch_objects(
        &self,
        handles: &[ObjectHandle],
        summary: &mut BackupSummary,
        tracker: &mut ProgressTracker,
    ) -> Vec<FetchedObject> {
        let mut objects = Vec::with_capacity(handles.len());
        for handle in handles {
            tracker.notify(&format!("Fetching object: {}", handle.path));

            match fetch_object(self.blobs.as_ref(), handle, &self.retry).await {
                Ok(object) => {
                    summary.bytes_fetched += object.size_bytes;
                    summary.objects_fetched += 1;
                    objects.push(object);
                }
                Err(e) => {
                    summary.objects_skipped += 1;
                    summary.add_error("fetch", &handle.path, e.to_string());
                }
            }

            tracker.record_processed();
        }

        objects
    }
}
