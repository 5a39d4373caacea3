//! Document collection capture
//!
//! Pulls every configured collection from the document store. A collection
//! that cannot be read is captured as an empty snapshot and reported as
//! failed; it never aborts the run.

use crate::adapters::store::DocumentStore;
use crate::core::progress::ProgressTracker;
use crate::domain::CollectionSnapshot;
use std::collections::BTreeMap;

/// Result of the collection capture phase
#[derive(Debug, Default)]
pub struct CollectOutcome {
    /// Snapshots keyed by collection name, failed collections included as
    /// empty snapshots
    pub snapshots: BTreeMap<String, CollectionSnapshot>,

    /// Names of collections whose capture failed
    pub failed: Vec<String>,
}

impl CollectOutcome {
    /// Total records across all captured snapshots
    pub fn record_count(&self) -> usize {
        self.snapshots.values().map(|s| s.records.len()).sum()
    }
}

/// Capture all named collections, one progress unit each
pub async fn collect_all(
    store: &dyn DocumentStore,
    names: &[String],
    tracker: &mut ProgressTracker,
) -> CollectOutcome {
    let mut outcome = CollectOutcome::default();
    tracker.record_discovered(names.len());

    for name in names {
        tracker.notify(&format!("Processing collection: {}", name));

        match store.get_records(name).await {
            Ok(records) => {
                tracing::info!(
                    collection = %name,
                    records = records.len(),
                    "Captured collection"
                );
                outcome
                    .snapshots
                    .insert(name.clone(), CollectionSnapshot::new(name, records));
            }
            Err(e) => {
                tracing::error!(collection = %name, error = %e, "Collection capture failed");
                outcome
                    .snapshots
                    .insert(name.clone(), CollectionSnapshot::empty(name));
                outcome.failed.push(name.clone());
            }
        }

        tracker.record_processed();
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::progress::NullObserver;
    use crate::domain::errors::StoreError;
    use crate::domain::Record;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    struct FakeDocumentStore {
        failing: Vec<String>,
    }

    #[async_trait]
    impl DocumentStore for FakeDocumentStore {
        async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
            Ok(vec!["blogs".to_string(), "contacts".to_string()])
        }

        async fn get_records(&self, name: &str) -> Result<Vec<Record>, StoreError> {
            if self.failing.iter().any(|f| f == name) {
                return Err(StoreError::CollectionUnavailable {
                    name: name.to_string(),
                    message: "injected".to_string(),
                });
            }
            Ok(vec![Record::new("doc-1", json!({"title": "hello"}))])
        }
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_collect_all_success() {
        let store = FakeDocumentStore { failing: vec![] };
        let mut tracker = ProgressTracker::new(Arc::new(NullObserver));

        let outcome = collect_all(&store, &names(&["blogs", "contacts"]), &mut tracker).await;

        assert_eq!(outcome.snapshots.len(), 2);
        assert!(outcome.failed.is_empty());
        assert_eq!(outcome.record_count(), 2);
        assert_eq!(tracker.processed_items(), 2);
        assert_eq!(tracker.total_items(), 2);
    }

    #[tokio::test]
    async fn test_failed_collection_kept_as_empty_snapshot() {
        let store = FakeDocumentStore {
            failing: vec!["contacts".to_string()],
        };
        let mut tracker = ProgressTracker::new(Arc::new(NullObserver));

        let outcome = collect_all(&store, &names(&["blogs", "contacts"]), &mut tracker).await;

        assert_eq!(outcome.snapshots.len(), 2);
        assert_eq!(outcome.failed, vec!["contacts".to_string()]);
        assert!(outcome.snapshots["contacts"].records.is_empty());
        assert_eq!(outcome.snapshots["blogs"].records.len(), 1);
        // The failed collection still counts as processed
        assert_eq!(tracker.processed_items(), 2);
    }

    #[tokio::test]
    async fn test_collect_empty_name_list() {
        let store = FakeDocumentStore { failing: vec![] };
        let mut tracker = ProgressTracker::new(Arc::new(NullObserver));

        let outcome = collect_all(&store, &[], &mut tracker).await;

        assert!(outcome.snapshots.is_empty());
        assert_eq!(tracker.total_items(), 0);
    }
}
