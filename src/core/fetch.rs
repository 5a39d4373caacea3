//! Bounded-retry object fetching
//!
//! One fetch resolves an object's metadata and payload, verifies the payload
//! is non-empty, and enriches the metadata with a size, content type and
//! sha256 digest. Failed attempts are retried with exponential backoff up to
//! a configured bound; the final error carries the attempt count and the
//! last underlying cause.

use crate::adapters::store::BlobStore;
use crate::config::RetrySettings;
use crate::domain::errors::{FetchError, StoreError};
use crate::domain::{FetchedObject, ObjectHandle};
use rand::Rng;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::time::Duration;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Retry policy for a single object fetch
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first (at least 1)
    pub max_attempts: u32,

    /// Delay before the first retry
    pub initial_delay: Duration,

    /// Cap applied to every delay
    pub max_delay: Duration,

    /// Multiplier applied to the delay after each failure
    pub backoff_multiplier: f64,

    /// Randomize each delay within [50%, 100%] of its nominal value
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            initial_delay: Duration::from_millis(settings.initial_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            backoff_multiplier: settings.backoff_multiplier,
            jitter: settings.jitter,
        }
    }
}

impl RetryConfig {
    fn delay_for(&self, failed_attempts: u32) -> Duration {
        let exponent = failed_attempts.saturating_sub(1);
        let nominal = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi(exponent as i32);
        let capped = nominal.min(self.max_delay.as_millis() as f64);

        let millis = if self.jitter && capped > 0.0 {
            rand::thread_rng().gen_range((capped / 2.0)..=capped)
        } else {
            capped
        };
        Duration::from_millis(millis as u64)
    }
}

/// Fetch one object with retries
///
/// Every attempt failure is retried until the budget is exhausted. On
/// exhaustion the returned error carries the path, the number of attempts
/// made, and the last cause.
pub async fn fetch_object(
    store: &dyn BlobStore,
    handle: &ObjectHandle,
    retry: &RetryConfig,
) -> Result<FetchedObject, FetchError> {
    let mut last_error = None;

    for attempt in 1..=retry.max_attempts {
        match fetch_once(store, handle).await {
            Ok(object) => {
                if attempt > 1 {
                    tracing::info!(path = %handle.path, attempt, "Fetch succeeded after retry");
                }
                return Ok(object);
            }
            Err(e) => {
                tracing::warn!(
                    path = %handle.path,
                    attempt,
                    max_attempts = retry.max_attempts,
                    error = %e,
                    "Fetch attempt failed"
                );
                last_error = Some(e);

                if attempt < retry.max_attempts {
                    tokio::time::sleep(retry.delay_for(attempt)).await;
                }
            }
        }
    }

    Err(FetchError {
        path: handle.path.clone(),
        attempts: retry.max_attempts,
        source: last_error
            .unwrap_or_else(|| StoreError::InvalidResponse("no attempt was made".to_string())),
    })
}

async fn fetch_once(
    store: &dyn BlobStore,
    handle: &ObjectHandle,
) -> Result<FetchedObject, StoreError> {
    let mut metadata = store.get_metadata(&handle.path).await?;
    let bytes = store.get_payload(&handle.path).await?;

    if bytes.is_empty() {
        return Err(StoreError::EmptyPayload {
            path: handle.path.clone(),
        });
    }

    let content_type = metadata
        .get("content_type")
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();
    let digest = hex::encode(Sha256::digest(&bytes));

    metadata.insert("size_bytes".to_string(), Value::from(bytes.len() as u64));
    metadata.insert(
        "content_type".to_string(),
        Value::from(content_type.clone()),
    );
    metadata.insert("sha256".to_string(), Value::from(digest));

    Ok(FetchedObject {
        path: handle.path.clone(),
        content_type,
        size_bytes: bytes.len() as u64,
        bytes,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Listing;
    use async_trait::async_trait;
    use serde_json::Map;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakyStore {
        failures_before_success: u32,
        payload: Vec<u8>,
        calls: AtomicU32,
    }

    impl FlakyStore {
        fn new(failures_before_success: u32, payload: &[u8]) -> Self {
            Self {
                failures_before_success,
                payload: payload.to_vec(),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl BlobStore for FlakyStore {
        async fn list_children(&self, _prefix: &str) -> Result<Listing, StoreError> {
            unimplemented!("not used by fetching")
        }

        async fn get_metadata(&self, path: &str) -> Result<Map<String, Value>, StoreError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures_before_success {
                return Err(StoreError::MetadataFailed {
                    path: path.to_string(),
                    message: "injected".to_string(),
                });
            }
            let mut metadata = Map::new();
            metadata.insert("content_type".to_string(), Value::from("image/png"));
            Ok(metadata)
        }

        async fn get_payload(&self, _path: &str) -> Result<Vec<u8>, StoreError> {
            Ok(self.payload.clone())
        }
    }

    fn fast_retry(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_multiplier: 2.0,
            jitter: false,
        }
    }

    #[tokio::test]
    async fn test_fetch_success_first_attempt() {
        let store = FlakyStore::new(0, b"payload");
        let handle = ObjectHandle::leaf("x/1.bin");

        let object = fetch_object(&store, &handle, &fast_retry(3)).await.unwrap();

        assert_eq!(object.path, "x/1.bin");
        assert_eq!(object.size_bytes, 7);
        assert_eq!(object.content_type, "image/png");
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_metadata_enriched_with_digest_and_size() {
        let store = FlakyStore::new(0, b"abc");
        let handle = ObjectHandle::leaf("x/1.bin");

        let object = fetch_object(&store, &handle, &fast_retry(1)).await.unwrap();

        assert_eq!(
            object.metadata.get("sha256").and_then(|v| v.as_str()),
            // sha256("abc")
            Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
        assert_eq!(
            object.metadata.get("size_bytes").and_then(|v| v.as_u64()),
            Some(3)
        );
        assert_eq!(
            object.metadata.get("content_type").and_then(|v| v.as_str()),
            Some("image/png")
        );
    }

    #[tokio::test]
    async fn test_fetch_retries_then_succeeds() {
        let store = FlakyStore::new(2, b"payload");
        let handle = ObjectHandle::leaf("x/1.bin");

        let object = fetch_object(&store, &handle, &fast_retry(3)).await.unwrap();

        assert_eq!(object.path, "x/1.bin");
        assert_eq!(store.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fetch_exhausts_attempts() {
        let store = FlakyStore::new(10, b"payload");
        let handle = ObjectHandle::leaf("x/1.bin");

        let err = fetch_object(&store, &handle, &fast_retry(3))
            .await
            .unwrap_err();

        assert_eq!(err.path, "x/1.bin");
        assert_eq!(err.attempts, 3);
        assert_eq!(store.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_payload_is_a_failure() {
        let store = FlakyStore::new(0, b"");
        let handle = ObjectHandle::leaf("x/empty.bin");

        let err = fetch_object(&store, &handle, &fast_retry(2))
            .await
            .unwrap_err();

        assert!(matches!(err.source, StoreError::EmptyPayload { .. }));
        assert_eq!(err.attempts, 2);
    }

    #[test]
    fn test_delay_grows_and_caps() {
        let retry = RetryConfig {
            max_attempts: 5,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(300),
            backoff_multiplier: 2.0,
            jitter: false,
        };

        assert_eq!(retry.delay_for(1), Duration::from_millis(100));
        assert_eq!(retry.delay_for(2), Duration::from_millis(200));
        assert_eq!(retry.delay_for(3), Duration::from_millis(300));
        assert_eq!(retry.delay_for(4), Duration::from_millis(300));
    }

    #[test]
    fn test_jittered_delay_stays_within_bounds() {
        let retry = RetryConfig {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(800),
            backoff_multiplier: 2.0,
            jitter: true,
        };

        for _ in 0..50 {
            let delay = retry.delay_for(2);
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_millis(200));
        }
    }

    #[test]
    fn test_retry_config_from_settings() {
        let settings = RetrySettings {
            max_attempts: 4,
            initial_delay_ms: 250,
            max_delay_ms: 4_000,
            backoff_multiplier: 3.0,
            jitter: false,
        };

        let retry = RetryConfig::from(&settings);
        assert_eq!(retry.max_attempts, 4);
        assert_eq!(retry.initial_delay, Duration::from_millis(250));
        assert_eq!(retry.max_delay, Duration::from_secs(4));
        assert!(!retry.jitter);
    }
}
