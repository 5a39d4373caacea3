//! REST store client
//!
//! Thin HTTP implementation of both store collaborator traits against a
//! REST backend. Payload retrieval is two-step: resolve a transient download
//! locator for the object, then fetch the bytes from it. Retry, backoff and
//! progress accounting live in the core; this adapter only translates calls
//! and errors.

use crate::adapters::store::{BlobStore, DocumentStore};
use crate::config::SourceConfig;
use crate::domain::{Listing, Record, Result, StoreError, StowageError};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::Duration;
use url::Url;

use super::models::{CollectionList, DownloadLocator, RecordList, StorageListing};

/// HTTP client for the remote document/blob backend
pub struct RestStoreClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<crate::config::SecretString>,
}

impl RestStoreClient {
    /// Create a client from source configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| {
            StowageError::Configuration(format!("Invalid source base_url '{base}': {e}"))
        })?;

        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_seconds));
        if !config.tls_verify {
            tracing::warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder
            .build()
            .map_err(|e| StowageError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> std::result::Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|e| StoreError::InvalidResponse(format!("invalid endpoint '{path}': {e}")))
    }

    async fn send(&self, url: Url) -> std::result::Result<reqwest::Response, StoreError> {
        let mut request = self.http.get(url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await.map_err(map_transport_error)?;
        check_status(&response)?;
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> std::result::Result<T, StoreError> {
        self.send(url)
            .await?
            .json::<T>()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }

    async fn get_bytes(&self, url: Url) -> std::result::Result<Vec<u8>, StoreError> {
        let bytes = self
            .send(url)
            .await?
            .bytes()
            .await
            .map_err(map_transport_error)?;
        Ok(bytes.to_vec())
    }

    fn query_url(&self, path: &str, key: &str, value: &str) -> std::result::Result<Url, StoreError> {
        let mut url = self.url(path)?;
        url.query_pairs_mut().append_pair(key, value);
        Ok(url)
    }
}

#[async_trait]
impl DocumentStore for RestStoreClient {
    async fn list_collections(&self) -> std::result::Result<Vec<String>, StoreError> {
        let url = self.url("collections")?;
        let list: CollectionList = self.get_json(url).await?;
        Ok(list.collections)
    }

    async fn get_records(&self, name: &str) -> std::result::Result<Vec<Record>, StoreError> {
        let url = self.url(&format!("collections/{name}/records"))?;
        let list: RecordList = self.get_json(url).await.map_err(|e| {
            StoreError::CollectionUnavailable {
                name: name.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(list.records.into_iter().map(Record::from).collect())
    }
}

#[async_trait]
impl BlobStore for RestStoreClient {
    async fn list_children(&self, prefix: &str) -> std::result::Result<Listing, StoreError> {
        let url = self.query_url("storage/list", "prefix", prefix)?;
        let listing: StorageListing =
            self.get_json(url)
                .await
                .map_err(|e| StoreError::ListFailed {
                    path: prefix.to_string(),
                    message: e.to_string(),
                })?;
        Ok(listing.into())
    }

    async fn get_metadata(&self, path: &str) -> std::result::Result<Map<String, Value>, StoreError> {
        let url = self.query_url("storage/metadata", "path", path)?;
        self.get_json(url)
            .await
            .map_err(|e| StoreError::MetadataFailed {
                path: path.to_string(),
                message: e.to_string(),
            })
    }

    async fn get_payload(&self, path: &str) -> std::result::Result<Vec<u8>, StoreError> {
        // Two-step retrieval: locator first, then the bytes it points at.
        let locator_url = self.query_url("storage/locator", "path", path)?;
        let locator: DownloadLocator =
            self.get_json(locator_url)
                .await
                .map_err(|e| StoreError::PayloadFailed {
                    path: path.to_string(),
                    message: format!("locator resolution failed: {e}"),
                })?;

        let download_url = Url::parse(&locator.url).map_err(|e| StoreError::PayloadFailed {
            path: path.to_string(),
            message: format!("invalid download locator: {e}"),
        })?;

        self.get_bytes(download_url)
            .await
            .map_err(|e| StoreError::PayloadFailed {
                path: path.to_string(),
                message: e.to_string(),
            })
    }
}

fn map_transport_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::Timeout(err.to_string())
    } else if err.is_connect() {
        StoreError::ConnectionFailed(err.to_string())
    } else {
        StoreError::InvalidResponse(err.to_string())
    }
}

fn check_status(response: &reqwest::Response) -> std::result::Result<(), StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let message = status
        .canonical_reason()
        .unwrap_or("unknown status")
        .to_string();

    Err(match status.as_u16() {
        401 | 403 => StoreError::AuthenticationFailed(message),
        404 => StoreError::NotFound(response.url().path().to_string()),
        code if status.is_client_error() => StoreError::ClientError {
            status: code,
            message,
        },
        code => StoreError::ServerError {
            status: code,
            message,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SourceConfig;

    fn test_config(base_url: &str) -> SourceConfig {
        SourceConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_collections() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/collections")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"collections": ["blogs", "contacts"]}"#)
            .create_async()
            .await;

        let client = RestStoreClient::new(&test_config(&server.url())).unwrap();
        let collections = client.list_collections().await.unwrap();

        assert_eq!(collections, vec!["blogs", "contacts"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_records_maps_failure_to_collection_unavailable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/collections/blogs/records")
            .with_status(500)
            .create_async()
            .await;

        let client = RestStoreClient::new(&test_config(&server.url())).unwrap();
        let result = client.get_records("blogs").await;

        match result {
            Err(StoreError::CollectionUnavailable { name, .. }) => assert_eq!(name, "blogs"),
            other => panic!("expected CollectionUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_children_parses_listing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/storage/list?prefix=x")
            .with_status(200)
            .with_body(r#"{"objects": [{"path": "x/1.bin"}], "prefixes": ["x/y"]}"#)
            .create_async()
            .await;

        let client = RestStoreClient::new(&test_config(&server.url())).unwrap();
        let listing = client.list_children("x").await.unwrap();

        assert_eq!(listing.objects.len(), 1);
        assert_eq!(listing.objects[0].path, "x/1.bin");
        assert_eq!(listing.containers, vec!["x/y".to_string()]);
    }

    #[tokio::test]
    async fn test_get_payload_follows_locator() {
        let mut server = mockito::Server::new_async().await;
        let locator_body = format!(r#"{{"url": "{}/download/1.bin"}}"#, server.url());
        server
            .mock("GET", "/storage/locator?path=x%2F1.bin")
            .with_status(200)
            .with_body(locator_body)
            .create_async()
            .await;
        server
            .mock("GET", "/download/1.bin")
            .with_status(200)
            .with_body(&[1u8, 2, 3][..])
            .create_async()
            .await;

        let client = RestStoreClient::new(&test_config(&server.url())).unwrap();
        let bytes = client.get_payload("x/1.bin").await.unwrap();

        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_authentication_failed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/collections")
            .with_status(401)
            .create_async()
            .await;

        let client = RestStoreClient::new(&test_config(&server.url())).unwrap();
        let result = client.list_collections().await;

        assert!(matches!(result, Err(StoreError::AuthenticationFailed(_))));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = RestStoreClient::new(&test_config("not a url"));
        assert!(matches!(result, Err(StowageError::Configuration(_))));
    }
}
