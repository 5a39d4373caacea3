//! Domain error types
//!
//! This module defines the error hierarchy for stowage. All errors are
//! domain-specific and don't expose third-party types: the REST adapter maps
//! HTTP client failures into [`StoreError`] variants, and the archive
//! renderers map I/O and container failures into [`ArchiveError`] variants.

use thiserror::Error;

/// Main stowage error type
///
/// This is the primary error type used throughout the application.
/// Per-item failures (a single object or collection) are contained at the
/// stage that produced them and never surface as this type; only run-fatal
/// conditions do.
#[derive(Debug, Error)]
pub enum StowageError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Store-related errors (document or blob store)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Archive output errors
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// A backup run was started while another run was in flight
    #[error("A backup run is already in progress")]
    RunInProgress,

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors produced by the document or blob store collaborators
///
/// Every variant is per-item: the orchestration engine contains these at the
/// stage that produced them (skip the item, log, continue).
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Failed to reach the remote store
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// Authentication was rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Listing the children of a container failed
    #[error("Failed to list container '{path}': {message}")]
    ListFailed { path: String, message: String },

    /// A record collection could not be opened or read
    #[error("Collection '{name}' unavailable: {message}")]
    CollectionUnavailable { name: String, message: String },

    /// Metadata retrieval failed for an object
    #[error("Failed to fetch metadata for '{path}': {message}")]
    MetadataFailed { path: String, message: String },

    /// Payload retrieval failed for an object
    #[error("Failed to fetch payload for '{path}': {message}")]
    PayloadFailed { path: String, message: String },

    /// The store returned a zero-length payload for a leaf object
    #[error("Empty payload for '{path}'")]
    EmptyPayload { path: String },

    /// The store returned a response the adapter could not interpret
    #[error("Invalid response from store: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// The requested item does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

/// An object fetch that exhausted its retry budget
///
/// Carries the path, how many attempts were made and the last underlying
/// cause. Produced only after `max_attempts` consecutive failures; the run
/// records the skip and continues.
#[derive(Debug, Error)]
#[error("Failed to fetch '{path}' after {attempts} attempts: {source}")]
pub struct FetchError {
    /// Object path that could not be fetched
    pub path: String,

    /// Number of attempts made before giving up
    pub attempts: u32,

    /// Last error observed
    #[source]
    pub source: StoreError,
}

/// Archive output errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The manifest entry could not be written. Fatal: the archive is
    /// useless without its manifest, so assembly aborts.
    #[error("Failed to write manifest: {0}")]
    ManifestWrite(String),

    /// A single entry could not be written. Non-fatal: the entry is
    /// dropped from the archive and assembly continues.
    #[error("Failed to write entry '{path}': {message}")]
    Entry { path: String, message: String },

    /// Finalizing the archive container failed
    #[error("Failed to finalize archive: {0}")]
    Finalize(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ArchiveError {
    fn from(err: std::io::Error) -> Self {
        ArchiveError::Io(err.to_string())
    }
}

impl From<std::io::Error> for StowageError {
    fn from(err: std::io::Error) -> Self {
        StowageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StowageError {
    fn from(err: serde_json::Error) -> Self {
        StowageError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for StowageError {
    fn from(err: toml::de::Error) -> Self {
        StowageError::Configuration(format!("TOML parse error: {err}"))
    }
}
