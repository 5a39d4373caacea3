//! Store abstraction traits
//!
//! This module defines the collaborator interfaces the orchestration engine
//! depends on: a structured document store and a hierarchical blob store.
//! Adapters implement these traits so the core can be tested against
//! in-memory fakes and pointed at different backends without change.

use crate::domain::{Listing, Record, StoreError};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Structured document store collaborator
///
/// Exposes named collections of (id, payload) records. Payloads are opaque
/// serializable values; no schema is assumed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List the names of all available collections
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot enumerate collections.
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;

    /// Read every record in a collection, in store iteration order
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be opened or read. The
    /// caller records the gap and continues; it does not retry.
    async fn get_records(&self, name: &str) -> Result<Vec<Record>, StoreError>;
}

/// Hierarchical blob store collaborator
///
/// A tree of containers (folders) and leaf objects (files with bytes and
/// metadata). How bytes are actually retrieved (direct URL, signed locator,
/// server-side proxy) is an implementation detail behind `get_payload`.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// List the immediate children of a container
    ///
    /// `prefix` is a slash-delimited container path; the empty string is the
    /// root.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails. The enumerator treats this as
    /// zero children for the subtree and continues with siblings.
    async fn list_children(&self, prefix: &str) -> Result<Listing, StoreError>;

    /// Retrieve the metadata mapping for a leaf object
    async fn get_metadata(&self, path: &str) -> Result<Map<String, Value>, StoreError>;

    /// Retrieve the raw payload for a leaf object
    async fn get_payload(&self, path: &str) -> Result<Vec<u8>, StoreError>;
}
