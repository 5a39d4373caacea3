//! Blob store object model
//!
//! This module defines the types flowing between the hierarchical enumerator
//! and the fetch stage: object handles, container listings and fully fetched
//! objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Handle to a node in the hierarchical blob store
///
/// Identity is the slash-delimited `path`. Handles are immutable once
/// produced by the enumerator or a container listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectHandle {
    /// Slash-delimited hierarchical path, e.g. `media/images/logo.png`
    pub path: String,

    /// Whether this node has children (a folder) rather than retrievable bytes
    pub is_container: bool,
}

impl ObjectHandle {
    /// Create a handle to a leaf object
    pub fn leaf(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_container: false,
        }
    }

    /// Create a handle to a container
    pub fn container(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_container: true,
        }
    }

    /// Final path segment (the object's own name)
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Immediate children of one container, as reported by the blob store
#[derive(Debug, Clone, Default)]
pub struct Listing {
    /// Leaf objects directly under the listed container
    pub objects: Vec<ObjectHandle>,

    /// Paths of sub-containers directly under the listed container
    pub containers: Vec<String>,
}

/// A leaf object with its bytes and metadata fully resolved
///
/// Created by the fetch stage on success. Never partially populated: either
/// every field is resolved or the fetch attempt failed as a whole.
#[derive(Debug, Clone)]
pub struct FetchedObject {
    /// Original hierarchical path
    pub path: String,

    /// MIME content type reported by the store
    pub content_type: String,

    /// Payload size in bytes
    pub size_bytes: u64,

    /// Raw payload
    pub bytes: Vec<u8>,

    /// Store-reported metadata, enriched with `size_bytes`, `content_type`
    /// and a `sha256` payload digest
    pub metadata: Map<String, Value>,
}
