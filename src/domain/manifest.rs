//! Backup manifest model
//!
//! The manifest is the summary document written into every archive. It
//! describes what the archive contains without embedding large binary
//! payloads: collection names and per-object path+metadata records only.

use crate::domain::object::FetchedObject;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Per-object manifest record: path and metadata, raw bytes excluded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestObject {
    /// Original hierarchical path
    pub path: String,

    /// Store-reported metadata for the object
    pub metadata: Map<String, Value>,
}

/// Summary document describing archive contents
///
/// The `objects` listing mirrors the run's fetched-object sequence exactly:
/// identical cardinality and ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Run start time as an ISO-8601 string
    pub timestamp: String,

    /// Names of the collections actually captured
    pub collections: Vec<String>,

    /// One record per fetched object, in fetch order
    pub objects: Vec<ManifestObject>,
}

impl Manifest {
    /// Build a manifest from the run's captured collections and objects
    pub fn new(
        timestamp: impl Into<String>,
        collections: Vec<String>,
        objects: &[FetchedObject],
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            collections,
            objects: objects
                .iter()
                .map(|obj| ManifestObject {
                    path: obj.path.clone(),
                    metadata: obj.metadata.clone(),
                })
                .collect(),
        }
    }
}
