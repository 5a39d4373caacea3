//! Structured-source record model
//!
//! Records pulled from the document store are captured as opaque JSON
//! payloads. No collection schema is assumed.

use serde::{Deserialize, Serialize};

/// One record from a collection: an identifier plus an opaque payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record identifier within its collection
    pub id: String,

    /// Arbitrary structured document, treated as opaque by the core
    pub payload: serde_json::Value,
}

impl Record {
    /// Create a new record
    pub fn new(id: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }
}

/// Every record captured from one collection
///
/// An empty `records` list can mean either an empty collection or a
/// collection that errored on open; the run summary tracks which collections
/// failed. A missing collection is a recorded gap, never a fatal error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    /// Collection name
    pub name: String,

    /// Records in store iteration order
    pub records: Vec<Record>,
}

impl CollectionSnapshot {
    /// Create a snapshot with records
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Create an empty snapshot, used to record a gap for an unavailable
    /// collection
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}
