//! Wire models for the REST store backend
//!
//! These types mirror the backend's JSON responses and are converted into
//! domain types at the adapter boundary; nothing above the adapter sees them.

use crate::domain::{Listing, ObjectHandle, Record};
use serde::Deserialize;
use serde_json::Value;

/// Response of `GET /collections`
#[derive(Debug, Deserialize)]
pub struct CollectionList {
    pub collections: Vec<String>,
}

/// One record as returned by `GET /collections/{name}/records`
#[derive(Debug, Deserialize)]
pub struct RecordDocument {
    pub id: String,
    #[serde(default)]
    pub data: Value,
}

impl From<RecordDocument> for Record {
    fn from(doc: RecordDocument) -> Self {
        Record::new(doc.id, doc.data)
    }
}

/// Response of `GET /collections/{name}/records`
#[derive(Debug, Deserialize)]
pub struct RecordList {
    pub records: Vec<RecordDocument>,
}

/// One leaf object in a storage listing
#[derive(Debug, Deserialize)]
pub struct StorageObject {
    pub path: String,
}

/// Response of `GET /storage/list`
#[derive(Debug, Default, Deserialize)]
pub struct StorageListing {
    #[serde(default)]
    pub objects: Vec<StorageObject>,

    #[serde(default)]
    pub prefixes: Vec<String>,
}

impl From<StorageListing> for Listing {
    fn from(listing: StorageListing) -> Self {
        Listing {
            objects: listing
                .objects
                .into_iter()
                .map(|obj| ObjectHandle::leaf(obj.path))
                .collect(),
            containers: listing.prefixes,
        }
    }
}

/// Response of `GET /storage/locator`: a transient download URL
#[derive(Debug, Deserialize)]
pub struct DownloadLocator {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_document_conversion() {
        let doc: RecordDocument =
            serde_json::from_str(r#"{"id": "doc-1", "data": {"title": "hi"}}"#).unwrap();
        let record: Record = doc.into();
        assert_eq!(record.id, "doc-1");
        assert_eq!(record.payload["title"], "hi");
    }

    #[test]
    fn test_record_document_missing_data_defaults_to_null() {
        let doc: RecordDocument = serde_json::from_str(r#"{"id": "doc-2"}"#).unwrap();
        assert!(doc.data.is_null());
    }

    #[test]
    fn test_storage_listing_conversion() {
        let listing: StorageListing = serde_json::from_str(
            r#"{"objects": [{"path": "x/1.bin"}], "prefixes": ["x/y"]}"#,
        )
        .unwrap();
        let listing: Listing = listing.into();

        assert_eq!(listing.objects.len(), 1);
        assert!(!listing.objects[0].is_container);
        assert_eq!(listing.containers, vec!["x/y".to_string()]);
    }

    #[test]
    fn test_storage_listing_fields_default_to_empty() {
        let listing: StorageListing = serde_json::from_str("{}").unwrap();
        assert!(listing.objects.is_empty());
        assert!(listing.prefixes.is_empty());
    }
}
