//! Archive assembly
//!
//! Lays out a completed run inside the archive container:
//!
//! ```text
//! backup_manifest.json
//! collections/<name>.json
//! storage/<original path>
//! ```
//!
//! The manifest entry is written first and is the only fatal entry. A
//! collection or object entry that fails to write is logged and skipped.

use crate::adapters::archive::ArchiveWriter;
use crate::domain::errors::ArchiveError;
use crate::domain::{CollectionSnapshot, FetchedObject, Manifest};
use std::collections::BTreeMap;

pub const MANIFEST_ENTRY: &str = "backup_manifest.json";
pub const COLLECTIONS_PREFIX: &str = "collections";
pub const STORAGE_PREFIX: &str = "storage";

/// Entry counts for one assembly pass
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    /// Collection entries written
    pub collections_written: usize,

    /// Object entries written
    pub objects_written: usize,

    /// Entries that failed to write and were skipped
    pub entries_skipped: usize,
}

/// Write the manifest, collection snapshots and object payloads
///
/// # Errors
///
/// Fails only when the manifest itself cannot be serialized or written.
/// Individual entry failures are contained and counted in the report.
pub fn assemble(
    writer: &mut dyn ArchiveWriter,
    collections: &BTreeMap<String, CollectionSnapshot>,
    objects: &[FetchedObject],
    manifest: &Manifest,
) -> Result<AssemblyReport, ArchiveError> {
    let mut report = AssemblyReport::default();

    let manifest_doc = serde_json::to_value(manifest)
        .map_err(|e| ArchiveError::ManifestWrite(e.to_string()))?;
    writer
        .write_document(MANIFEST_ENTRY, &manifest_doc)
        .map_err(|e| ArchiveError::ManifestWrite(e.to_string()))?;

    for (name, snapshot) in collections {
        let entry_path = format!("{}/{}.json", COLLECTIONS_PREFIX, name);
        let doc = match serde_json::to_value(snapshot) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::error!(collection = %name, error = %e, "Skipping unserializable snapshot");
                report.entries_skipped += 1;
                continue;
            }
        };
        match writer.write_document(&entry_path, &doc) {
            Ok(()) => report.collections_written += 1,
            Err(e) => {
                tracing::error!(entry = %entry_path, error = %e, "Skipping failed collection entry");
                report.entries_skipped += 1;
            }
        }
    }

    for object in objects {
        let entry_path = format!("{}/{}", STORAGE_PREFIX, object.path.trim_start_matches('/'));
        match writer.write_bytes(&entry_path, &object.bytes) {
            Ok(()) => report.objects_written += 1,
            Err(e) => {
                tracing::error!(entry = %entry_path, error = %e, "Skipping failed object entry");
                report.entries_skipped += 1;
            }
        }
    }

    Ok(report)
}
