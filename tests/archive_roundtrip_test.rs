//! Archive layout tests: assemble into real containers and read them back

use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use stowage::adapters::archive::{ArchiveWriter, DirectoryArchiveWriter, ZipArchiveWriter};
use stowage::core::assemble::assemble;
use stowage::domain::{CollectionSnapshot, FetchedObject, Manifest, Record};

fn fetched(path: &str, bytes: &[u8]) -> FetchedObject {
    let mut metadata = Map::new();
    metadata.insert("size_bytes".to_string(), Value::from(bytes.len() as u64));
    FetchedObject {
        path: path.to_string(),
        content_type: "application/octet-stream".to_string(),
        size_bytes: bytes.len() as u64,
        bytes: bytes.to_vec(),
        metadata,
    }
}

fn sample_run() -> (BTreeMap<String, CollectionSnapshot>, Vec<FetchedObject>, Manifest) {
    let mut collections = BTreeMap::new();
    collections.insert(
        "blogs".to_string(),
        CollectionSnapshot::new(
            "blogs",
            vec![
                Record::new("b-1", json!({"title": "first"})),
                Record::new("b-2", json!({"title": "second"})),
            ],
        ),
    );
    collections.insert(
        "contacts".to_string(),
        CollectionSnapshot::empty("contacts"),
    );

    let objects = vec![
        fetched("x/1.bin", b"one"),
        fetched("x/y/2.bin", b"two"),
        fetched("top.txt", b"root level"),
    ];

    let manifest = Manifest::new(
        "2025-06-30T12:00:00+00:00",
        collections.keys().cloned().collect(),
        &objects,
    );

    (collections, objects, manifest)
}

#[test]
fn test_zip_archive_round_trip() {
    let (collections, objects, manifest) = sample_run();

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = ZipArchiveWriter::new(&mut buffer, "backup_30_Jun_1751284800000");
        let report = assemble(&mut writer, &collections, &objects, &manifest).unwrap();
        writer.finish().unwrap();

        assert_eq!(report.collections_written, 2);
        assert_eq!(report.objects_written, 3);
        assert_eq!(report.entries_skipped, 0);
    }

    buffer.set_position(0);
    let mut archive = zip::ZipArchive::new(buffer).unwrap();

    // One entry per collection, per object, plus the manifest
    assert_eq!(archive.len(), collections.len() + objects.len() + 1);

    let mut manifest_json = String::new();
    archive
        .by_name("backup_30_Jun_1751284800000/backup_manifest.json")
        .expect("manifest entry exists under the root folder")
        .read_to_string(&mut manifest_json)
        .unwrap();

    let parsed: Value = serde_json::from_str(&manifest_json).unwrap();
    assert_eq!(parsed["timestamp"], "2025-06-30T12:00:00+00:00");
    assert_eq!(parsed["collections"], json!(["blogs", "contacts"]));
    let manifest_objects = parsed["objects"].as_array().unwrap();
    assert_eq!(manifest_objects.len(), objects.len());
    assert_eq!(manifest_objects[0]["path"], "x/1.bin");
    assert_eq!(manifest_objects[2]["path"], "top.txt");

    let mut payload = Vec::new();
    archive
        .by_name("backup_30_Jun_1751284800000/storage/x/y/2.bin")
        .unwrap()
        .read_to_end(&mut payload)
        .unwrap();
    assert_eq!(payload, b"two");

    let mut snapshot_json = String::new();
    archive
        .by_name("backup_30_Jun_1751284800000/collections/blogs.json")
        .unwrap()
        .read_to_string(&mut snapshot_json)
        .unwrap();
    let snapshot: CollectionSnapshot = serde_json::from_str(&snapshot_json).unwrap();
    assert_eq!(snapshot.records.len(), 2);
    assert_eq!(snapshot.records[0].id, "b-1");
}

#[test]
fn test_directory_archive_matches_zip_layout() {
    let (collections, objects, manifest) = sample_run();

    let temp = tempfile::TempDir::new().unwrap();
    let root = temp.path().join("backup_30_Jun_1751284800000");
    let mut writer = DirectoryArchiveWriter::create(&root).unwrap();
    assemble(&mut writer, &collections, &objects, &manifest).unwrap();
    writer.finish().unwrap();

    assert!(root.join("backup_manifest.json").is_file());
    assert!(root.join("collections/blogs.json").is_file());
    assert!(root.join("collections/contacts.json").is_file());
    assert!(root.join("storage/x/1.bin").is_file());
    assert!(root.join("storage/x/y/2.bin").is_file());
    assert!(root.join("storage/top.txt").is_file());

    assert_eq!(std::fs::read(root.join("storage/top.txt")).unwrap(), b"root level");

    let manifest_json = std::fs::read_to_string(root.join("backup_manifest.json")).unwrap();
    let parsed: Manifest = serde_json::from_str(&manifest_json).unwrap();
    assert_eq!(parsed, manifest);
}

#[test]
fn test_empty_run_archive_contains_only_manifest() {
    let manifest = Manifest::new("2025-06-30T12:00:00+00:00", Vec::new(), &[]);

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = ZipArchiveWriter::new(&mut buffer, "backup_empty");
        assemble(&mut writer, &BTreeMap::new(), &[], &manifest).unwrap();
        writer.finish().unwrap();
    }

    buffer.set_position(0);
    let archive = zip::ZipArchive::new(buffer).unwrap();
    assert_eq!(archive.len(), 1);
}
