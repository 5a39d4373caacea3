//! Zip archive renderer
//!
//! Writes archive entries into a single zip container. The backup folder
//! name becomes the top-level directory inside the zip, so extracting the
//! archive reproduces the same tree the directory renderer would create.

use crate::adapters::archive::traits::ArchiveWriter;
use crate::domain::ArchiveError;
use serde_json::Value;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// Archive writer backed by a zip container
pub struct ZipArchiveWriter<W: Write + Seek> {
    inner: Option<ZipWriter<W>>,
    root: String,
    options: FileOptions,
}

impl<W: Write + Seek> ZipArchiveWriter<W> {
    /// Create a writer over an arbitrary seekable sink
    ///
    /// `root` is the top-level folder prefix inside the container; pass an
    /// empty string to write entries at the container root.
    pub fn new(writer: W, root: impl Into<String>) -> Self {
        Self {
            inner: Some(ZipWriter::new(writer)),
            root: root.into(),
            options: FileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }

    fn entry_name(&self, entry_path: &str) -> String {
        // Entry paths come from the remote store; traversal segments would
        // escape the archive root on extraction.
        let clean = entry_path
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
            .collect::<Vec<_>>()
            .join("/");
        if self.root.is_empty() {
            clean
        } else {
            format!("{}/{}", self.root, clean)
        }
    }

    fn writer(&mut self) -> Result<&mut ZipWriter<W>, ArchiveError> {
        self.inner
            .as_mut()
            .ok_or_else(|| ArchiveError::Finalize("archive already finalized".to_string()))
    }

    fn write_entry(&mut self, entry_path: &str, bytes: &[u8]) -> Result<(), ArchiveError> {
        let name = self.entry_name(entry_path);
        let options = self.options;
        let writer = self.writer()?;

        writer
            .start_file(name, options)
            .map_err(|e| ArchiveError::Entry {
                path: entry_path.to_string(),
                message: e.to_string(),
            })?;
        writer.write_all(bytes).map_err(|e| ArchiveError::Entry {
            path: entry_path.to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }
}

impl ZipArchiveWriter<File> {
    /// Create a zip archive at the given filesystem path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path, root: impl Into<String>) -> Result<Self, ArchiveError> {
        let file = File::create(path).map_err(|e| {
            ArchiveError::Io(format!("failed to create {}: {}", path.display(), e))
        })?;
        Ok(Self::new(file, root))
    }
}

impl<W: Write + Seek + Send> ArchiveWriter for ZipArchiveWriter<W> {
    fn write_document(&mut self, entry_path: &str, document: &Value) -> Result<(), ArchiveError> {
        let bytes = serde_json::to_vec_pretty(document).map_err(|e| ArchiveError::Entry {
            path: entry_path.to_string(),
            message: e.to_string(),
        })?;
        self.write_entry(entry_path, &bytes)
    }

    fn write_bytes(&mut self, entry_path: &str, bytes: &[u8]) -> Result<(), ArchiveError> {
        self.write_entry(entry_path, bytes)
    }

    fn finish(&mut self) -> Result<(), ArchiveError> {
        let mut writer = self
            .inner
            .take()
            .ok_or_else(|| ArchiveError::Finalize("archive already finalized".to_string()))?;
        writer
            .finish()
            .map_err(|e| ArchiveError::Finalize(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    #[test]
    fn test_writes_nested_entries_and_reopens() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = ZipArchiveWriter::new(&mut buffer, "backup_test");
            writer
                .write_document("backup_manifest.json", &json!({"ok": true}))
                .unwrap();
            writer.write_bytes("storage/x/1.bin", &[1, 2, 3]).unwrap();
            writer.finish().unwrap();
        }

        buffer.set_position(0);
        let mut archive = ZipArchive::new(buffer).unwrap();
        assert_eq!(archive.len(), 2);

        let mut entry = archive
            .by_name("backup_test/storage/x/1.bin")
            .expect("nested entry should exist under the root folder");
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_document_entry_is_pretty_json() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = ZipArchiveWriter::new(&mut buffer, "");
            writer
                .write_document("collections/blogs.json", &json!([{"id": "a"}]))
                .unwrap();
            writer.finish().unwrap();
        }

        buffer.set_position(0);
        let mut archive = ZipArchive::new(buffer).unwrap();
        let mut entry = archive.by_name("collections/blogs.json").unwrap();
        let mut contents = String::new();
        entry.read_to_string(&mut contents).unwrap();

        let parsed: Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed[0]["id"], "a");
        assert!(contents.contains('\n'), "documents are pretty-printed");
    }

    #[test]
    fn test_write_after_finish_fails() {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = ZipArchiveWriter::new(&mut buffer, "");
        writer.finish().unwrap();

        let result = writer.write_bytes("late.bin", &[0]);
        assert!(matches!(result, Err(ArchiveError::Finalize(_))));
    }

    #[test]
    fn test_double_finish_fails() {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = ZipArchiveWriter::new(&mut buffer, "");
        writer.finish().unwrap();
        assert!(writer.finish().is_err());
    }

    #[test]
    fn test_path_traversal_segments_are_dropped() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = ZipArchiveWriter::new(&mut buffer, "root");
            writer.write_bytes("../escape.bin", &[1]).unwrap();
            writer.write_bytes("storage/../../evil.bin", &[2]).unwrap();
            writer.finish().unwrap();
        }

        buffer.set_position(0);
        let mut archive = ZipArchive::new(buffer).unwrap();
        assert!(archive.by_name("root/escape.bin").is_ok());
        assert!(archive.by_name("root/storage/evil.bin").is_ok());
    }

    #[test]
    fn test_leading_slash_is_trimmed() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = ZipArchiveWriter::new(&mut buffer, "root");
            writer.write_bytes("/abs/path.bin", &[9]).unwrap();
            writer.finish().unwrap();
        }

        buffer.set_position(0);
        let mut archive = ZipArchive::new(buffer).unwrap();
        assert!(archive.by_name("root/abs/path.bin").is_ok());
    }
}
