//! Directory tree renderer
//!
//! Materializes the archive as a plain folder tree on disk instead of a zip
//! container. Useful when the backup destination is a synced or deduplicated
//! filesystem where a flat file set beats a single large container.

use crate::adapters::archive::traits::ArchiveWriter;
use crate::domain::ArchiveError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Archive writer that renders entries as files under a root directory
pub struct DirectoryArchiveWriter {
    root: PathBuf,
    finished: bool,
}

impl DirectoryArchiveWriter {
    /// Create the root directory and a writer over it
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be created.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, ArchiveError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            ArchiveError::Io(format!("failed to create {}: {}", root.display(), e))
        })?;
        Ok(Self {
            root,
            finished: false,
        })
    }

    /// Root directory the entries are written under
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn write_file(&mut self, entry_path: &str, bytes: &[u8]) -> Result<(), ArchiveError> {
        if self.finished {
            return Err(ArchiveError::Finalize(
                "archive already finalized".to_string(),
            ));
        }

        let relative: PathBuf = entry_path
            .trim_start_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
            .collect();
        let target = self.root.join(relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| ArchiveError::Entry {
                path: entry_path.to_string(),
                message: e.to_string(),
            })?;
        }
        fs::write(&target, bytes).map_err(|e| ArchiveError::Entry {
            path: entry_path.to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }
}

impl ArchiveWriter for DirectoryArchiveWriter {
    fn write_document(&mut self, entry_path: &str, document: &Value) -> Result<(), ArchiveError> {
        let bytes = serde_json::to_vec_pretty(document).map_err(|e| ArchiveError::Entry {
            path: entry_path.to_string(),
            message: e.to_string(),
        })?;
        self.write_file(entry_path, &bytes)
    }

    fn write_bytes(&mut self, entry_path: &str, bytes: &[u8]) -> Result<(), ArchiveError> {
        self.write_file(entry_path, bytes)
    }

    fn finish(&mut self) -> Result<(), ArchiveError> {
        if self.finished {
            return Err(ArchiveError::Finalize(
                "archive already finalized".to_string(),
            ));
        }
        self.finished = true;
        Ok(())
    }
}
