//! Archive output trait
//!
//! The assembler writes entries through this trait and is agnostic to the
//! concrete container: a zip file, a directory tree, or an in-memory buffer
//! in tests.

use crate::domain::ArchiveError;
use serde_json::Value;

/// Destination for archive entries
///
/// Entry paths are slash-delimited and relative to the archive root;
/// intermediate segments become nested folders in the container.
pub trait ArchiveWriter: Send {
    /// Write a JSON document entry, pretty-printed
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    fn write_document(&mut self, entry_path: &str, document: &Value) -> Result<(), ArchiveError>;

    /// Write a binary entry
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    fn write_bytes(&mut self, entry_path: &str, bytes: &[u8]) -> Result<(), ArchiveError>;

    /// Materialize the archive
    ///
    /// Must be called exactly once, after all entries are written. Writes
    /// after `finish` fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be finalized.
    fn finish(&mut self) -> Result<(), ArchiveError>;
}
