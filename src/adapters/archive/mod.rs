//! Archive output renderers
//!
//! The assembler is agnostic to the archive container; it writes through the
//! [`ArchiveWriter`] trait. Two renderers are provided:
//!
//! - [`ZipArchiveWriter`] - a single zip container
//! - [`DirectoryArchiveWriter`] - a plain folder tree on disk

pub mod dir;
pub mod traits;
pub mod zip;

pub use dir::DirectoryArchiveWriter;
pub use traits::ArchiveWriter;
pub use zip::ZipArchiveWriter;
