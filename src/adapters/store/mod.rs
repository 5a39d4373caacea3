//! Store collaborator traits
//!
//! Trait-based abstraction over the structured document store and the
//! hierarchical blob store, so backends are swappable and the core is
//! testable with mock implementations.

pub mod traits;

pub use traits::{BlobStore, DocumentStore};
