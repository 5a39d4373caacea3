//! Domain models and types for stowage.
//!
//! This module contains the core data model and error taxonomy shared by the
//! orchestration engine and the adapters.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Blob object model** ([`ObjectHandle`], [`Listing`], [`FetchedObject`])
//! - **Structured records** ([`Record`], [`CollectionSnapshot`])
//! - **Archive manifest** ([`Manifest`], [`ManifestObject`])
//! - **Error types** ([`StowageError`], [`StoreError`], [`FetchError`],
//!   [`ArchiveError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All run-fatal operations return [`Result<T, StowageError>`]; per-item
//! store failures use [`StoreError`] and are contained at the stage that
//! produced them:
//!
//! ```rust
//! use stowage::domain::{Result, StowageError};
//!
//! fn example() -> Result<()> {
//!     Err(StowageError::Configuration("missing base_url".to_string()))
//! }
//! ```

pub mod errors;
pub mod manifest;
pub mod object;
pub mod result;
pub mod snapshot;

// Re-export commonly used types for convenience
pub use errors::{ArchiveError, FetchError, StoreError, StowageError};
pub use manifest::{Manifest, ManifestObject};
pub use object::{FetchedObject, Listing, ObjectHandle};
pub use result::Result;
pub use snapshot::{CollectionSnapshot, Record};
