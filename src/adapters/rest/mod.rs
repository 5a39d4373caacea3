//! REST backend adapter
//!
//! Default implementation of the store collaborator traits over a plain
//! REST API. One client implements both [`crate::adapters::store::DocumentStore`]
//! and [`crate::adapters::store::BlobStore`].

pub mod client;
pub mod models;

pub use client::RestStoreClient;
