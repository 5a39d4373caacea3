//! External system integrations for stowage.
//!
//! This module provides adapters for the collaborators the orchestration
//! engine depends on:
//!
//! - [`store`] - collaborator traits (document store, blob store)
//! - [`rest`] - REST-backed implementation of the store traits
//! - [`archive`] - archive output renderers (zip container, directory tree)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies
//! and enable testing with mock implementations. The core only ever sees the
//! traits; transports and container formats are swappable behind them.

pub mod archive;
pub mod rest;
pub mod store;
