//! Backup run orchestration
//!
//! [`BackupCoordinator`] is the entry point for a run; [`BackupSummary`]
//! is what it reports back.

pub mod coordinator;
pub mod summary;

pub use coordinator::{BackupCoordinator, BackupOptions};
pub use summary::{BackupErrorDetail, BackupSummary};
