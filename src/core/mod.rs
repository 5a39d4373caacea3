//! Core backup engine
//!
//! The engine is split into stages, each independently testable against the
//! adapter traits:
//!
//! - [`progress`]: run progress counters and observer notifications
//! - [`collect`]: document collection capture
//! - [`enumerate`]: recursive blob store enumeration
//! - [`fetch`]: bounded-retry object fetching
//! - [`assemble`]: archive layout and entry writing
//! - [`backup`]: the coordinator tying the stages into one run
//!
//! All stages contain item-level failures: a collection, subtree or object
//! that cannot be captured is logged, recorded in the run summary and
//! skipped. Only failures that would corrupt the archive itself abort a run.

pub mod assemble;
pub mod backup;
pub mod collect;
pub mod enumerate;
pub mod fetch;
pub mod progress;

pub use backup::{BackupCoordinator, BackupOptions, BackupSummary};
pub use fetch::RetryConfig;
pub use progress::{NullObserver, ProgressObserver, ProgressTracker};
