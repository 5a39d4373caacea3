//! Run progress accounting
//!
//! The tracker keeps a monotonic (discovered, processed) counter pair and
//! derives a 0-100 percentage from it. Every mutation synchronously notifies
//! the caller-supplied observer, so a UI can render live progress without
//! polling.

use std::sync::Arc;

/// Receiver for progress notifications
///
/// Invoked synchronously and frequently from every backup stage. The
/// signature is infallible: implementations must not panic, and have no way
/// to abort the run through the callback.
pub trait ProgressObserver: Send + Sync {
    /// Called with a human-readable message and the current percentage
    fn on_progress(&self, message: &str, percentage: u8);
}

/// Observer that discards all notifications
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn on_progress(&self, _message: &str, _percentage: u8) {}
}

/// Monotonic progress counters for one backup run
///
/// `total_items` only ever increases within a run; `processed_items` never
/// exceeds it. The percentage is 0 while nothing has been discovered.
pub struct ProgressTracker {
    total_items: usize,
    processed_items: usize,
    observer: Arc<dyn ProgressObserver>,
}

impl ProgressTracker {
    /// Create a tracker with zeroed counters
    pub fn new(observer: Arc<dyn ProgressObserver>) -> Self {
        Self {
            total_items: 0,
            processed_items: 0,
            observer,
        }
    }

    /// Record `n` newly discovered items and notify the observer
    pub fn record_discovered(&mut self, n: usize) {
        self.total_items += n;
        self.emit(&format!(
            "Discovered {} items ({} total)",
            n, self.total_items
        ));
    }

    /// Record one completed item (success or permanent failure) and notify
    /// the observer
    pub fn record_processed(&mut self) {
        debug_assert!(
            self.processed_items < self.total_items,
            "processed must stay within discovered total"
        );
        self.processed_items += 1;
        self.emit(&format!(
            "Processed {}/{} items",
            self.processed_items, self.total_items
        ));
    }

    /// Push a contextual message at the current percentage, without touching
    /// the counters
    pub fn notify(&self, message: &str) {
        self.observer.on_progress(message, self.percentage());
    }

    /// Report terminal success: always 100%, even for an empty run
    pub fn notify_complete(&self, message: &str) {
        self.observer.on_progress(message, 100);
    }

    /// Report a failed run: always 0%
    pub fn notify_failure(&self, message: &str) {
        self.observer.on_progress(message, 0);
    }

    /// Current percentage in [0, 100]
    pub fn percentage(&self) -> u8 {
        if self.total_items == 0 {
            return 0;
        }
        let pct = (self.processed_items as f64 / self.total_items as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    /// Items discovered so far
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Items completed so far
    pub fn processed_items(&self) -> usize {
        self.processed_items
    }

    fn emit(&self, message: &str) {
        self.observer.on_progress(message, self.percentage());
    }
}
