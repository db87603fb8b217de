//! Observer pattern for sink progress.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::constants::PROGRESS_REPORT_INTERVAL;
use crate::progress::ProgressUpdate;

/// Observer trait for receiving progress updates from the output sink.
///
/// Called on the sink thread for every accepted prime, so implementations
/// must be cheap or throttle themselves.
pub trait ProgressObserver: Send + Sync {
    /// Receive a progress update.
    fn on_progress(&self, update: &ProgressUpdate);
}

/// Observer that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpObserver;

impl NoOpObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProgressObserver for NoOpObserver {
    fn on_progress(&self, _update: &ProgressUpdate) {}
}

/// Observer that logs progress every `interval` primes.
pub struct LoggingObserver {
    interval: u64,
    last_reported: AtomicU64,
}

impl LoggingObserver {
    /// Create a logging observer reporting every `interval` primes.
    #[must_use]
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            last_reported: AtomicU64::new(0),
        }
    }

    fn should_report(&self, update: &ProgressUpdate) -> bool {
        let last = self.last_reported.load(Ordering::Relaxed);
        update.done || update.found.saturating_sub(last) >= self.interval
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new(PROGRESS_REPORT_INTERVAL)
    }
}

impl ProgressObserver for LoggingObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        if !self.should_report(update) {
            return;
        }
        self.last_reported.store(update.found, Ordering::Relaxed);
        if update.done {
            info!(found = update.found, "prime output complete");
        } else {
            info!(
                found = update.found,
                target = update.target,
                progress = format!("{:.1}%", update.fraction() * 100.0),
                "primes found"
            );
        }
    }
}
