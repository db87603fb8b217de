//! Cooperative cancellation and progress update types.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

use crate::error::PrimeError;

/// Why a run was asked to stop early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The process received an interrupt (Ctrl+C).
    Interrupt,
    /// The output sink produced the requested number of primes.
    TargetReached,
}

impl CancelReason {
    fn code(self) -> u8 {
        match self {
            Self::Interrupt => 1,
            Self::TargetReached => 2,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Interrupt),
            2 => Some(Self::TargetReached),
            _ => None,
        }
    }
}

struct Inner {
    state: AtomicU8,
    trigger: Mutex<Option<Sender<()>>>,
    signal: Receiver<()>,
}

/// Leveled, process-wide cancellation token.
///
/// Once cancelled it stays cancelled, and every clone observes the same
/// state. Only the first `cancel` call records its reason. The token can be
/// polled with [`is_cancelled`](Self::is_cancelled) or waited on through
/// [`signal`](Self::signal), which disconnects when the token fires.
///
/// # Example
/// ```
/// use primegen_core::progress::{CancelReason, CancellationToken};
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// assert!(token.cancel(CancelReason::TargetReached));
/// assert!(!token.cancel(CancelReason::Interrupt));
/// assert_eq!(token.reason(), Some(CancelReason::TargetReached));
/// assert!(token.check_cancelled().is_err());
/// ```
#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    /// Create a new, unset token.
    #[must_use]
    pub fn new() -> Self {
        let (trigger, signal) = crossbeam_channel::bounded(0);
        Self {
            inner: Arc::new(Inner {
                state: AtomicU8::new(0),
                trigger: Mutex::new(Some(trigger)),
                signal,
            }),
        }
    }

    /// Check if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.state.load(Ordering::Acquire) != 0
    }

    /// Request cancellation.
    ///
    /// Returns `true` only for the call that actually set the token.
    pub fn cancel(&self, reason: CancelReason) -> bool {
        let raised = self
            .inner
            .state
            .compare_exchange(0, reason.code(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if raised {
            // Dropping the only sender wakes every waiter on `signal`.
            self.inner.trigger.lock().take();
        }
        raised
    }

    /// The reason recorded by the first `cancel` call, if any.
    #[must_use]
    pub fn reason(&self) -> Option<CancelReason> {
        CancelReason::from_code(self.inner.state.load(Ordering::Acquire))
    }

    /// Receiver that becomes ready (disconnected) once the token fires.
    ///
    /// Never yields a message; use it as a `select!` arm next to a queue
    /// operation so cancellation supersedes blocking.
    #[must_use]
    pub fn signal(&self) -> &Receiver<()> {
        &self.inner.signal
    }

    /// Check for cancellation, returning an error if cancelled.
    pub fn check_cancelled(&self) -> Result<(), PrimeError> {
        if self.is_cancelled() {
            Err(PrimeError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationToken")
            .field("reason", &self.reason())
            .finish()
    }
}

/// Progress update sent from the output sink to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Primes accepted by the sink so far.
    pub found: u64,
    /// Target count, saturated to `u64::MAX` when larger.
    pub target: u64,
    /// Whether this is the final update of the run.
    pub done: bool,
}

impl ProgressUpdate {
    /// Create an intermediate progress update.
    #[must_use]
    pub fn new(found: u64, target: u64) -> Self {
        Self {
            found,
            target,
            done: false,
        }
    }

    /// Create a completion update.
    #[must_use]
    pub fn done(found: u64, target: u64) -> Self {
        Self {
            found,
            target,
            done: true,
        }
    }

    /// Progress as a fraction in [0.0, 1.0].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.target == 0 {
            return 1.0;
        }
        (self.found as f64 / self.target as f64).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn cancellation_token() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert_eq!(token.reason(), None);
        assert!(token.cancel(CancelReason::Interrupt));
        assert!(token.is_cancelled());
        assert_eq!(token.reason(), Some(CancelReason::Interrupt));
    }

    #[test]
    fn second_cancel_keeps_first_reason() {
        let token = CancellationToken::new();
        assert!(token.cancel(CancelReason::TargetReached));
        assert!(!token.cancel(CancelReason::Interrupt));
        assert!(!token.cancel(CancelReason::TargetReached));
        assert_eq!(token.reason(), Some(CancelReason::TargetReached));
    }

    #[test]
    fn check_cancelled_ok_then_err() {
        let token = CancellationToken::new();
        assert!(token.check_cancelled().is_ok());
        token.cancel(CancelReason::Interrupt);
        assert!(matches!(token.check_cancelled(), Err(PrimeError::Cancelled)));
    }

    #[test]
    fn cancellation_propagates_through_clone() {
        let token1 = CancellationToken::new();
        let token2 = token1.clone();
        token1.cancel(CancelReason::Interrupt);
        assert!(token2.is_cancelled());
        assert_eq!(token2.reason(), Some(CancelReason::Interrupt));
    }

    #[test]
    fn signal_blocks_until_cancelled() {
        let token = CancellationToken::new();
        assert!(token
            .signal()
            .recv_timeout(Duration::from_millis(10))
            .is_err_and(|e| e.is_timeout()));
        token.cancel(CancelReason::Interrupt);
        assert!(token
            .signal()
            .recv_timeout(Duration::from_secs(1))
            .is_err_and(|e| e.is_disconnected()));
    }

    #[test]
    fn signal_wakes_waiting_thread() {
        let token = CancellationToken::new();
        let waiter = token.clone();
        let handle = std::thread::spawn(move || waiter.signal().recv().is_err());
        std::thread::sleep(Duration::from_millis(20));
        token.cancel(CancelReason::TargetReached);
        assert!(handle.join().unwrap());
    }

    #[test]
    fn progress_fraction() {
        assert!((ProgressUpdate::new(5, 10).fraction() - 0.5).abs() < f64::EPSILON);
        assert!((ProgressUpdate::done(10, 10).fraction() - 1.0).abs() < f64::EPSILON);
        assert!((ProgressUpdate::new(3, 0).fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_done_flag() {
        assert!(!ProgressUpdate::new(1, 2).done);
        assert!(ProgressUpdate::done(2, 2).done);
    }
}
