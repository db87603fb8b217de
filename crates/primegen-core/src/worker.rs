//! Primality worker: drains candidates, publishes confirmed primes.

use crossbeam_channel::{Receiver, Sender};
use num_bigint::BigUint;
use tracing::debug;

use crate::error::PrimeError;
use crate::primality::PrimalityTester;
use crate::progress::CancellationToken;
use crate::queue::{recv_or_cancel, send_or_cancel, Wait};

/// Per-worker counters reported when the worker stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub id: usize,
    /// Candidates taken from the queue.
    pub tested: u64,
    /// Primes published to the output queue.
    pub found: u64,
    /// Whether the worker stopped because of cancellation.
    pub cancelled: bool,
}

/// One member of the worker pool.
///
/// Every worker runs the same procedure against the shared candidate
/// queue; the queue hands each candidate to exactly one of them.
#[derive(Debug, Clone)]
pub struct PrimalityWorker {
    id: usize,
    tester: PrimalityTester,
}

impl PrimalityWorker {
    #[must_use]
    pub fn new(id: usize, tester: PrimalityTester) -> Self {
        Self { id, tester }
    }

    /// Run until the candidate queue is closed and drained, or cancelled.
    ///
    /// A prime whose publication loses the race against cancellation is
    /// dropped and the worker stops without draining further.
    pub fn run(
        &self,
        candidates: Receiver<BigUint>,
        primes: Sender<BigUint>,
        cancel: &CancellationToken,
    ) -> Result<WorkerReport, PrimeError> {
        let mut report = WorkerReport {
            id: self.id,
            tested: 0,
            found: 0,
            cancelled: false,
        };

        loop {
            let x = match recv_or_cancel(&candidates, cancel) {
                Wait::Ready(x) => x,
                Wait::Closed => break,
                Wait::Cancelled => {
                    report.cancelled = true;
                    break;
                }
            };
            report.tested += 1;

            match self.tester.is_prime(&x, cancel) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(PrimeError::Cancelled) => {
                    report.cancelled = true;
                    break;
                }
                Err(err) => return Err(err),
            }

            match send_or_cancel(&primes, x, cancel) {
                Wait::Ready(()) => report.found += 1,
                Wait::Closed => break,
                Wait::Cancelled => {
                    report.cancelled = true;
                    break;
                }
            }
        }

        debug!(
            worker = self.id,
            tested = report.tested,
            found = report.found,
            cancelled = report.cancelled,
            "worker finished"
        );
        Ok(report)
    }
}
