//! Candidate generation: the odd numbers fed to the worker pool.

use crossbeam_channel::Sender;
use num_bigint::BigUint;
use tracing::info;

use crate::progress::CancellationToken;
use crate::queue::{send_or_cancel, Wait};

/// Why the generator stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorStatus {
    /// Cancellation was observed.
    Cancelled,
    /// The next candidate would exceed the configured ceiling.
    Exhausted,
    /// Every worker dropped its end of the candidate queue.
    Disconnected,
}

/// Terminal report of a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorReport {
    pub status: GeneratorStatus,
    /// Candidates delivered into the queue.
    pub emitted: u64,
}

/// Produces `start, start + 2, start + 4, ...` onto a bounded queue.
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    next: BigUint,
    ceiling: Option<BigUint>,
}

impl CandidateGenerator {
    /// Create a generator starting at `start` (odd, at least 5).
    #[must_use]
    pub fn new(start: BigUint) -> Self {
        Self {
            next: start,
            ceiling: None,
        }
    }

    /// Stop once the next candidate would be larger than `ceiling`.
    #[must_use]
    pub fn with_ceiling(mut self, ceiling: BigUint) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    /// Emit candidates until cancelled, exhausted, or disconnected.
    ///
    /// Takes the queue's sender by value; it is dropped on return, which
    /// closes the queue for every worker.
    pub fn run(mut self, tx: Sender<BigUint>, cancel: &CancellationToken) -> GeneratorReport {
        let mut emitted = 0u64;
        let status = loop {
            if self.ceiling.as_ref().is_some_and(|c| self.next > *c) {
                info!(next = %self.next, "reached maximum candidate search size");
                break GeneratorStatus::Exhausted;
            }
            match send_or_cancel(&tx, self.next.clone(), cancel) {
                Wait::Ready(()) => {
                    emitted += 1;
                    self.next += 2u32;
                }
                Wait::Cancelled => break GeneratorStatus::Cancelled,
                Wait::Closed => break GeneratorStatus::Disconnected,
            }
        };
        info!(?status, emitted, "candidate generation halted");
        GeneratorReport { status, emitted }
    }
}
