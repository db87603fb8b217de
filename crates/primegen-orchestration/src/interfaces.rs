//! Orchestration interfaces.

use std::path::PathBuf;
use std::time::Duration;

use primegen_core::generator::GeneratorStatus;
use primegen_core::progress::CancelReason;
use primegen_core::worker::WorkerReport;

/// How a completed run ended. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// An external interrupt stopped the run.
    Interrupted,
    /// The sink produced the requested number of primes.
    TargetReached,
    /// The generator hit the configured candidate ceiling.
    RangeExhausted,
}

impl Termination {
    /// Classify a run from the token's reason and the generator's status.
    #[must_use]
    pub fn classify(reason: Option<CancelReason>, generator: GeneratorStatus) -> Self {
        match (reason, generator) {
            (Some(CancelReason::Interrupt), _) => Self::Interrupted,
            (Some(CancelReason::TargetReached), _) => Self::TargetReached,
            (None, GeneratorStatus::Exhausted) => Self::RangeExhausted,
            // Workers or sink went away without a reason on the token.
            (None, _) => Self::Interrupted,
        }
    }

    /// User-facing completion message.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Interrupted => "Cancelled by external signal.",
            Self::TargetReached => "Found max num primes.",
            Self::RangeExhausted => "Reached maximum candidate search size.",
        }
    }
}

/// Summary of a finished pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub termination: Termination,
    /// Primes written, seeds included.
    pub total: u64,
    /// Candidates the generator delivered.
    pub generated: u64,
    pub workers: Vec<WorkerReport>,
    /// Sort-and-write windows performed by the sink.
    pub flushes: u64,
    /// Lines written by the final sort pass, when it ran.
    pub final_sorted: Option<u64>,
    /// File holding the result.
    pub output: PathBuf,
    pub duration: Duration,
}

impl RunReport {
    /// Candidates tested across all workers.
    #[must_use]
    pub fn tested(&self) -> u64 {
        self.workers.iter().map(|w| w.tested).sum()
    }

    /// Whether the output file is in exact ascending order.
    #[must_use]
    pub fn is_exactly_sorted(&self) -> bool {
        self.final_sorted.is_some()
    }
}

/// Trait for presenting run results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present a finished run.
    fn present_report(&self, report: &RunReport);

    /// Present a fatal error.
    fn present_error(&self, error: &str);
}
