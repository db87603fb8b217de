//! # primegen-core
//!
//! Core library for the primegen prime number generator: the candidate
//! generator, primality workers, output sink, and final sort pass, tied
//! together by a leveled cancellation token.

pub mod constants;
pub mod error;
pub mod final_sort;
pub mod generator;
pub mod observer;
pub mod options;
pub mod primality;
pub mod progress;
pub mod queue;
pub mod sink;
pub mod sort;
pub mod worker;

// Re-exports
pub use constants::{exit_codes, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_PRIMES, PRESORTED_SUFFIX};
pub use error::PrimeError;
pub use final_sort::FinalSortPass;
pub use generator::{CandidateGenerator, GeneratorReport, GeneratorStatus};
pub use observer::{NoOpObserver, ProgressObserver};
pub use options::Options;
pub use primality::{PrimalityTest, PrimalityTester};
pub use progress::{CancelReason, CancellationToken, ProgressUpdate};
pub use sink::{OutputSink, SinkReport};
pub use worker::{PrimalityWorker, WorkerReport};

use num_bigint::BigUint;

/// Check whether `n` is prime by trial division.
///
/// Convenience wrapper for callers outside the pipeline; 2 and 3 are
/// handled here even though the pipeline's filters reject them.
///
/// # Example
/// ```
/// use num_bigint::BigUint;
///
/// assert!(primegen_core::is_prime(&BigUint::from(71u32)));
/// assert!(primegen_core::is_prime(&BigUint::from(2u32)));
/// assert!(!primegen_core::is_prime(&BigUint::from(35u32)));
/// ```
#[must_use]
pub fn is_prime(n: &BigUint) -> bool {
    if *n == BigUint::from(2u32) || *n == BigUint::from(3u32) {
        return true;
    }
    if *n < BigUint::from(5u32) {
        return false;
    }
    // A fresh token is never cancelled, so the test always completes.
    PrimalityTester::deterministic()
        .is_prime(n, &CancellationToken::new())
        .unwrap_or(false)
}
