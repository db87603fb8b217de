//! Defaults and fixed limits for prime generation.

/// Default number of primes to produce.
pub const DEFAULT_MAX_PRIMES: u64 = 1_000_000;

/// Default capacity of the output buffer and candidate queue.
pub const DEFAULT_BUFFER_SIZE: usize = 10_000;

/// Default first candidate.
pub const DEFAULT_START: u64 = 5;

/// Smallest start value the generator accepts.
pub const MIN_START: u64 = 5;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "found_primes.txt";

/// Suffix appended to the output path for the presorted intermediate file.
pub const PRESORTED_SUFFIX: &str = ".presorted";

/// Default number of lines written between flushes in the final sort pass.
pub const DEFAULT_SORT_CHUNK: usize = 10_000;

/// Primes injected ahead of the pipeline when the start value is at most 5.
pub const SEED_PRIMES: [u64; 2] = [2, 3];

/// Number of trial divisors tested between cancellation checks.
pub const CANCEL_CHECK_INTERVAL: u64 = 1 << 16;

/// Miller-Rabin witnesses: the first 13 primes.
pub const MILLER_RABIN_WITNESSES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Exclusive upper bound below which [`MILLER_RABIN_WITNESSES`] give an
/// exact answer (Sorenson and Webster, 2015).
pub const MILLER_RABIN_DETERMINISTIC_LIMIT: u128 = 3_317_044_064_679_887_385_961_981;

/// Minimum number of primes between two progress notifications.
pub const PROGRESS_REPORT_INTERVAL: u64 = 1_000;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution, including every cancellation path.
    pub const SUCCESS: i32 = 0;
    /// I/O, parse, or pipeline failure.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
}
