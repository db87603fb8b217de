//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::Parser;
use num_bigint::BigUint;

use primegen_core::constants::{DEFAULT_BUFFER_SIZE, DEFAULT_SORT_CHUNK};
use primegen_core::options::Options;
use primegen_core::primality::deterministic_limit;

/// primegen — concurrent prime number generator.
#[derive(Parser, Debug)]
#[command(name = "primegen", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Number of primes to find before stopping.
    #[arg(long, default_value = "1000000", env = "PRIMEGEN_MAX_PRIMES")]
    pub max_num_primes: BigUint,

    /// First candidate to test (odd, at least 5).
    #[arg(long, default_value = "5", env = "PRIMEGEN_START")]
    pub start_from: BigUint,

    /// Output buffer and candidate queue capacity.
    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
    pub max_buffer: usize,

    /// Output file path.
    #[arg(short, long, default_value = "found_primes.txt", env = "PRIMEGEN_OUTPUT")]
    pub output: PathBuf,

    /// Number of worker threads (0 = available parallelism).
    #[arg(short = 't', long, default_value_t = 0)]
    pub max_threads: usize,

    /// Use Miller-Rabin below the fast ceiling.
    #[arg(long)]
    pub fast: bool,

    /// Exclusive upper bound for the Miller-Rabin path.
    #[arg(long)]
    pub fast_ceiling: Option<BigUint>,

    /// Sort the whole output file exactly once the run ends.
    #[arg(long)]
    pub final_sort: bool,

    /// Lines written between flushes during the final sort.
    #[arg(long, default_value_t = DEFAULT_SORT_CHUNK)]
    pub sort_chunk: usize,

    /// Largest candidate to test.
    #[arg(long)]
    pub max_candidate: Option<BigUint>,

    /// Quiet mode (only output the count).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Build run options from the parsed flags.
    #[must_use]
    pub fn to_options(&self) -> Options {
        Options {
            max_primes: self.max_num_primes.clone(),
            start: self.start_from.clone(),
            buffer_size: self.max_buffer,
            output: self.output.clone(),
            workers: self.max_threads,
            probabilistic: self.fast,
            probabilistic_ceiling: self
                .fast_ceiling
                .clone()
                .unwrap_or_else(deterministic_limit),
            final_sort: self.final_sort,
            final_sort_chunk: self.sort_chunk,
            max_candidate: self.max_candidate.clone(),
        }
    }
}
