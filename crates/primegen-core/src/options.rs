//! Run options and their validation.

use std::path::PathBuf;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::constants::{
    DEFAULT_BUFFER_SIZE, DEFAULT_MAX_PRIMES, DEFAULT_OUTPUT, DEFAULT_SORT_CHUNK, DEFAULT_START,
    MILLER_RABIN_DETERMINISTIC_LIMIT, MIN_START, PRESORTED_SUFFIX,
};
use crate::error::PrimeError;
use crate::primality::{deterministic_limit, is_even};

/// Options for a prime generation run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Number of primes to produce before stopping.
    pub max_primes: BigUint,
    /// First candidate; must be odd and at least 5.
    pub start: BigUint,
    /// Capacity of the output buffer and the candidate queue.
    pub buffer_size: usize,
    /// Final output path.
    pub output: PathBuf,
    /// Number of primality workers (0 = host parallelism).
    pub workers: usize,
    /// Use Miller-Rabin below `probabilistic_ceiling`.
    pub probabilistic: bool,
    /// Exclusive bound for the Miller-Rabin path.
    pub probabilistic_ceiling: BigUint,
    /// Run the exact final sort pass after the pipeline.
    pub final_sort: bool,
    /// Lines written between flushes in the final sort pass.
    pub final_sort_chunk: usize,
    /// Largest candidate the generator may emit.
    pub max_candidate: Option<BigUint>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_primes: BigUint::from(DEFAULT_MAX_PRIMES),
            start: BigUint::from(DEFAULT_START),
            buffer_size: DEFAULT_BUFFER_SIZE,
            output: PathBuf::from(DEFAULT_OUTPUT),
            workers: 0,
            probabilistic: false,
            probabilistic_ceiling: deterministic_limit(),
            final_sort: false,
            final_sort_chunk: DEFAULT_SORT_CHUNK,
            max_candidate: None,
        }
    }
}

impl Options {
    /// Normalize options, resolving a zero worker count to host parallelism.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.workers == 0 {
            self.workers = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
        }
        self
    }

    /// Reject invalid combinations before any work starts.
    pub fn validate(&self) -> Result<(), PrimeError> {
        if is_even(&self.start) {
            return Err(PrimeError::Config(format!(
                "start value {} must not be even",
                self.start
            )));
        }
        if self.start < BigUint::from(MIN_START) {
            return Err(PrimeError::Config(format!(
                "start value {} must be at least {MIN_START}",
                self.start
            )));
        }
        if self.max_primes.is_zero() {
            return Err(PrimeError::Config(
                "maximum prime count must be positive".into(),
            ));
        }
        if self.buffer_size == 0 {
            return Err(PrimeError::Config("buffer size must be positive".into()));
        }
        if self.workers == 0 {
            return Err(PrimeError::Config("worker count must be positive".into()));
        }
        if self.final_sort_chunk == 0 {
            return Err(PrimeError::Config("sort chunk size must be positive".into()));
        }
        if self.probabilistic_ceiling > deterministic_limit() {
            return Err(PrimeError::Config(format!(
                "probabilistic ceiling must not exceed {MILLER_RABIN_DETERMINISTIC_LIMIT}"
            )));
        }
        if let Some(max) = &self.max_candidate {
            if *max < self.start {
                return Err(PrimeError::Config(format!(
                    "maximum candidate {max} is below start value {}",
                    self.start
                )));
            }
        }
        Ok(())
    }

    /// Whether 2 and 3 must be injected ahead of the generator.
    #[must_use]
    pub fn needs_seed_primes(&self) -> bool {
        self.start <= BigUint::from(MIN_START)
    }

    /// Path of the intermediate file written when the final sort runs.
    #[must_use]
    pub fn presorted_path(&self) -> PathBuf {
        let mut name = self.output.clone().into_os_string();
        name.push(PRESORTED_SUFFIX);
        PathBuf::from(name)
    }

    /// Path the output sink writes to.
    #[must_use]
    pub fn sink_path(&self) -> PathBuf {
        if self.final_sort {
            self.presorted_path()
        } else {
            self.output.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Options {
        Options {
            workers: 2,
            ..Default::default()
        }
    }

    #[test]
    fn default_options() {
        let opts = Options::default();
        assert_eq!(opts.max_primes, BigUint::from(DEFAULT_MAX_PRIMES));
        assert_eq!(opts.start, BigUint::from(5u32));
        assert_eq!(opts.buffer_size, DEFAULT_BUFFER_SIZE);
        assert_eq!(opts.output, PathBuf::from("found_primes.txt"));
        assert!(!opts.probabilistic);
        assert!(!opts.final_sort);
    }

    #[test]
    fn normalize_zero_workers() {
        let opts = Options::default().normalize();
        assert!(opts.workers >= 1);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn normalize_keeps_explicit_workers() {
        let opts = Options {
            workers: 3,
            ..Default::default()
        }
        .normalize();
        assert_eq!(opts.workers, 3);
    }

    #[test]
    fn even_start_rejected() {
        let opts = Options {
            start: BigUint::from(10u32),
            ..valid()
        };
        assert!(matches!(opts.validate(), Err(PrimeError::Config(m)) if m.contains("even")));
    }

    #[test]
    fn small_start_rejected() {
        for start in [1u32, 3] {
            let opts = Options {
                start: BigUint::from(start),
                ..valid()
            };
            assert!(matches!(opts.validate(), Err(PrimeError::Config(_))));
        }
    }

    #[test]
    fn non_positive_counts_rejected() {
        let cases = [
            Options {
                max_primes: BigUint::zero(),
                ..valid()
            },
            Options {
                buffer_size: 0,
                ..valid()
            },
            Options {
                workers: 0,
                ..valid()
            },
            Options {
                final_sort_chunk: 0,
                ..valid()
            },
        ];
        for opts in cases {
            assert!(matches!(opts.validate(), Err(PrimeError::Config(_))));
        }
    }

    #[test]
    fn ceiling_above_deterministic_limit_rejected() {
        let opts = Options {
            probabilistic_ceiling: deterministic_limit() + 1u32,
            ..valid()
        };
        assert!(matches!(opts.validate(), Err(PrimeError::Config(_))));
    }

    #[test]
    fn max_candidate_below_start_rejected() {
        let opts = Options {
            start: BigUint::from(101u32),
            max_candidate: Some(BigUint::from(99u32)),
            ..valid()
        };
        assert!(matches!(opts.validate(), Err(PrimeError::Config(_))));
    }

    #[test]
    fn seed_primes_only_from_five() {
        assert!(valid().needs_seed_primes());
        let opts = Options {
            start: BigUint::from(7u32),
            ..valid()
        };
        assert!(!opts.needs_seed_primes());
    }

    #[test]
    fn presorted_path_appends_suffix() {
        let opts = Options {
            output: PathBuf::from("out/primes.txt"),
            final_sort: true,
            ..valid()
        };
        assert_eq!(opts.presorted_path(), PathBuf::from("out/primes.txt.presorted"));
        assert_eq!(opts.sink_path(), opts.presorted_path());
    }

    #[test]
    fn sink_writes_output_without_final_sort() {
        let opts = valid();
        assert_eq!(opts.sink_path(), opts.output);
    }
}
