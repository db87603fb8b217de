//! Primality tests and the `PrimalityTester` decorator.
//!
//! `PrimalityTest` is the trait implemented by the individual algorithms.
//! `PrimalityTester` wraps them with the cheap parity and mod-3 filters and
//! picks Miller-Rabin below its ceiling when the fast path is enabled.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::constants::{
    CANCEL_CHECK_INTERVAL, MILLER_RABIN_DETERMINISTIC_LIMIT, MILLER_RABIN_WITNESSES,
};
use crate::error::PrimeError;
use crate::progress::CancellationToken;

/// Trait for primality algorithms.
pub trait PrimalityTest: Send + Sync {
    /// Decide whether `x` is prime. `x` is odd and not a multiple of 3.
    fn test(&self, x: &BigUint, cancel: &CancellationToken) -> Result<bool, PrimeError>;

    /// Get the name of this algorithm.
    fn name(&self) -> &str;
}

/// Check if the lowest order bit is clear. Zero is even.
#[inline]
#[must_use]
pub fn is_even(x: &BigUint) -> bool {
    x.is_even()
}

/// Exclusive bound below which [`miller_rabin`] is exact.
#[must_use]
pub fn deterministic_limit() -> BigUint {
    BigUint::from(MILLER_RABIN_DETERMINISTIC_LIMIT)
}

/// First trial divisor: `floor(sqrt(x))` rounded up to the nearest odd integer.
#[must_use]
pub fn first_divisor(x: &BigUint) -> BigUint {
    let root = x.sqrt();
    if root.is_even() {
        root + 1u32
    } else {
        root
    }
}

/// Deterministic trial division over every odd divisor from
/// [`first_divisor`] down to 3.
///
/// Only meaningful for odd `x >= 5`. Polls `cancel` every
/// [`CANCEL_CHECK_INTERVAL`] divisors and returns `PrimeError::Cancelled`
/// if the run is being torn down.
pub fn trial_division(x: &BigUint, cancel: &CancellationToken) -> Result<bool, PrimeError> {
    if let Some(small) = x.to_u64() {
        return trial_division_u64(small, cancel);
    }

    let three = BigUint::from(3u32);
    let mut divisor = first_divisor(x);
    let mut since_check = 0u64;
    while divisor >= three {
        if (x % &divisor).is_zero() {
            return Ok(false);
        }
        divisor -= 2u32;
        since_check += 1;
        if since_check == CANCEL_CHECK_INTERVAL {
            since_check = 0;
            cancel.check_cancelled()?;
        }
    }
    Ok(true)
}

fn trial_division_u64(x: u64, cancel: &CancellationToken) -> Result<bool, PrimeError> {
    let root = num_integer::sqrt(x);
    let mut divisor = root | 1;
    let mut since_check = 0u64;
    while divisor >= 3 {
        if x % divisor == 0 {
            return Ok(false);
        }
        divisor -= 2;
        since_check += 1;
        if since_check == CANCEL_CHECK_INTERVAL {
            since_check = 0;
            cancel.check_cancelled()?;
        }
    }
    Ok(true)
}

/// Miller-Rabin with the first 13 primes as witnesses.
///
/// Exact for `n` below [`deterministic_limit`]; above it a composite may be
/// reported prime.
#[must_use]
pub fn miller_rabin(n: &BigUint) -> bool {
    let one = BigUint::one();
    if *n <= one {
        return false;
    }
    for &p in &MILLER_RABIN_WITNESSES {
        if *n == BigUint::from(p) {
            return true;
        }
        if (n % p).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - &one;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for &a in &MILLER_RABIN_WITNESSES {
        let mut x = BigUint::from(a).modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = &x * &x % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Trial division as a [`PrimalityTest`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TrialDivision;

impl TrialDivision {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PrimalityTest for TrialDivision {
    fn test(&self, x: &BigUint, cancel: &CancellationToken) -> Result<bool, PrimeError> {
        trial_division(x, cancel)
    }

    fn name(&self) -> &str {
        "TrialDivision"
    }
}

/// Miller-Rabin as a [`PrimalityTest`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MillerRabin;

impl MillerRabin {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PrimalityTest for MillerRabin {
    fn test(&self, x: &BigUint, _cancel: &CancellationToken) -> Result<bool, PrimeError> {
        Ok(miller_rabin(x))
    }

    fn name(&self) -> &str {
        "MillerRabin"
    }
}

/// Decorator applying the cheap filters and choosing an algorithm per candidate.
#[derive(Debug, Clone)]
pub struct PrimalityTester {
    fast: Option<BigUint>,
}

impl PrimalityTester {
    /// Trial division only.
    #[must_use]
    pub fn deterministic() -> Self {
        Self { fast: None }
    }

    /// Miller-Rabin for candidates below `ceiling`, trial division above.
    ///
    /// The ceiling is clamped to [`deterministic_limit`].
    #[must_use]
    pub fn with_fast_path(ceiling: BigUint) -> Self {
        Self {
            fast: Some(ceiling.min(deterministic_limit())),
        }
    }

    /// Build a tester from run options.
    #[must_use]
    pub fn from_options(opts: &crate::options::Options) -> Self {
        if opts.probabilistic {
            Self::with_fast_path(opts.probabilistic_ceiling.clone())
        } else {
            Self::deterministic()
        }
    }

    /// Algorithm that will decide `x` once it passes the cheap filters.
    #[must_use]
    pub fn algorithm_for(&self, x: &BigUint) -> &'static dyn PrimalityTest {
        match &self.fast {
            Some(ceiling) if x < ceiling => &MillerRabin,
            _ => &TrialDivision,
        }
    }

    /// Decide whether the candidate `x` is prime.
    ///
    /// Even numbers and multiples of 3 are rejected outright, so 2 and 3
    /// themselves report `false`.
    pub fn is_prime(&self, x: &BigUint, cancel: &CancellationToken) -> Result<bool, PrimeError> {
        if is_even(x) {
            return Ok(false);
        }
        if (x % 3u32).is_zero() {
            return Ok(false);
        }
        self.algorithm_for(x).test(x, cancel)
    }
}

impl Default for PrimalityTester {
    fn default() -> Self {
        Self::deterministic()
    }
}
