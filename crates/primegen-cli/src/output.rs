//! CLI output formatting.

use std::time::Duration;

use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    group_digits(&n.to_string())
}

/// Format an arbitrary-precision number with thousand separators.
#[must_use]
pub fn format_big(n: &BigUint) -> String {
    match n.to_u64() {
        Some(small) => format_number(small),
        None => group_digits(&n.to_string()),
    }
}

fn group_digits(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Throughput in primes per second, if measurable.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_rate(count: u64, d: Duration) -> Option<String> {
    let secs = d.as_secs_f64();
    if secs <= 0.0 || count == 0 {
        return None;
    }
    Some(format!("{:.0}/s", count as f64 / secs))
}
