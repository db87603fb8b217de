#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;

use primegen_core::primality::{miller_rabin, trial_division};
use primegen_core::progress::CancellationToken;

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    // Capped so trial division stays fast
    let x = u64::from_le_bytes([
        data[0], data[1], data[2], data[3], data[4], data[5], data[6], data[7],
    ]);
    let x = BigUint::from(x % (1 << 40));

    // Trial division only answers for odd inputs of at least 5
    if x < BigUint::from(5u32) || !x.bit(0) {
        return;
    }

    let cancel = CancellationToken::new();
    let exact = trial_division(&x, &cancel).unwrap();
    assert_eq!(exact, miller_rabin(&x), "TrialDivision != MillerRabin at x={x}");
});
