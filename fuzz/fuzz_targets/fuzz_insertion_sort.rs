#![no_main]

use libfuzzer_sys::fuzz_target;

use primegen_core::sort::insertion_sort;

fuzz_target!(|data: &[u8]| {
    let mut values: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    let mut expected = values.clone();
    expected.sort();

    insertion_sort(&mut values);
    assert_eq!(values, expected);
});
