//! Local sort for nearly ordered buffers.

/// Stable insertion sort.
///
/// Primes reach the sink only slightly out of order, so each element moves
/// a short distance and the sort stays close to linear.
pub fn insertion_sort<T: Ord>(values: &mut [T]) {
    for i in 1..values.len() {
        let mut j = i;
        while j > 0 && values[j - 1] > values[j] {
            values.swap(j - 1, j);
            j -= 1;
        }
    }
}
