//! Character-level statistics over the raw URL.

use std::collections::BTreeMap;

/// Shannon entropy (base 2) of the character distribution of `text`.
///
/// Empty input has entropy 0.0, not NaN.
pub fn shannon_entropy(text: &str) -> f64 {
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    let mut length = 0usize;
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
        length += 1;
    }
    if length == 0 {
        return 0.0;
    }
    // BTreeMap order keeps the float summation order fixed across calls.
    let length = length as f64;
    counts
        .values()
        .map(|&n| {
            let p = n as f64 / length;
            -p * p.log2()
        })
        .sum::<f64>()
        .max(0.0)
}

/// Length of the longest contiguous run of decimal digits.
pub fn longest_digit_run(text: &str) -> usize {
    let mut max_run = 0;
    let mut current = 0;
    for c in text.chars() {
        if c.is_ascii_digit() {
            current += 1;
            max_run = max_run.max(current);
        } else {
            current = 0;
        }
    }
    max_run
}
