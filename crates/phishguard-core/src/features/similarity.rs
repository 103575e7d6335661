//! Normalized indel similarity between two strings.
//!
//! `ratio = 2 * LCS(a, b) / (len(a) + len(b))`, i.e. one minus the
//! insert/delete edit distance divided by the combined length. Two empty
//! strings are identical (1.0).

/// Similarity in `[0, 1]` over Unicode scalar values.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let lcs = lcs_len(&a, &b);
    (2 * lcs) as f64 / total as f64
}

/// Longest common subsequence length, single-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diag + 1
            } else {
                above.max(row[j])
            };
            diag = above;
        }
    }
    row[b.len()]
}

/// Highest similarity between `domain` and any of `candidates`; 0.0 when
/// there are no candidates.
pub fn max_similarity<S: AsRef<str>>(domain: &str, candidates: &[S]) -> f64 {
    candidates
        .iter()
        .map(|c| similarity_ratio(domain, c.as_ref()))
        .fold(0.0, f64::max)
}
