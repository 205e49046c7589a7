//! Similarity ratios over token sequences.
//!
//! [`quick_ratio`] ignores order and only counts how many tokens the two
//! sides share as multisets. Any ordered matching is also a multiset
//! matching, so it can never exceed that count: `quick_ratio >= ratio`
//! always holds, which makes it a safe gate in front of the aligner.

use std::collections::HashMap;
use std::hash::Hash;

use crate::align::MatchingBlock;

/// The default similarity below which a line is treated as fully replaced.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Upper bound on the alignment ratio of `a` and `b`, in `[0, 1]`.
///
/// Two empty sequences are identical and score `1.0`.
pub fn quick_ratio<T: Eq + Hash>(a: &[T], b: &[T]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let mut available: HashMap<&T, usize> = HashMap::with_capacity(b.len());
    for token in b {
        *available.entry(token).or_insert(0) += 1;
    }

    let mut matches = 0usize;
    for token in a {
        if let Some(count) = available.get_mut(token) {
            if *count > 0 {
                *count -= 1;
                matches += 1;
            }
        }
    }

    score(matches, total)
}

/// The alignment ratio `2 * M / (|a| + |b|)`, where `M` is the number of
/// tokens covered by `blocks`.
pub fn ratio(blocks: &[MatchingBlock], len_a: usize, len_b: usize) -> f64 {
    let total = len_a + len_b;
    if total == 0 {
        return 1.0;
    }
    score(blocks.iter().map(|b| b.len).sum(), total)
}

fn score(matches: usize, total: usize) -> f64 {
    2.0 * matches as f64 / total as f64
}
