//! Ratcliff/Obershelp block alignment.
//!
//! Finds the longest common run of tokens, then recurses into the regions
//! on either side of it. The resulting blocks never cross, never overlap
//! and are each maximal.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

/// A run of `len` identical tokens at `old` in the old sequence and `new`
/// in the new sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchingBlock {
    /// Offset of the run in the old sequence.
    pub old: usize,
    /// Offset of the run in the new sequence.
    pub new: usize,
    /// Number of tokens in the run.
    pub len: usize,
}

impl MatchingBlock {
    /// Create a block.
    pub fn new(old: usize, new: usize, len: usize) -> Self {
        Self { old, new, len }
    }

    /// Token range covered on the old side.
    pub fn old_range(&self) -> Range<usize> {
        self.old..self.old + self.len
    }

    /// Token range covered on the new side.
    pub fn new_range(&self) -> Range<usize> {
        self.new..self.new + self.len
    }
}

/// Compute the matching blocks of `a` and `b`, ordered by offset.
///
/// Every block has positive length. Identical inputs yield one block
/// spanning both; inputs without a common token yield none.
///
/// When several longest runs exist, the one starting earliest in `a` wins,
/// and among those the one starting earliest in `b`.
pub fn align<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<MatchingBlock> {
    if a == b {
        return if a.is_empty() {
            Vec::new()
        } else {
            vec![MatchingBlock::new(0, 0, a.len())]
        };
    }

    let matcher = Matcher::new(a, b);
    let mut blocks = Vec::new();
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let block = matcher.longest_match(alo, ahi, blo, bhi);
        if block.len == 0 {
            continue;
        }
        let (i, j, k) = (block.old, block.new, block.len);
        blocks.push(block);
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    blocks.sort_unstable();
    coalesce(blocks)
}

/// Index of `b`: every token mapped to its ascending positions.
struct Matcher<'a, T> {
    a: &'a [T],
    positions: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> Matcher<'a, T> {
    fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut positions: HashMap<&T, Vec<usize>> = HashMap::new();
        for (j, token) in b.iter().enumerate() {
            positions.entry(token).or_default().push(j);
        }
        Self { a, positions }
    }

    /// Longest run of equal tokens in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Dynamic programming over runs ending at each position: `run_len[j]`
    /// holds the length of the run ending at `a[i - 1]` and `b[j]`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchingBlock {
        let mut best = MatchingBlock::new(alo, blo, 0);
        let mut run_len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_run_len = HashMap::new();
            if let Some(js) = self.positions.get(&self.a[i]) {
                for &j in js.iter().skip_while(|&&j| j < blo) {
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_run_len.insert(j, k);
                    if k > best.len {
                        best = MatchingBlock::new(i + 1 - k, j + 1 - k, k);
                    }
                }
            }
            run_len = next_run_len;
        }

        best
    }
}

/// Join blocks that abut on both sides.
fn coalesce(blocks: Vec<MatchingBlock>) -> Vec<MatchingBlock> {
    let mut out: Vec<MatchingBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match out.last_mut() {
            Some(last) if last.old + last.len == block.old && last.new + last.len == block.new => {
                last.len += block.len;
            }
            _ => out.push(block),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn identical_is_one_block() {
        let a = ["a", "b", "c"];
        assert_eq!(align(&a, &a), vec![MatchingBlock::new(0, 0, 3)]);
    }

    #[test]
    fn empty_inputs_have_no_blocks() {
        let empty: [&str; 0] = [];
        assert!(align(&empty, &empty).is_empty());
        assert!(align(&empty, &["a"]).is_empty());
        assert!(align(&["a"], &empty).is_empty());
    }

    #[test]
    fn disjoint_has_no_blocks() {
        assert!(align(&chars("abc"), &chars("xyz")).is_empty());
    }

    #[test]
    fn insertion_splits_into_two_blocks() {
        let a = ["f", "(", "x", ")"];
        let b = ["f", "(", "x", ",", "y", ")"];
        assert_eq!(
            align(&a, &b),
            vec![MatchingBlock::new(0, 0, 3), MatchingBlock::new(3, 5, 1)]
        );
    }

    #[test]
    fn classic_ratcliff_obershelp() {
        // "ab" and "cd" tie at length 2; "ab" is found first, "cd" to its right.
        let blocks = align(&chars("abxcd"), &chars("abcd"));
        assert_eq!(
            blocks,
            vec![MatchingBlock::new(0, 0, 2), MatchingBlock::new(3, 2, 2)]
        );
    }

    #[test]
    fn ties_prefer_earliest_in_old() {
        // "ab" and "cd" are both length-2 candidates; "ab" starts first in old.
        let blocks = align(&chars("abcd"), &chars("cdab"));
        assert_eq!(blocks, vec![MatchingBlock::new(0, 2, 2)]);
    }

    #[test]
    fn ties_prefer_earliest_in_new() {
        // "a" occurs twice in new; the first occurrence wins.
        let blocks = align(&chars("a"), &chars("bab a"));
        assert_eq!(blocks, vec![MatchingBlock::new(0, 1, 1)]);
    }

    #[test]
    fn longest_beats_leftmost() {
        let blocks = align(&chars("xabc"), &chars("abcx"));
        assert_eq!(blocks, vec![MatchingBlock::new(1, 0, 3)]);
    }

    #[test]
    fn blocks_are_ordered_and_disjoint() {
        let a = chars("the quick brown fox jumps");
        let b = chars("a quick brown dog jumps high");
        let blocks = align(&a, &b);
        assert!(!blocks.is_empty());
        for pair in blocks.windows(2) {
            assert!(pair[0].old + pair[0].len <= pair[1].old);
            assert!(pair[0].new + pair[0].len <= pair[1].new);
            // Maximal: adjacent blocks never abut on both sides.
            assert!(
                pair[0].old + pair[0].len != pair[1].old || pair[0].new + pair[0].len != pair[1].new
            );
        }
        for block in &blocks {
            assert!(block.len > 0);
            assert_eq!(a[block.old_range()], b[block.new_range()]);
        }
    }

    #[test]
    fn ranges() {
        let block = MatchingBlock::new(2, 5, 3);
        assert_eq!(block.old_range(), 2..5);
        assert_eq!(block.new_range(), 5..8);
    }
}
