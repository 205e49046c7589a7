//! Turn matching blocks into segments.

use crate::align::MatchingBlock;
use crate::segment::{LineDiff, Segment};

/// Build both sides' segments from token sequences and their matching blocks.
///
/// The gap before each block (and after the last one) becomes a changed
/// segment; each block becomes an unchanged segment with the same text on
/// both sides. Tokens are joined without separators since they already
/// carry their whitespace.
pub fn build(a: &[&str], b: &[&str], blocks: &[MatchingBlock]) -> LineDiff {
    let mut old = Vec::with_capacity(blocks.len() * 2 + 1);
    let mut new = Vec::with_capacity(blocks.len() * 2 + 1);
    let (mut i, mut j) = (0, 0);

    for block in blocks {
        if i < block.old {
            old.push(Segment::changed(a[i..block.old].concat()));
        }
        if j < block.new {
            new.push(Segment::changed(b[j..block.new].concat()));
        }
        if block.len > 0 {
            let text = a[block.old_range()].concat();
            new.push(Segment::unchanged(text.clone()));
            old.push(Segment::unchanged(text));
        }
        i = block.old + block.len;
        j = block.new + block.len;
    }

    if i < a.len() {
        old.push(Segment::changed(a[i..].concat()));
    }
    if j < b.len() {
        new.push(Segment::changed(b[j..].concat()));
    }

    LineDiff::new(old, new)
}
