//! Tagged spans of text and the merge pass that keeps them canonical.
//!
//! A side (old or new) of a comparison is a `Vec<Segment>`. Two invariants
//! hold for every side a differ returns:
//!
//! - concatenating the segment texts reproduces the input exactly;
//! - no two consecutive segments share the same `changed` flag.

use serde::{Deserialize, Serialize};

/// A contiguous span of one side of a comparison.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// The span's text, verbatim from the input.
    pub text: String,
    /// Whether the span differs from the other side.
    pub changed: bool,
}

impl Segment {
    /// A span that was deleted (old side) or inserted (new side).
    pub fn changed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            changed: true,
        }
    }

    /// A span shared by both sides.
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            changed: false,
        }
    }
}

/// The result of diffing one old line against one new line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiff {
    /// Segments of the old line.
    pub old: Vec<Segment>,
    /// Segments of the new line.
    pub new: Vec<Segment>,
}

impl LineDiff {
    /// Build a line diff, normalizing both sides with [`merge`].
    pub fn new(old: Vec<Segment>, new: Vec<Segment>) -> Self {
        Self {
            old: merge(old),
            new: merge(new),
        }
    }

    /// Each side as a single changed segment (or nothing, if that side is empty).
    pub fn replaced(old: &str, new: &str) -> Self {
        Self::new(vec![Segment::changed(old)], vec![Segment::changed(new)])
    }

    /// Both sides as a single unchanged segment.
    pub fn identical(text: &str) -> Self {
        Self::new(vec![Segment::unchanged(text)], vec![Segment::unchanged(text)])
    }

    /// Reassemble the old line.
    pub fn old_text(&self) -> String {
        concat(&self.old)
    }

    /// Reassemble the new line.
    pub fn new_text(&self) -> String {
        concat(&self.new)
    }

    /// Returns `true` if neither side has a changed segment.
    pub fn is_unchanged(&self) -> bool {
        self.old.iter().chain(&self.new).all(|s| !s.changed)
    }

    /// Number of bytes highlighted on the old side.
    pub fn changed_len_old(&self) -> usize {
        changed_len(&self.old)
    }

    /// Number of bytes highlighted on the new side.
    pub fn changed_len_new(&self) -> usize {
        changed_len(&self.new)
    }
}

/// Coalesce consecutive segments that share a `changed` flag.
///
/// Zero-length segments are dropped, so an empty side is always
/// represented by an empty vector.
pub fn merge(segments: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        if segment.text.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last) if last.changed == segment.changed => last.text.push_str(&segment.text),
            _ => merged.push(segment),
        }
    }
    merged
}

fn concat(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

fn changed_len(segments: &[Segment]) -> usize {
    segments
        .iter()
        .filter(|s| s.changed)
        .map(|s| s.text.len())
        .sum()
}
