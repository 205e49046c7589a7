//! The [`WordDiffer`] capability and its two strategies.

use std::collections::HashSet;

use similar::ChangeTag;
use tracing::{debug, trace};

use crate::align::align;
use crate::builder::build;
use crate::cleanup::{cleanup_semantic, edits_from_chars};
use crate::config::{DiffConfig, Strategy};
use crate::segment::{LineDiff, Segment};
use crate::similarity::{quick_ratio, DEFAULT_THRESHOLD};
use crate::tokenizer::Tokenizer;

/// Highlights which spans of a modified line changed.
///
/// Implementations are total: any pair of strings yields a [`LineDiff`]
/// whose sides reassemble to the inputs. Differs hold no mutable state and
/// may be shared across threads.
pub trait WordDiffer: Send + Sync {
    /// Compare `old` against `new`.
    fn diff(&self, old: &str, new: &str) -> LineDiff;
}

/// Build the differ selected by `config`.
pub fn build_differ(config: &DiffConfig) -> Box<dyn WordDiffer> {
    match config.strategy {
        Strategy::Token => Box::new(TokenDiffer::with_threshold(config.threshold)),
        Strategy::Char => Box::new(CharDiffer::new()),
    }
}

// ---------------------------------------------------------------------------
// TokenDiffer
// ---------------------------------------------------------------------------

/// Aligns lexical tokens with Ratcliff/Obershelp matching.
///
/// Lines whose [`quick_ratio`] falls below the threshold are reported as
/// fully replaced without running the aligner.
#[derive(Clone, Debug)]
pub struct TokenDiffer {
    tokenizer: Tokenizer,
    threshold: f64,
}

impl TokenDiffer {
    /// A differ with the default threshold of 0.4.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }

    /// A differ with a custom threshold. `0.0` always aligns.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            threshold,
        }
    }

    /// The similarity threshold in use.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for TokenDiffer {
    fn default() -> Self {
        Self::new()
    }
}

impl WordDiffer for TokenDiffer {
    fn diff(&self, old: &str, new: &str) -> LineDiff {
        if old == new {
            return LineDiff::identical(old);
        }
        if old.is_empty() || new.is_empty() {
            return LineDiff::replaced(old, new);
        }

        let a = self.tokenizer.tokenize(old);
        let b = self.tokenizer.tokenize(new);

        let quick = quick_ratio(&a, &b);
        if quick < self.threshold {
            debug!(quick, threshold = self.threshold, "line below similarity threshold");
            return LineDiff::replaced(old, new);
        }

        let blocks = align(&a, &b);
        trace!(
            old_tokens = a.len(),
            new_tokens = b.len(),
            blocks = blocks.len(),
            "aligned tokens"
        );
        build(&a, &b, &blocks)
    }
}

// ---------------------------------------------------------------------------
// CharDiffer
// ---------------------------------------------------------------------------

/// Aligns characters with Myers' algorithm, then applies semantic cleanup
/// so that highlights cover whole words rather than scattered letters.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharDiffer;

impl CharDiffer {
    /// Create a character differ.
    pub fn new() -> Self {
        Self
    }
}

impl WordDiffer for CharDiffer {
    fn diff(&self, old: &str, new: &str) -> LineDiff {
        if old == new {
            return LineDiff::identical(old);
        }
        if old.is_empty() || new.is_empty() || is_disjoint(old, new) {
            return LineDiff::replaced(old, new);
        }

        let mut edits = edits_from_chars(old, new);
        let raw = edits.len();
        cleanup_semantic(&mut edits);
        trace!(raw, cleaned = edits.len(), "semantic cleanup");

        let mut old_segments = Vec::with_capacity(edits.len());
        let mut new_segments = Vec::with_capacity(edits.len());
        for edit in edits {
            match edit.tag {
                ChangeTag::Equal => {
                    old_segments.push(Segment::unchanged(edit.text.clone()));
                    new_segments.push(Segment::unchanged(edit.text));
                }
                ChangeTag::Delete => old_segments.push(Segment::changed(edit.text)),
                ChangeTag::Insert => new_segments.push(Segment::changed(edit.text)),
            }
        }
        LineDiff::new(old_segments, new_segments)
    }
}

/// Returns `true` if `old` and `new` share no character.
fn is_disjoint(old: &str, new: &str) -> bool {
    let chars: HashSet<char> = old.chars().collect();
    !new.chars().any(|c| chars.contains(&c))
}
