//! Word-level diff engine.
//!
//! Given the old and new text of a single modified line, partitions each
//! into ordered segments tagged changed or unchanged, so that a renderer
//! can emphasize exactly the spans that differ. Concatenating a side's
//! segments always reproduces that side's input.
//!
//! # Key Types
//!
//! - [`WordDiffer`] -- The diffing capability shared by both strategies
//! - [`TokenDiffer`] -- Lexical tokens + similarity gate + Ratcliff/Obershelp alignment
//! - [`CharDiffer`] -- Character-level Myers diff + semantic cleanup
//! - [`Segment`] / [`LineDiff`] -- Tagged spans of the old and new line
//! - [`DiffConfig`] / [`Strategy`] -- Strategy selection and threshold tuning

pub mod align;
pub mod builder;
pub mod cleanup;
pub mod config;
pub mod differ;
pub mod error;
pub mod segment;
pub mod similarity;
pub mod tokenizer;

pub use align::{align, MatchingBlock};
pub use config::{DiffConfig, Strategy};
pub use differ::{build_differ, CharDiffer, TokenDiffer, WordDiffer};
pub use error::{ConfigError, ConfigResult};
pub use segment::{merge, LineDiff, Segment};
pub use similarity::{quick_ratio, ratio, DEFAULT_THRESHOLD};
pub use tokenizer::{TokenKind, Tokenizer};
