//! Unified-diff reading: classify lines, then pair each run of removed
//! lines with the run of added lines that follows it.

use serde::Serialize;
use wordiff::{LineDiff, Segment, WordDiffer};

use crate::settings::Settings;

/// A classified line of a unified diff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffLine<'a> {
    /// File headers, hunk headers, `\ No newline` markers and other metadata.
    Meta(&'a str),
    /// Unchanged line inside a hunk (without the leading space).
    Context(&'a str),
    /// Removed line (without the leading `-`).
    Removed(&'a str),
    /// Added line (without the leading `+`).
    Added(&'a str),
}

/// A line ready to render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Row {
    Meta { text: String },
    Context { text: String },
    Removed { segments: Vec<Segment> },
    Added { segments: Vec<Segment> },
}

/// Classify every line of a unified diff.
///
/// Hunk bodies are delimited by the line counts in their `@@` header, so a
/// removed line that happens to start with `--` is not mistaken for a file
/// header.
pub fn parse(input: &str) -> Vec<DiffLine<'_>> {
    let mut lines = Vec::new();
    let (mut old_left, mut new_left) = (0usize, 0usize);

    for line in input.lines() {
        let in_hunk = old_left > 0 || new_left > 0;
        if in_hunk {
            if let Some(rest) = line.strip_prefix('-') {
                old_left = old_left.saturating_sub(1);
                lines.push(DiffLine::Removed(rest));
                continue;
            }
            if let Some(rest) = line.strip_prefix('+') {
                new_left = new_left.saturating_sub(1);
                lines.push(DiffLine::Added(rest));
                continue;
            }
            if let Some(rest) = line.strip_prefix(' ') {
                old_left = old_left.saturating_sub(1);
                new_left = new_left.saturating_sub(1);
                lines.push(DiffLine::Context(rest));
                continue;
            }
            if line.is_empty() {
                // Some tools strip the space from empty context lines.
                old_left = old_left.saturating_sub(1);
                new_left = new_left.saturating_sub(1);
                lines.push(DiffLine::Context(""));
                continue;
            }
        }
        if let Some((old, new)) = hunk_header_counts(line) {
            old_left = old;
            new_left = new;
        }
        lines.push(DiffLine::Meta(line));
    }
    lines
}

/// Parse the line counts of `@@ -a[,b] +c[,d] @@`. A missing count is 1.
fn hunk_header_counts(line: &str) -> Option<(usize, usize)> {
    let rest = line.strip_prefix("@@ ")?;
    let mut ranges = rest.split_whitespace();
    let old = ranges.next()?.strip_prefix('-')?;
    let new = ranges.next()?.strip_prefix('+')?;
    Some((range_count(old)?, range_count(new)?))
}

fn range_count(range: &str) -> Option<usize> {
    match range.split_once(',') {
        Some((_, count)) => count.parse().ok(),
        None => range.parse::<usize>().ok().map(|_| 1),
    }
}

/// Turn classified lines into rows, highlighting paired removed/added lines.
///
/// The i-th line of a removed run is paired with the i-th line of the added
/// run that immediately follows it. Unpaired lines are highlighted whole.
pub fn highlight(lines: &[DiffLine<'_>], differ: &dyn WordDiffer, settings: &Settings) -> Vec<Row> {
    let mut rows = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        match lines[i] {
            DiffLine::Meta(text) => {
                rows.push(Row::Meta { text: text.to_string() });
                i += 1;
            }
            DiffLine::Context(text) => {
                rows.push(Row::Context { text: text.to_string() });
                i += 1;
            }
            DiffLine::Removed(_) | DiffLine::Added(_) => {
                let removed = take_run(lines, &mut i, |l| match l {
                    DiffLine::Removed(text) => Some(text),
                    _ => None,
                });
                let added = take_run(lines, &mut i, |l| match l {
                    DiffLine::Added(text) => Some(text),
                    _ => None,
                });

                let diffs: Vec<LineDiff> = removed
                    .iter()
                    .zip(&added)
                    .map(|(old, new)| settings.diff_line(differ, old, new))
                    .collect();

                for (k, old) in removed.iter().enumerate() {
                    let segments = match diffs.get(k) {
                        Some(diff) => diff.old.clone(),
                        None => LineDiff::replaced(old, "").old,
                    };
                    rows.push(Row::Removed { segments });
                }
                for (k, new) in added.iter().enumerate() {
                    let segments = match diffs.get(k) {
                        Some(diff) => diff.new.clone(),
                        None => LineDiff::replaced("", new).new,
                    };
                    rows.push(Row::Added { segments });
                }
            }
        }
    }
    rows
}

fn take_run<'a>(
    lines: &[DiffLine<'a>],
    i: &mut usize,
    pick: impl Fn(DiffLine<'a>) -> Option<&'a str>,
) -> Vec<&'a str> {
    let mut run = Vec::new();
    while let Some(text) = lines.get(*i).and_then(|l| pick(*l)) {
        run.push(text);
        *i += 1;
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordiff::TokenDiffer;

    const PATCH: &str = "\
diff --git a/src/lib.rs b/src/lib.rs
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -1,4 +1,4 @@
 fn main() {
-    println!(\"hello world\");
---- separator
+    println!(\"hello universe\");
+++++ separator
 }
";

    #[test]
    fn parse_classifies_lines() {
        let lines = parse(PATCH);
        assert_eq!(
            lines,
            vec![
                DiffLine::Meta("diff --git a/src/lib.rs b/src/lib.rs"),
                DiffLine::Meta("--- a/src/lib.rs"),
                DiffLine::Meta("+++ b/src/lib.rs"),
                DiffLine::Meta("@@ -1,4 +1,4 @@"),
                DiffLine::Context("fn main() {"),
                DiffLine::Removed("    println!(\"hello world\");"),
                DiffLine::Removed("--- separator"),
                DiffLine::Added("    println!(\"hello universe\");"),
                DiffLine::Added("++++ separator"),
                DiffLine::Context("}"),
            ]
        );
    }

    #[test]
    fn header_counts() {
        assert_eq!(hunk_header_counts("@@ -1,4 +1,5 @@ fn x()"), Some((4, 5)));
        assert_eq!(hunk_header_counts("@@ -3 +3 @@"), Some((1, 1)));
        assert_eq!(hunk_header_counts("@@ -0,0 +1,2 @@"), Some((0, 2)));
        assert_eq!(hunk_header_counts("--- a/file"), None);
    }

    #[test]
    fn highlight_pairs_runs_index_wise() {
        let lines = [
            DiffLine::Removed("let a = 1;"),
            DiffLine::Removed("let b = 2;"),
            DiffLine::Added("let a = 10;"),
        ];
        let rows = highlight(&lines, &TokenDiffer::new(), &Settings::default());
        assert_eq!(
            rows,
            vec![
                Row::Removed {
                    segments: vec![
                        Segment::unchanged("let a = "),
                        Segment::changed("1"),
                        Segment::unchanged(";"),
                    ],
                },
                Row::Removed {
                    segments: vec![Segment::changed("let b = 2;")],
                },
                Row::Added {
                    segments: vec![
                        Segment::unchanged("let a = "),
                        Segment::changed("10"),
                        Segment::unchanged(";"),
                    ],
                },
            ]
        );
    }

    #[test]
    fn added_without_removed_is_whole_line() {
        let lines = [DiffLine::Context("x"), DiffLine::Added("new line")];
        let rows = highlight(&lines, &TokenDiffer::new(), &Settings::default());
        assert_eq!(
            rows,
            vec![
                Row::Context { text: "x".into() },
                Row::Added {
                    segments: vec![Segment::changed("new line")],
                },
            ]
        );
    }

    #[test]
    fn rows_serialize_with_kind_tag() {
        let row = Row::Added {
            segments: vec![Segment::changed("x")],
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "added", "segments": [{ "text": "x", "changed": true }] })
        );
    }
}
