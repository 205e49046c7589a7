//! Terminal rendering of highlighted rows.

use colored::{ColoredString, Colorize};
use wordiff::Segment;

use crate::hunk::Row;

/// Render one row as a terminal line (without trailing newline).
pub fn render_row(row: &Row) -> String {
    match row {
        Row::Meta { text } if text.starts_with("@@") => text.cyan().to_string(),
        Row::Meta { text } => text.bold().to_string(),
        Row::Context { text } => format!(" {text}"),
        Row::Removed { segments } => render_side('-', segments, Side::Old),
        Row::Added { segments } => render_side('+', segments, Side::New),
    }
}

#[derive(Clone, Copy)]
enum Side {
    Old,
    New,
}

/// Render a side with a `-`/`+` marker; changed spans are emphasized.
fn render_side(marker: char, segments: &[Segment], side: Side) -> String {
    let mut out = paint(&marker.to_string(), side, false).to_string();
    for segment in segments {
        out.push_str(&paint(&segment.text, side, segment.changed).to_string());
    }
    out
}

fn paint(text: &str, side: Side, emphasized: bool) -> ColoredString {
    match (side, emphasized) {
        (Side::Old, false) => text.red(),
        (Side::Old, true) => text.red().bold().on_truecolor(80, 0, 0),
        (Side::New, false) => text.green(),
        (Side::New, true) => text.green().bold().on_truecolor(0, 60, 0),
    }
}
