use std::io::{self, Read, Write};

use anyhow::Context;
use wordiff::{build_differ, WordDiffer};

use crate::cli::*;
use crate::hunk::{self, Row};
use crate::render::render_row;
use crate::settings::Settings;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::resolve(&cli.diff)?;
    let differ = build_differ(&settings.diff);
    tracing::debug!(
        strategy = ?settings.diff.strategy,
        threshold = settings.diff.threshold,
        max_line_len = ?settings.max_line_len,
        "differ ready"
    );

    match cli.command {
        Command::Compare(args) => cmd_compare(args, differ.as_ref(), &settings, &cli.format),
        Command::Hunk(args) => cmd_hunk(args, differ.as_ref(), &settings, &cli.format),
    }
}

fn cmd_compare(
    args: CompareArgs,
    differ: &dyn WordDiffer,
    settings: &Settings,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let diff = settings.diff_line(differ, &args.old, &args.new);
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&diff)?)?,
        OutputFormat::Text => {
            let rows = [
                Row::Removed { segments: diff.old },
                Row::Added { segments: diff.new },
            ];
            write_rows(&mut out, &rows)?;
        }
    }
    Ok(())
}

fn cmd_hunk(
    args: HunkArgs,
    differ: &dyn WordDiffer,
    settings: &Settings,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let input = match args.file.as_deref() {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    let lines = hunk::parse(&input);
    let rows = hunk::highlight(&lines, differ, settings);
    tracing::debug!(lines = lines.len(), rows = rows.len(), "highlighted diff");

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?,
        OutputFormat::Text => write_rows(&mut out, &rows)?,
    }
    Ok(())
}

fn write_rows(out: &mut impl Write, rows: &[Row]) -> io::Result<()> {
    for row in rows {
        writeln!(out, "{}", render_row(row))?;
    }
    Ok(())
}
