use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wordiff",
    about = "Highlight which words of a modified line changed",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub diff: DiffArgs,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum StrategyArg {
    Token,
    Char,
}

impl From<StrategyArg> for wordiff::Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Token => wordiff::Strategy::Token,
            StrategyArg::Char => wordiff::Strategy::Char,
        }
    }
}

/// Options shared by every subcommand; they override the config file.
#[derive(Args, Clone, Debug, Default)]
pub struct DiffArgs {
    /// TOML file with `max_line_len` and a `[diff]` table
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Alignment strategy
    #[arg(long, global = true)]
    pub strategy: Option<StrategyArg>,
    /// Similarity below which a line is highlighted as a whole (token strategy)
    #[arg(long, global = true)]
    pub threshold: Option<f64>,
    /// Lines longer than this many bytes are highlighted as a whole
    #[arg(long, global = true)]
    pub max_line_len: Option<usize>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two lines given on the command line
    Compare(CompareArgs),
    /// Highlight changed words in a unified diff
    Hunk(HunkArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    pub old: String,
    pub new: String,
}

#[derive(Args)]
pub struct HunkArgs {
    /// Unified diff to read; stdin when omitted or `-`
    pub file: Option<PathBuf>,
}
