use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use wordiff::{DiffConfig, LineDiff, WordDiffer};

use crate::cli::DiffArgs;

/// Everything the CLI needs to drive the engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Engine configuration.
    pub diff: DiffConfig,
    /// Lines longer than this (in bytes) skip the engine and are shown
    /// as fully replaced.
    pub max_line_len: Option<usize>,
}

impl Settings {
    /// Load settings from an optional TOML file, then apply command-line
    /// overrides and validate the result.
    pub fn resolve(args: &DiffArgs) -> anyhow::Result<Self> {
        let mut settings = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(strategy) = args.strategy {
            settings.diff.strategy = strategy.into();
        }
        if let Some(threshold) = args.threshold {
            settings.diff.threshold = threshold;
        }
        if args.max_line_len.is_some() {
            settings.max_line_len = args.max_line_len;
        }
        settings.diff.validate()?;
        Ok(settings)
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let settings: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(settings)
    }

    /// Whether a line pair is too long to hand to the engine.
    pub fn exceeds_cap(&self, old: &str, new: &str) -> bool {
        self.max_line_len
            .is_some_and(|max| old.len() > max || new.len() > max)
    }

    /// Diff one line pair, honouring the length cap.
    pub fn diff_line(&self, differ: &dyn WordDiffer, old: &str, new: &str) -> LineDiff {
        if self.exceeds_cap(old, new) {
            tracing::debug!(old = old.len(), new = new.len(), "line exceeds length cap");
            return LineDiff::replaced(old, new);
        }
        differ.diff(old, new)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use wordiff::{Segment, Strategy, TokenDiffer};

    use super::*;
    use crate::cli::StrategyArg;

    #[test]
    fn defaults_without_file() {
        let settings = Settings::resolve(&DiffArgs::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.diff.threshold, 0.4);
    }

    #[test]
    fn file_then_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_line_len = 80\n[diff]\nstrategy = \"char\"\nthreshold = 0.3").unwrap();

        let args = DiffArgs {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let settings = Settings::resolve(&args).unwrap();
        assert_eq!(settings.diff.strategy, Strategy::Char);
        assert_eq!(settings.diff.threshold, 0.3);
        assert_eq!(settings.max_line_len, Some(80));

        let args = DiffArgs {
            config: Some(file.path().to_path_buf()),
            strategy: Some(StrategyArg::Token),
            threshold: Some(0.5),
            max_line_len: Some(120),
        };
        let settings = Settings::resolve(&args).unwrap();
        assert_eq!(settings.diff.strategy, Strategy::Token);
        assert_eq!(settings.diff.threshold, 0.5);
        assert_eq!(settings.max_line_len, Some(120));
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let args = DiffArgs {
            threshold: Some(-0.1),
            ..Default::default()
        };
        assert!(Settings::resolve(&args).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let args = DiffArgs {
            config: Some("/nonexistent/wordiff.toml".into()),
            ..Default::default()
        };
        let err = Settings::resolve(&args).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn cap_skips_engine() {
        let settings = Settings {
            max_line_len: Some(5),
            ..Default::default()
        };
        let differ = TokenDiffer::new();
        let diff = settings.diff_line(&differ, "hello world", "hello universe");
        assert_eq!(diff.old, vec![Segment::changed("hello world")]);

        let diff = settings.diff_line(&differ, "a b", "a c");
        assert_eq!(diff.old, vec![Segment::unchanged("a "), Segment::changed("b")]);
    }
}
