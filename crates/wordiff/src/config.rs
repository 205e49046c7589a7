use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::similarity::DEFAULT_THRESHOLD;

/// Which alignment strategy a differ uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Lexical tokens aligned with Ratcliff/Obershelp matching.
    #[default]
    Token,
    /// Characters aligned with Myers, followed by semantic cleanup.
    Char,
}

/// Configuration for building a [`WordDiffer`](crate::WordDiffer).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// The alignment strategy.
    pub strategy: Strategy,
    /// Token strategy only: below this quick ratio a line is treated as
    /// fully replaced instead of aligned.
    pub threshold: f64,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Token,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl DiffConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_token_strategy() {
        let config = DiffConfig::default();
        assert_eq!(config.strategy, Strategy::Token);
        assert_eq!(config.threshold, 0.4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(DiffConfig::from_toml_str("").unwrap(), DiffConfig::default());
    }

    #[test]
    fn parses_all_fields() {
        let config = DiffConfig::from_toml_str("strategy = \"char\"\nthreshold = 0.25\n").unwrap();
        assert_eq!(config.strategy, Strategy::Char);
        assert_eq!(config.threshold, 0.25);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let err = DiffConfig::from_toml_str("threshold = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold(t) if t == 1.5));

        let config = DiffConfig {
            threshold: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_strategy() {
        let err = DiffConfig::from_toml_str("strategy = \"line\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
