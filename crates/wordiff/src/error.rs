//! Error types for the wordiff crate.
//!
//! Diffing itself never fails; only configuration can be rejected.

/// Errors that can occur while loading or validating a [`DiffConfig`](crate::DiffConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The similarity threshold is NaN or outside `[0, 1]`.
    #[error("invalid similarity threshold {0}: expected a value in [0, 1]")]
    InvalidThreshold(f64),

    /// The configuration document could not be parsed.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
