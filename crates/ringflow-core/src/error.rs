//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A configuration that cannot start a run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("processor count must be at least 1")]
    NoProcessors,

    #[error("scenario lists no processor counts")]
    NoCases,

    #[error("load bounds are inverted: min {min} > max {max}")]
    InvertedLoadBounds { min: u64, max: u64 },

    #[error("cycle bounds are inverted: min {min} > max {max}")]
    InvertedCycleBounds { min: u64, max: u64 },

    #[error("cycle interval upper bound must be positive")]
    ZeroCycleInterval,

    #[error("load bound {max} across {processors} processors overflows u64")]
    LoadBoundTooLarge { max: u64, processors: usize },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize scenario: {0}")]
    Serialize(#[from] toml::ser::Error),
}
