// File: crates/xychart-core/src/error.rs
// Summary: Configuration errors raised while resolving series from a dimension mapping.

use thiserror::Error;

/// Invalid or missing dimension mapping. The message is shown to the user in
/// place of the chart; partial series are never rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing data")]
    MissingData,
    #[error("Missing series config")]
    MissingSeriesConfig,
    #[error("Select X dimension")]
    MissingX,
    #[error("Select Y dimension")]
    MissingY,
    #[error("Y must be in the same frame as X")]
    YNotInFrame,
    #[error("Missing X dimension")]
    MissingXDimension,
    #[error("No Y values")]
    NoYValues,
    #[error("Frame {index} does not exist ({count} frames)")]
    FrameOutOfRange { index: usize, count: usize },
    #[error("invalid chart options: {0}")]
    InvalidOptions(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::InvalidOptions(e.to_string())
    }
}
