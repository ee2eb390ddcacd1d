//! Error types shared across Liquid crates.

use std::path::PathBuf;

use liquid_transition_model::TimingParseError;

/// Top-level error type for Liquid operations.
///
/// The animator itself never fails; these errors come from the edges that
/// touch files, streams, and user input.
#[derive(Debug, thiserror::Error)]
pub enum LiquidError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Gesture stream error: {message}")]
    Gesture { message: String },

    #[error("Timing curve error: {0}")]
    Timing(#[from] TimingParseError),

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using LiquidError.
pub type LiquidResult<T> = Result<T, LiquidError>;

impl LiquidError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn gesture(msg: impl Into<String>) -> Self {
        Self::Gesture {
            message: msg.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}
