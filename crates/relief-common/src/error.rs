//! Error types for the terrain relief pipeline.
//!
//! Missing elevation (NO_DATA) and an all-empty tile are not errors: they
//! travel through the pipeline as transparent pixels. The variants below are
//! caller contract violations or configuration problems, reported before any
//! output is produced.

use thiserror::Error;

/// Result type alias using ReliefError.
pub type ReliefResult<T> = Result<T, ReliefError>;

/// Primary error type for relief rendering.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReliefError {
    // === Input Errors ===
    #[error("RGBA buffer holds {actual} bytes, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("raster shape mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Style Errors ===
    #[error("Invalid color ramp: {0}")]
    InvalidRamp(String),

    #[error("Ramp not found: {0}")]
    StyleNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // === Output Errors ===
    #[error("Encoding failed: {0}")]
    Encode(String),

    // === Scheduling ===
    #[error("frame {generation} superseded by frame {current}")]
    Stale { generation: u64, current: u64 },
}

impl ReliefError {
    /// Create an InvalidParameter error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidRamp error.
    pub fn invalid_ramp(msg: impl Into<String>) -> Self {
        Self::InvalidRamp(msg.into())
    }

    /// True when the pass was dropped because a newer frame was requested.
    ///
    /// Hosts usually ignore these quietly instead of surfacing them.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }
}

impl From<serde_json::Error> for ReliefError {
    fn from(err: serde_json::Error) -> Self {
        ReliefError::Config(format!("JSON error: {}", err))
    }
}
