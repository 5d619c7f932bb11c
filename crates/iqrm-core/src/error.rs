//! Error types for IQRM.
//!
//! Every failure is raised eagerly, before any computation, so there is no
//! partial result to recover. Variants are distinct per cause so callers can
//! branch on "bad radius" vs "bad threshold" vs "bad input", and each carries
//! a stable numeric code:
//! - 10-19: parameter errors
//! - 20-29: input errors
//! - 30-39: configuration errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use iqrm_config::ValidationError;

/// Result type alias for IQRM operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Flagging parameters (radius, threshold, lag growth).
    Parameter,
    /// The signal or the ignore set.
    Input,
    /// Configuration files.
    Config,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Parameter => write!(f, "parameter"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Config => write!(f, "config"),
        }
    }
}

/// Unified error type for IQRM.
#[derive(Error, Debug)]
pub enum Error {
    // Parameter errors (10-19)
    #[error("radius must be a positive integer, got {value}")]
    InvalidRadius { value: f64 },

    #[error("threshold must be a positive real number, got {value}")]
    InvalidThreshold { value: f64 },

    #[error("geometric factor must be finite and >= 1, got {value}")]
    InvalidGeometricFactor { value: f64 },

    // Input errors (20-29)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("ignore index {index} out of range for input of length {len}")]
    InvalidIgnoreIndex { index: usize, len: usize },

    // Configuration errors (30-39)
    #[error("configuration error: {0}")]
    Config(#[from] ValidationError),
}

impl Error {
    /// Returns the stable error code for this error type.
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidRadius { .. } => 10,
            Error::InvalidThreshold { .. } => 11,
            Error::InvalidGeometricFactor { .. } => 12,
            Error::InvalidInput(_) => 20,
            Error::InvalidIgnoreIndex { .. } => 21,
            Error::Config(_) => 30,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidRadius { .. }
            | Error::InvalidThreshold { .. }
            | Error::InvalidGeometricFactor { .. } => ErrorCategory::Parameter,

            Error::InvalidInput(_) | Error::InvalidIgnoreIndex { .. } => ErrorCategory::Input,

            Error::Config(_) => ErrorCategory::Config,
        }
    }
}
