//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::config::IqrmConfig;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate an IQRM configuration semantically.
pub fn validate_config(config: &IqrmConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    if config.radius == 0 {
        return Err(ValidationError::InvalidValue {
            field: "radius".to_string(),
            message: "Must be a positive integer, got 0".to_string(),
        });
    }

    validate_positive("threshold", config.threshold)?;

    if !config.geometric_factor.is_finite() || config.geometric_factor < 1.0 {
        return Err(ValidationError::InvalidValue {
            field: "geometric_factor".to_string(),
            message: format!("Must be finite and >= 1.0, got {}", config.geometric_factor),
        });
    }

    Ok(())
}

fn validate_positive(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("Must be a positive real number, got {}", value),
        });
    }
    Ok(())
}
