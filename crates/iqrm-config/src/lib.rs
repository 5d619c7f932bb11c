//! IQRM configuration loading and validation.
//!
//! This crate provides:
//! - The typed `IqrmConfig` struct (JSON or TOML on disk)
//! - Config resolution (explicit path → env → XDG → system → defaults)
//! - Semantic validation

pub mod config;
pub mod resolve;
pub mod validate;

pub use config::{IgnorePolicy, IqrmConfig};
pub use resolve::{load_config, resolve_config, ConfigPath, ConfigSource};
pub use validate::{validate_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

/// Default neighbourhood radius, in array elements.
pub const DEFAULT_RADIUS: usize = 5;

/// Default flagging threshold, in Gaussian sigmas.
pub const DEFAULT_THRESHOLD: f64 = 3.0;

/// Default growth factor between consecutive probed lags.
pub const DEFAULT_GEOMETRIC_FACTOR: f64 = 1.5;
