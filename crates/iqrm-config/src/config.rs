//! Typed IQRM configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;
use crate::{CONFIG_SCHEMA_VERSION, DEFAULT_GEOMETRIC_FACTOR, DEFAULT_RADIUS, DEFAULT_THRESHOLD};

/// What to do with ignore indices that fall outside the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IgnorePolicy {
    /// Fail the run with an invalid-ignore-index error.
    #[default]
    Reject,
    /// Discard the index and carry on.
    Drop,
}

impl std::str::FromStr for IgnorePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" | "error" | "strict" => Ok(IgnorePolicy::Reject),
            "drop" | "skip" | "lenient" => Ok(IgnorePolicy::Drop),
            _ => Err(format!("unknown ignore policy: {}", s)),
        }
    }
}

impl std::fmt::Display for IgnorePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnorePolicy::Reject => write!(f, "reject"),
            IgnorePolicy::Drop => write!(f, "drop"),
        }
    }
}

/// Flagging parameters as read from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IqrmConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Maximum lag magnitude, in array elements.
    #[serde(default = "default_radius")]
    pub radius: usize,

    /// Flagging threshold in Gaussian sigmas.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Growth factor of the lag schedule.
    #[serde(default = "default_geometric_factor")]
    pub geometric_factor: f64,

    #[serde(default)]
    pub ignore_policy: IgnorePolicy,

    /// Positions known to be bad for every input (e.g. a receiver's dead channels).
    #[serde(default)]
    pub ignore: Vec<usize>,
}

fn default_schema_version() -> String {
    CONFIG_SCHEMA_VERSION.to_string()
}

fn default_radius() -> usize {
    DEFAULT_RADIUS
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_geometric_factor() -> f64 {
    DEFAULT_GEOMETRIC_FACTOR
}

impl Default for IqrmConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            radius: DEFAULT_RADIUS,
            threshold: DEFAULT_THRESHOLD,
            geometric_factor: DEFAULT_GEOMETRIC_FACTOR,
            ignore_policy: IgnorePolicy::default(),
            ignore: Vec::new(),
        }
    }
}

impl IqrmConfig {
    /// Load a config file; `.toml` files are parsed as TOML, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    /// Parse a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Parse a config from a TOML string.
    pub fn from_toml_str(text: &str) -> Result<Self, ValidationError> {
        toml::from_str(text).map_err(|e| ValidationError::ParseError(format!("Invalid TOML: {}", e)))
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_ignore_policy(mut self, policy: IgnorePolicy) -> Self {
        self.ignore_policy = policy;
        self
    }
}
