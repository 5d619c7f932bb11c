//! Configuration resolution and path discovery.
//!
//! Resolution order: explicit path → environment variables → XDG paths →
//! system config → defaults.

use std::path::{Path, PathBuf};

use crate::config::IqrmConfig;
use crate::validate::{validate_config, ValidationResult};

/// A discovered configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigPath {
    /// Path to the config file (or None if not found).
    pub path: Option<PathBuf>,

    /// Where the path came from (for diagnostics).
    pub source: ConfigSource,
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided by the caller.
    Explicit,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/iqrm/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Explicit => write!(f, "explicit path"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_CONFIG_PATH: &str = "IQRM_CONFIG";
pub const ENV_CONFIG_DIR: &str = "IQRM_CONFIG_DIR";

/// Config file names, in lookup order.
const CONFIG_FILENAMES: [&str; 2] = ["iqrm.toml", "iqrm.json"];

/// Application name for XDG directories.
const APP_NAME: &str = "iqrm";

/// Resolve the configuration path.
///
/// 1. Explicit path (if provided and present)
/// 2. `IQRM_CONFIG` (direct path)
/// 3. `IQRM_CONFIG_DIR` + file name
/// 4. XDG config directory (~/.config/iqrm/)
/// 5. System config (/etc/iqrm/)
/// 6. Built-in defaults (None)
pub fn resolve_config(explicit: Option<&Path>) -> ConfigPath {
    if let Some(path) = explicit {
        if path.exists() {
            return found(path.to_path_buf(), ConfigSource::Explicit);
        }
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return found(path, ConfigSource::Environment);
        }
    }

    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        if let Some(path) = first_existing(&PathBuf::from(dir)) {
            return found(path, ConfigSource::Environment);
        }
    }

    if let Some(dir) = xdg_config_dir() {
        if let Some(path) = first_existing(&dir) {
            return found(path, ConfigSource::XdgConfig);
        }
    }

    if let Some(path) = first_existing(&system_config_dir()) {
        return found(path, ConfigSource::SystemConfig);
    }

    ConfigPath::default()
}

/// Resolve, load and validate the configuration.
///
/// Falls back to [`IqrmConfig::default`] when no file is found.
pub fn load_config(explicit: Option<&Path>) -> ValidationResult<(IqrmConfig, ConfigSource)> {
    let resolved = resolve_config(explicit);
    let config = match &resolved.path {
        Some(path) => IqrmConfig::from_file(path)?,
        None => IqrmConfig::default(),
    };
    validate_config(&config)?;
    Ok((config, resolved.source))
}

fn found(path: PathBuf, source: ConfigSource) -> ConfigPath {
    ConfigPath {
        path: Some(path),
        source,
    }
}

fn first_existing(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Get the XDG config directory for iqrm.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}
