//! No-mock configuration loading + resolution tests.
//!
//! Covers:
//! - Loading real JSON and TOML files from disk
//! - Resolution order (explicit > IQRM_CONFIG > IQRM_CONFIG_DIR > XDG)
//! - Validation failures surfacing through `load_config`

use iqrm_config::resolve::{ENV_CONFIG_DIR, ENV_CONFIG_PATH};
use iqrm_config::{load_config, resolve_config, ConfigSource, IgnorePolicy, IqrmConfig, ValidationError};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const ENV_KEYS: [&str; 3] = [ENV_CONFIG_PATH, ENV_CONFIG_DIR, "XDG_CONFIG_HOME"];

struct EnvGuard {
    keys: Vec<String>,
    saved: Vec<Option<String>>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let mut saved = Vec::with_capacity(keys.len());
        for key in keys {
            saved.push(env::var(key).ok());
        }
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            saved,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (idx, key) in self.keys.iter().enumerate() {
            match self.saved.get(idx).and_then(|v| v.as_ref()) {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f()
}

/// Point every lookup location at an empty directory.
fn isolate_env(empty: &Path) -> EnvGuard {
    let guard = EnvGuard::new(&ENV_KEYS);
    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_CONFIG_DIR);
    env::set_var("XDG_CONFIG_HOME", empty);
    guard
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write config");
}

#[test]
fn loads_json_and_toml_files() {
    let dir = TempDir::new().expect("tempdir");
    let json = dir.path().join("a.json");
    let toml = dir.path().join("b.toml");
    write(&json, r#"{"radius": 7, "threshold": 4.0}"#);
    write(&toml, "radius = 9\nignore_policy = \"drop\"\n");

    let a = IqrmConfig::from_file(&json).expect("json config");
    assert_eq!(a.radius, 7);
    assert_eq!(a.threshold, 4.0);

    let b = IqrmConfig::from_file(&toml).expect("toml config");
    assert_eq!(b.radius, 9);
    assert_eq!(b.ignore_policy, IgnorePolicy::Drop);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let err = IqrmConfig::from_file(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ValidationError::IoError(_)));
    assert_eq!(err.code(), 60);
}

#[test]
fn explicit_path_wins_over_env() {
    with_env_lock(|| {
        let dir = TempDir::new().expect("tempdir");
        let _guard = isolate_env(&dir.path().join("xdg"));

        let explicit = dir.path().join("explicit.json");
        let from_env = dir.path().join("env.json");
        write(&explicit, r#"{"radius": 3}"#);
        write(&from_env, r#"{"radius": 4}"#);
        env::set_var(ENV_CONFIG_PATH, &from_env);

        let resolved = resolve_config(Some(&explicit));
        assert_eq!(resolved.source, ConfigSource::Explicit);
        assert_eq!(resolved.path.as_deref(), Some(explicit.as_path()));

        let resolved = resolve_config(None);
        assert_eq!(resolved.source, ConfigSource::Environment);
        assert_eq!(resolved.path.as_deref(), Some(from_env.as_path()));
    });
}

#[test]
fn config_dir_prefers_toml() {
    with_env_lock(|| {
        let dir = TempDir::new().expect("tempdir");
        let _guard = isolate_env(&dir.path().join("xdg"));

        let conf = dir.path().join("conf");
        write(&conf.join("iqrm.json"), r#"{"radius": 2}"#);
        write(&conf.join("iqrm.toml"), "radius = 6\n");
        env::set_var(ENV_CONFIG_DIR, &conf);

        let (config, source) = load_config(None).expect("load");
        assert_eq!(source, ConfigSource::Environment);
        assert_eq!(config.radius, 6);
    });
}

// dirs only honours XDG_CONFIG_HOME on Linux.
#[cfg(target_os = "linux")]
#[test]
fn xdg_directory_is_searched() {
    with_env_lock(|| {
        let dir = TempDir::new().expect("tempdir");
        let xdg = dir.path().join("xdg");
        let _guard = isolate_env(&xdg);
        write(&xdg.join("iqrm").join("iqrm.json"), r#"{"threshold": 5.0}"#);

        let (config, source) = load_config(None).expect("load");
        assert_eq!(source, ConfigSource::XdgConfig);
        assert_eq!(config.threshold, 5.0);
    });
}

#[test]
fn invalid_values_fail_validation() {
    with_env_lock(|| {
        let dir = TempDir::new().expect("tempdir");
        let _guard = isolate_env(&dir.path().join("xdg"));

        let path = dir.path().join("bad.json");
        write(&path, r#"{"threshold": -2.0}"#);
        let err = load_config(Some(&path)).unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "threshold")
        );
    });
}
