//! Subscriber setup for binaries and tests embedding the engine.
//!
//! The library only emits `tracing` events; nothing is printed unless a
//! subscriber is installed. All output goes to stderr so stdout stays free
//! for payloads.
//!
//! ```ignore
//! use iqrm_core::logging::{init_logging, LogConfig, LogFormat};
//!
//! init_logging(&LogConfig::from_env().with_format(LogFormat::Jsonl));
//! ```

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel, ENV_LOG_FORMAT, ENV_LOG_LEVEL};

use std::io::IsTerminal;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a global subscriber for `config`.
///
/// `RUST_LOG` takes precedence over the configured level. Returns false when
/// a global subscriber was already set; the existing one is kept.
pub fn init_logging(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.directive()));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Human => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal());
            if config.timestamps {
                registry.with(layer).try_init().is_ok()
            } else {
                registry.with(layer.without_time()).try_init().is_ok()
            }
        }
        LogFormat::Jsonl => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .try_init()
            .is_ok(),
    }
}

/// Install a subscriber configured from the environment.
pub fn init_default_logging() -> bool {
    init_logging(&LogConfig::from_env())
}
