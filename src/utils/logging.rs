//! Structured logging bootstrap.
//!
//! The codec itself only emits `tracing` events. Embedding applications call
//! [`init_logging`] once to install a subscriber built from [`LoggingConfig`].
//! `RUST_LOG` takes precedence over the configured level.

use crate::config::LoggingConfig;
use crate::error::{ProtocolError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Build the env filter for `config`
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level).into())
        .from_env_lossy()
}

/// Install the global subscriber.
///
/// Fails with `ConfigError` if the config is invalid, the log file cannot be
/// opened, or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ProtocolError::ConfigError(errors.join("; ")));
    }

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.log_to_console {
        let layer = fmt::layer().with_target(true);
        layers.push(if config.json_format {
            layer.json().boxed()
        } else {
            layer.boxed()
        });
    }

    if config.log_to_file {
        if let Some(path) = &config.log_file_path {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    ProtocolError::ConfigError(format!("Failed to open log file {path}: {e}"))
                })?;
            let layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
            layers.push(if config.json_format {
                layer.json().boxed()
            } else {
                layer.boxed()
            });
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter(config))
        .try_init()
        .map_err(|e| ProtocolError::ConfigError(format!("Failed to install subscriber: {e}")))?;

    tracing::info!(app = %config.app_name, "Logging initialized");
    Ok(())
}
