//! # Configuration Management
//!
//! Protocol constants and runtime configuration for the message format.
//!
//! The constants below define the wire contract. `CodecConfig` lets a node
//! pin a different compatibility version (e.g. while staging a layout change)
//! and configures logging.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()` / `from_toml()`
//! - `DHT_MSGFORMAT_*` environment variables via `from_env()`
//!
//! Every loader validates before returning, so a config that loads is usable.

use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Level;

/// Wire layout version this build speaks
pub const COMPAT_VERSION: u8 = 1;

/// Length in bytes of generated transaction ids
pub const RPC_ID_LENGTH: usize = 20;

/// Length in bytes of a node id (384-bit key space)
pub const NODE_ID_LENGTH: usize = 48;

/// Upper bound accepted for `format.strict_node_id_len`
const MAX_STRICT_NODE_ID_LEN: usize = 1024;

/// Upper bound on `logging.app_name`, in bytes
const MAX_APP_NAME_LEN: usize = 64;

const ENV_COMPAT_VERSION: &str = "DHT_MSGFORMAT_COMPAT_VERSION";
const ENV_STRICT_NODE_ID_LEN: &str = "DHT_MSGFORMAT_STRICT_NODE_ID_LEN";
const ENV_LOG_LEVEL: &str = "DHT_MSGFORMAT_LOG_LEVEL";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CodecConfig {
    /// Message format settings
    #[serde(default)]
    pub format: FormatConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CodecConfig {
    /// Read and validate a TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ProtocolError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate TOML text. Missing tables and keys take defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ProtocolError::ConfigError(format!("invalid codec TOML: {e}")))?;
        config.ensure_valid()?;
        Ok(config)
    }

    /// Defaults with `DHT_MSGFORMAT_*` environment overrides applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.ensure_valid()?;
        Ok(config)
    }

    /// Overlay variables looked up through `lookup`. A variable that is set but
    /// does not parse is an error rather than being skipped.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_COMPAT_VERSION) {
            self.format.compat_version = parse_env(ENV_COMPAT_VERSION, &raw)?;
        }
        if let Some(raw) = lookup(ENV_STRICT_NODE_ID_LEN) {
            self.format.strict_node_id_len = Some(parse_env(ENV_STRICT_NODE_ID_LEN, &raw)?);
        }
        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            self.logging.log_level = parse_env(ENV_LOG_LEVEL, &raw)?;
        }
        Ok(())
    }

    /// Every problem found in both sections; empty when the config is usable
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.format.validate();
        errors.extend(self.logging.validate());
        errors
    }

    /// `validate` folded into a single `ConfigError`
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        Err(ProtocolError::ConfigError(format!(
            "codec config rejected: {}",
            errors.join("; ")
        )))
    }
}

fn parse_env<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ProtocolError::ConfigError(format!("{key}={raw:?}: {e}")))
}

/// Message format settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Compatibility version expected on decode and stamped on encode
    pub compat_version: u8,

    /// When set, node ids of any other length are rejected
    pub strict_node_id_len: Option<usize>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            compat_version: COMPAT_VERSION,
            strict_node_id_len: None,
        }
    }
}

impl FormatConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.compat_version == 0 {
            errors.push("format.compat_version must be at least 1".to_string());
        }

        match self.strict_node_id_len {
            Some(len) if len == 0 || len > MAX_STRICT_NODE_ID_LEN => errors.push(format!(
                "format.strict_node_id_len must be between 1 and {MAX_STRICT_NODE_ID_LEN} \
                 (got {len})"
            )),
            _ => {}
        }

        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Application name attached to the startup event
    pub app_name: String,

    /// Log level, overridden by `RUST_LOG` when set
    #[serde(with = "level_name")]
    pub log_level: Level,

    pub log_to_console: bool,

    pub log_to_file: bool,

    /// Appended to, created if missing. Required when `log_to_file` is set.
    pub log_file_path: Option<String>,

    /// One JSON object per event instead of the human-readable format
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("dht-msgformat"),
            log_level: Level::INFO,
            log_to_console: true,
            log_to_file: false,
            log_file_path: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Checks the outputs `init_logging` would open
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("logging.app_name must not be empty".to_string());
        } else if self.app_name.len() > MAX_APP_NAME_LEN {
            errors.push(format!(
                "logging.app_name is {} bytes (limit {MAX_APP_NAME_LEN})",
                self.app_name.len()
            ));
        }

        match (self.log_to_file, &self.log_file_path) {
            (true, None) => {
                errors.push("logging.log_file_path is required with log_to_file".to_string());
            }
            (true, Some(path)) => {
                let missing_dir = Path::new(path)
                    .parent()
                    .filter(|dir| !dir.as_os_str().is_empty() && !dir.is_dir());
                if let Some(dir) = missing_dir {
                    errors.push(format!(
                        "logging.log_file_path directory {} is missing",
                        dir.display()
                    ));
                }
            }
            (false, _) => {}
        }

        if !self.log_to_console && !self.log_to_file {
            errors.push("logging has no output: enable log_to_console or log_to_file".to_string());
        }

        errors
    }
}

/// Levels are written lowercase and read case-insensitively
mod level_name {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::borrow::Cow;
    use tracing::Level;

    pub fn serialize<S: Serializer>(level: &Level, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&level.as_str().to_ascii_lowercase())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Level, D::Error> {
        let name = Cow::<'de, str>::deserialize(deserializer)?;
        name.parse().map_err(|_| {
            D::Error::custom(format!(
                "unknown log level {name:?}, expected trace, debug, info, warn or error"
            ))
        })
    }
}
