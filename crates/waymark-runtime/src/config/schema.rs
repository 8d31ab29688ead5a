//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaymarkConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Base working directory; `runtime/` and `config/` live under it.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// Converter settings used when no persisted component config exists.
    #[serde(default)]
    pub converter: waymark_convert::ConverterConfig,
}

impl Default for WaymarkConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            work_dir: default_work_dir(),
            converter: waymark_convert::ConverterConfig::default(),
        }
    }
}

impl WaymarkConfig {
    /// Directory for staged and converted files.
    pub fn runtime_dir(&self) -> PathBuf {
        self.work_dir.join("runtime")
    }

    /// Directory for persisted per-component configuration.
    pub fn config_dir(&self) -> PathBuf {
        self.work_dir.join("config")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level directive (trace, debug, info, warn, error), overridable
    /// via `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}
