//! Configuration loader using figment.
//!
//! Layering, lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. TOML file (`waymark.toml` in the current directory by default)
//! 3. Environment variables (`WAYMARK_*`, `__` as section separator)
//!
//! A missing configuration file is not an error: the loader logs it and
//! continues with defaults, so a bare checkout runs out of the box.
//!
//! # Environment Variable Mapping
//!
//! - `WAYMARK_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `WAYMARK_CONVERTER__BINARY_NAME=gpsbabel` → `converter.binary_name`

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use tracing::debug;

use super::schema::WaymarkConfig;
use crate::error::{RuntimeError, RuntimeResult};

/// Default configuration file name searched in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "waymark.toml";

/// Layered configuration loader.
///
/// ```rust,ignore
/// let config = ConfigLoader::new()
///     .file("config/waymark.toml")
///     .load()?;
/// ```
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    load_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader with default sources.
    pub fn new() -> Self {
        Self {
            config_file: None,
            load_env: true,
        }
    }

    /// Loads from a specific file instead of the default location.
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Disables the environment variable layer.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Extracts the merged configuration.
    pub fn load(self) -> RuntimeResult<WaymarkConfig> {
        let file = self
            .config_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        debug!(file = %file.display(), "loading configuration");

        let mut figment =
            Figment::from(Serialized::defaults(WaymarkConfig::default())).merge(Toml::file(file));
        if self.load_env {
            figment = figment.merge(Env::prefixed("WAYMARK_").split("__"));
        }
        figment
            .extract()
            .map_err(|err| RuntimeError::Config(Box::new(err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ConfigLoader::new()
            .file("/nonexistent/waymark.toml")
            .without_env()
            .load()
            .unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "work_dir = \"/srv/bot\"\n[logging]\nlevel = \"debug\"\n[converter]\nstrategy = \"library\""
        )
        .unwrap();

        let config = ConfigLoader::new()
            .file(file.path())
            .without_env()
            .load()
            .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.work_dir, PathBuf::from("/srv/bot"));
        assert_eq!(
            config.converter.strategy,
            waymark_convert::StrategyKind::Library
        );
    }
}
