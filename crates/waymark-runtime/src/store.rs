//! Per-component configuration persistence.
//!
//! Each component type owns a stable string key; the store keeps one pretty
//! printed JSON document per key under the config directory. Configurations
//! are loaded when components are constructed and written back when the
//! router halts. A missing or unreadable file is logged and the component's
//! defaults are used instead; persistence never blocks startup.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use waymark_core::ConfigSnapshot;

/// JSON-file-backed configuration store keyed by component type.
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Loads the configuration stored under `key`, falling back to the
    /// type's defaults when the file is missing or malformed.
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.load_or(key, T::default())
    }

    /// Like [`load`](Self::load), but with an explicit fallback value.
    pub fn load_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.path_for(key);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                info!(key, path = %path.display(), error = %err, "no stored config, using defaults");
                return default;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key, "loaded stored config");
                value
            }
            Err(err) => {
                warn!(key, error = %err, "stored config is malformed, using defaults");
                default
            }
        }
    }

    /// Persists one configuration snapshot.
    pub fn save(&self, snapshot: &ConfigSnapshot) -> std::io::Result<()> {
        let rendered = serde_json::to_string_pretty(&snapshot.value)?;
        std::fs::write(self.path_for(snapshot.key), rendered)
    }

    /// Persists every snapshot, logging failures instead of aborting so one
    /// bad component cannot prevent the others from saving.
    pub fn save_all(&self, snapshots: &[ConfigSnapshot]) {
        for snapshot in snapshots {
            match self.save(snapshot) {
                Ok(()) => debug!(key = snapshot.key, "saved component config"),
                Err(err) => warn!(key = snapshot.key, error = %err, "failed to save component config"),
            }
        }
    }

    /// The directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
