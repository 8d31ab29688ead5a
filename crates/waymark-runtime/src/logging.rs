//! Logging setup.
//!
//! Initializes a `tracing-subscriber` fmt layer with an [`EnvFilter`] built
//! from the configured level; `RUST_LOG` takes precedence when set.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initializes global logging from configuration.
///
/// Safe to call more than once; later calls are no-ops (relevant in tests,
/// where several runtimes may be created in one process).
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
