//! Runtime error types.

use thiserror::Error;

/// Errors that can occur during runtime startup and shutdown.
///
/// Only startup errors are fatal; once the dispatch loop runs, component
/// and conversion errors stay inside their own tasks.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration loading failed.
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Creating a runtime directory failed.
    #[error("failed to prepare directory '{path}': {source}")]
    Bootstrap {
        /// The directory being created.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
