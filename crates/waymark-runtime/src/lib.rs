//! # Waymark Runtime
//!
//! Orchestration layer: configuration loading, logging setup, component
//! configuration persistence, and the main event loop tying the router, the
//! outbound sender task and the transport together.

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod store;

pub use config::{ConfigLoader, LoggingConfig, WaymarkConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use runtime::Runtime;
pub use store::ConfigStore;
