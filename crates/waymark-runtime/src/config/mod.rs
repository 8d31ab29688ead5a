//! Configuration module for the Waymark runtime.
//!
//! Provides layered configuration loading (defaults, TOML file, `WAYMARK_*`
//! environment variables) and the schema structs.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{LoggingConfig, WaymarkConfig};
