//! # Waymark
//!
//! A conversational message-handling core for a chat bot: addressable
//! handler components behind one router, a per-user stack-based dialog
//! state machine, and a GPS track conversion pipeline that delegates to an
//! external converter binary or a built-in codec.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐     ┌────────┐     ┌──────────────────┐
//! │ Transport │────▶│ Router │────▶│ InteractiveMenu  │──▶ per-user sessions
//! │ (updates) │     │        │────▶│ TrackConverter   │──▶ conversion strategies
//! └───────────┘     └────────┘     └──────────────────┘
//!       ▲                                   │
//!       └────────── outbound queue ◀────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waymark::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new().load()?;
//!     let runtime = Runtime::new(config, my_transport)?;
//!     runtime.run(updates).await?;
//!     Ok(())
//! }
//! ```

pub use waymark_convert as convert;
pub use waymark_core as core;
pub use waymark_dialog as dialog;
pub use waymark_runtime as runtime;

/// Prelude module for convenient imports.
pub mod prelude {
    // Runtime - main entry point
    pub use waymark_runtime::{ConfigLoader, Runtime, WaymarkConfig};

    // Routing core
    pub use waymark_core::{
        Component, ComponentId, Outbound, Outbox, Router, Transport, Update,
    };

    // Standard components
    pub use waymark_convert::{ConverterConfig, StrategyKind, TrackConverter};
    pub use waymark_dialog::InteractiveMenu;
}
