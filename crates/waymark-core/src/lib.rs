//! # Waymark Core
//!
//! Routing core for the Waymark conversational bot.
//!
//! This crate provides the building blocks shared by every component of the
//! bot: the inbound event model, the outbound message queue, the component
//! registry and the [`Router`] that demultiplexes events onto it.
//!
//! ## Hub-and-Spoke Dispatch
//!
//! All inbound events flow through the central [`Router`]:
//!
//! ```text
//! ┌───────────┐     ┌─────────┐     ┌────────────┐
//! │ Transport │────▶│ Router  │────▶│ Component  │
//! │ (updates) │     │ (core)  │────▶│ Component  │
//! └───────────┘     └─────────┘────▶│ Component  │
//!                                   └────────────┘
//! ```
//!
//! A callback query carries a `"<componentId>|<tail>"` payload and is routed
//! to exactly one component; a plain message is offered to every registered
//! component, each of which decides relevance on its own.
//!
//! Outbound traffic converges on a single [`Outbox`] queue drained by one
//! sender task, so sends reach the transport in FIFO enqueue order.

pub mod component;
pub mod error;
pub mod event;
pub mod outbound;
pub mod outbox;
pub mod router;
pub mod transport;

pub use component::{callback_payload, Component, ComponentId, ConfigSnapshot, IdCell};
pub use error::{RoutingError, RoutingResult, TransportError, TransportResult};
pub use event::{CallbackQuery, Chat, ChatKind, Document, Message, Update, User};
pub use outbound::{DocumentUpload, InlineButton, KeyboardMessage, Outbound, TextMessage};
pub use outbox::{outbound_channel, Outbox};
pub use router::Router;
pub use transport::{BoxedTransport, Transport};
