//! Component trait and addressing.
//!
//! A component is a registrable inbound-event handler. The [`Router`]
//! assigns each component a small sequential [`ComponentId`] at
//! registration; components embed that id in the callback payloads of any
//! inline keyboards they send, which is how later callbacks find their way
//! back.
//!
//! [`Router`]: crate::router::Router

use std::fmt;
use std::sync::OnceLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::event::{CallbackQuery, Message};

/// Routing key for a registered component.
///
/// Assigned once at registration, in registration order, and stable for the
/// process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub usize);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a callback payload addressed to `id`.
///
/// Wire format: `"<componentId>|<field1>|<field2>…"`, pipe-delimited.
pub fn callback_payload(id: ComponentId, fields: &[&str]) -> String {
    format!("{id}|{}", fields.join("|"))
}

/// A component's configuration, snapshotted for persistence.
///
/// The key is a stable per-component-type string; the persistence
/// collaborator stores one JSON document per key and loads it back on the
/// next startup.
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    /// Stable storage key.
    pub key: &'static str,
    /// Serialized configuration fields.
    pub value: serde_json::Value,
}

/// A registrable inbound-event handler.
///
/// Plain messages are offered to every component; each decides relevance on
/// its own (typically by chat type or attachment presence). Callback queries
/// reach exactly one component, with the component-id prefix already
/// stripped from the payload.
#[async_trait]
pub trait Component: Send + Sync {
    /// Human-readable component name, used in logs.
    fn name(&self) -> &'static str;

    /// Stores the id assigned at registration.
    ///
    /// Called exactly once, before dispatch begins.
    fn bind(&self, id: ComponentId);

    /// Handles a plain inbound message.
    async fn handle_message(&self, message: &Message);

    /// Handles a callback query addressed to this component.
    ///
    /// `tail` is the payload after the leading `"<componentId>|"` prefix,
    /// unsplit; the component owns any further field splitting.
    async fn handle_callback(&self, query: &CallbackQuery, tail: &str);

    /// Returns the configuration to persist on shutdown, if any.
    fn config_snapshot(&self) -> Option<ConfigSnapshot> {
        None
    }
}

/// Single-assignment cell for a component's registration id.
///
/// Components hold one of these so construction can precede registration.
#[derive(Debug, Default)]
pub struct IdCell(OnceLock<ComponentId>);

impl IdCell {
    /// Creates an unbound cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the id. A second bind is a registration bug.
    pub fn bind(&self, id: ComponentId) {
        if self.0.set(id).is_err() {
            panic!("component id bound twice");
        }
    }

    /// Returns the bound id.
    ///
    /// # Panics
    ///
    /// Panics if called before registration; components only run after the
    /// router has bound them.
    pub fn get(&self) -> ComponentId {
        *self
            .0
            .get()
            .unwrap_or_else(|| panic!("component used before registration"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_joins_fields_after_id() {
        let payload = callback_payload(ComponentId(3), &["file-1", "ozi"]);
        assert_eq!(payload, "3|file-1|ozi");
    }

    #[test]
    fn payload_with_no_fields_keeps_trailing_delimiter_shape() {
        assert_eq!(callback_payload(ComponentId(0), &[]), "0|");
    }

    #[test]
    #[should_panic(expected = "bound twice")]
    fn id_cell_rejects_double_bind() {
        let cell = IdCell::new();
        cell.bind(ComponentId(0));
        cell.bind(ComponentId(1));
    }
}
