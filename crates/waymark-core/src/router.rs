//! Event router.
//!
//! The [`Router`] owns the component registry and demultiplexes inbound
//! updates: a callback query goes to the one component its payload names, a
//! plain message is offered to every component in registration order.
//!
//! The registry is populated only at startup and read-only afterwards, so
//! dispatch needs no locking; the runtime shares the router behind an `Arc`
//! and spawns one task per inbound update.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::component::{Component, ComponentId, ConfigSnapshot};
use crate::error::RoutingError;
use crate::event::Update;

/// The central event router.
pub struct Router {
    /// Registered components; a component's index is its id.
    components: Vec<Arc<dyn Component>>,
}

impl Router {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Registers a component and binds its sequential id.
    ///
    /// Must only be called before dispatch begins; the registry is treated
    /// as immutable once updates start flowing.
    pub fn register(&mut self, component: Arc<dyn Component>) -> ComponentId {
        let id = ComponentId(self.components.len());
        component.bind(id);
        debug!(id = %id, name = component.name(), "registered component");
        self.components.push(component);
        id
    }

    /// Returns the number of registered components.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Dispatches one inbound update.
    ///
    /// Routing errors (unparseable payload, unknown component id) are logged
    /// and dropped with no side effects: no outbound message, no panic.
    pub async fn dispatch(&self, update: Update) {
        match update {
            Update::Callback(query) => match split_payload(&query.data) {
                Ok((id, tail)) => match self.components.get(id.0) {
                    Some(component) => {
                        debug!(id = %id, name = component.name(), "dispatching callback");
                        component.handle_callback(&query, tail).await;
                    }
                    None => {
                        warn!(
                            error = %RoutingError::UnknownComponent { id: id.0 },
                            "dropping callback"
                        );
                    }
                },
                Err(err) => warn!(error = %err, "dropping callback"),
            },
            Update::Message(message) => {
                for component in &self.components {
                    component.handle_message(&message).await;
                }
            }
        }
    }

    /// Collects every component's configuration snapshot for persistence.
    ///
    /// Invoked on shutdown; the persistence collaborator writes the
    /// snapshots out.
    pub fn halt(&self) -> Vec<ConfigSnapshot> {
        self.components
            .iter()
            .filter_map(|c| c.config_snapshot())
            .collect()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits a callback payload once on `|` into `(componentId, tail)`.
///
/// The tail is deliberately left unsplit; the addressed component owns any
/// further field splitting of its own payload.
fn split_payload(data: &str) -> Result<(ComponentId, &str), RoutingError> {
    let (head, tail) = data.split_once('|').unwrap_or((data, ""));
    let id = head
        .parse::<usize>()
        .map_err(|_| RoutingError::InvalidComponentId {
            payload: data.to_string(),
        })?;
    Ok((ComponentId(id), tail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::IdCell;
    use crate::event::{CallbackQuery, Chat, ChatKind, Message, User};

    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct ProbeComponent {
        id: IdCell,
        messages: AtomicUsize,
        callbacks: AtomicUsize,
        last_tail: Mutex<Option<String>>,
    }

    #[async_trait]
    impl Component for ProbeComponent {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn bind(&self, id: ComponentId) {
            self.id.bind(id);
        }

        async fn handle_message(&self, _message: &Message) {
            self.messages.fetch_add(1, Ordering::SeqCst);
        }

        async fn handle_callback(&self, _query: &CallbackQuery, tail: &str) {
            self.callbacks.fetch_add(1, Ordering::SeqCst);
            *self.last_tail.lock().unwrap() = Some(tail.to_string());
        }
    }

    fn message(text: &str) -> Message {
        Message {
            message_id: 1,
            chat: Chat {
                id: 10,
                kind: ChatKind::Private,
            },
            from: User {
                id: 100,
                username: None,
            },
            text: text.to_string(),
            document: None,
            reply_to: None,
        }
    }

    fn callback(data: &str) -> CallbackQuery {
        CallbackQuery {
            from: User {
                id: 100,
                username: None,
            },
            message: message(""),
            data: data.to_string(),
        }
    }

    #[test]
    fn registration_order_determines_ids() {
        let mut router = Router::new();
        let a = router.register(Arc::new(ProbeComponent::default()));
        let b = router.register(Arc::new(ProbeComponent::default()));
        let c = router.register(Arc::new(ProbeComponent::default()));
        assert_eq!((a, b, c), (ComponentId(0), ComponentId(1), ComponentId(2)));
    }

    #[tokio::test]
    async fn plain_message_reaches_every_component() {
        let first = Arc::new(ProbeComponent::default());
        let second = Arc::new(ProbeComponent::default());

        let mut router = Router::new();
        router.register(Arc::clone(&first) as Arc<dyn Component>);
        router.register(Arc::clone(&second) as Arc<dyn Component>);

        router.dispatch(Update::Message(message("hi"))).await;

        assert_eq!(first.messages.load(Ordering::SeqCst), 1);
        assert_eq!(second.messages.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn callback_reaches_only_the_addressed_component() {
        let first = Arc::new(ProbeComponent::default());
        let second = Arc::new(ProbeComponent::default());

        let mut router = Router::new();
        router.register(Arc::clone(&first) as Arc<dyn Component>);
        router.register(Arc::clone(&second) as Arc<dyn Component>);

        router
            .dispatch(Update::Callback(callback("1|file-9|ozi")))
            .await;

        assert_eq!(first.callbacks.load(Ordering::SeqCst), 0);
        assert_eq!(second.callbacks.load(Ordering::SeqCst), 1);
        assert_eq!(
            second.last_tail.lock().unwrap().as_deref(),
            Some("file-9|ozi")
        );
    }

    #[tokio::test]
    async fn unknown_component_id_is_dropped_silently() {
        let probe = Arc::new(ProbeComponent::default());
        let mut router = Router::new();
        router.register(Arc::clone(&probe) as Arc<dyn Component>);

        router.dispatch(Update::Callback(callback("7|x"))).await;
        router.dispatch(Update::Callback(callback("junk|x"))).await;

        assert_eq!(probe.callbacks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn payload_split_keeps_tail_unsplit() {
        let (id, tail) = split_payload("2|a|b|c").unwrap();
        assert_eq!(id, ComponentId(2));
        assert_eq!(tail, "a|b|c");

        let (id, tail) = split_payload("0").unwrap();
        assert_eq!(id, ComponentId(0));
        assert_eq!(tail, "");
    }
}
