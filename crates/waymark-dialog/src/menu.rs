//! Interactive menu component.
//!
//! Bridges the router to per-user [`Session`]s. Only private chats get a
//! session; group and channel traffic is ignored here.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};

use waymark_core::{CallbackQuery, Component, ComponentId, IdCell, Message, Outbox, RoutingError};

use crate::session::Session;

type SessionSlot = Arc<tokio::sync::Mutex<Option<Session>>>;

/// Component owning the per-user session map.
///
/// The outer map lock is held only to clone out the per-user slot; the
/// async mutex inside the slot serializes all events of one user while
/// leaving different users fully parallel.
pub struct InteractiveMenu {
    id: IdCell,
    outbox: Outbox,
    sessions: Mutex<HashMap<i64, SessionSlot>>,
}

impl InteractiveMenu {
    /// Creates the menu component.
    pub fn new(outbox: Outbox) -> Self {
        Self {
            id: IdCell::new(),
            outbox,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn session_slot(&self, user_id: i64) -> SessionSlot {
        let mut sessions = self.sessions.lock();
        Arc::clone(
            sessions
                .entry(user_id)
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(None))),
        )
    }

    fn existing_slot(&self, user_id: i64) -> Option<SessionSlot> {
        self.sessions.lock().get(&user_id).map(Arc::clone)
    }
}

#[async_trait]
impl Component for InteractiveMenu {
    fn name(&self) -> &'static str {
        "interactive menu"
    }

    fn bind(&self, id: ComponentId) {
        self.id.bind(id);
    }

    async fn handle_message(&self, message: &Message) {
        if !message.is_private() {
            return;
        }
        let user_id = message.from.id;
        let slot = self.session_slot(user_id);
        let mut guard = slot.lock().await;
        if guard.is_none() {
            debug!(user_id, "creating session");
            *guard = Some(Session::open(self.id.get(), self.outbox.clone(), message).await);
        }
        if let Some(session) = guard.as_mut() {
            session.update(message.clone()).await;
        }
    }

    async fn handle_callback(&self, _query: &CallbackQuery, tail: &str) {
        // Tail format: "<userId>|<answer>".
        let Some((user, answer)) = tail.split_once('|') else {
            warn!(
                error = %RoutingError::MalformedPayload {
                    expected: 2,
                    payload: tail.to_string(),
                },
                "dropping menu callback"
            );
            return;
        };
        let Ok(user_id) = user.parse::<i64>() else {
            warn!(user, "menu callback with unparseable user id");
            return;
        };
        let Some(slot) = self.existing_slot(user_id) else {
            warn!(user_id, "menu callback for unknown session");
            return;
        };
        let mut guard = slot.lock().await;
        if let Some(session) = guard.as_mut() {
            session.update_callback(answer).await;
        }
    }
}
