//! One user's conversation session.

use tracing::{debug, warn};

use waymark_core::{ComponentId, Message, Outbox};

use crate::state::{State, StateCx, Transition, TransitionData};
use crate::states::Hello;

/// A per-user conversation: a non-empty stack of states, the last inbound
/// message, and a single hand-off slot.
///
/// Sessions live in memory for the process lifetime; nothing is persisted
/// across restarts. Access is serialized per user by the owning menu, so
/// methods take `&mut self` without further locking.
pub struct Session {
    component_id: ComponentId,
    user_id: i64,
    outbox: Outbox,
    stack: Vec<Box<dyn State>>,
    last_message: Message,
    slot: Option<TransitionData>,
}

impl Session {
    /// Opens a session for `message.from`, entering the initial [`Hello`]
    /// state before the constructor returns.
    pub async fn open(component_id: ComponentId, outbox: Outbox, message: &Message) -> Self {
        let mut session = Self {
            component_id,
            user_id: message.from.id,
            outbox,
            stack: Vec::new(),
            last_message: message.clone(),
            slot: None,
        };
        session.push(Box::new(Hello::default())).await;
        session
    }

    /// Current stack depth. Always at least 1.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Name of the active state.
    pub fn active_state(&self) -> &'static str {
        match self.stack.last() {
            Some(state) => state.name(),
            None => "<empty>",
        }
    }

    /// Records `message` as the last inbound message and forwards it to the
    /// active state, then executes the returned transition.
    pub async fn update(&mut self, message: Message) {
        self.last_message = message;
        let Some(mut top) = self.stack.pop() else {
            return;
        };
        let message = self.last_message.clone();
        let transition = {
            let mut cx = self.state_cx(&message);
            top.update(&mut cx).await
        };
        self.stack.push(top);
        self.apply(transition).await;
    }

    /// Forwards a callback answer to the active state and executes the
    /// returned transition.
    pub async fn update_callback(&mut self, answer: &str) {
        let Some(mut top) = self.stack.pop() else {
            return;
        };
        let message = self.last_message.clone();
        let transition = {
            let mut cx = self.state_cx(&message);
            top.update_callback(&mut cx, answer).await
        };
        self.stack.push(top);
        self.apply(transition).await;
    }

    async fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Push(state) => self.push(state).await,
            Transition::Pop => self.pop().await,
        }
    }

    /// Enters `state` and pushes it on top of the stack.
    async fn push(&mut self, mut state: Box<dyn State>) {
        debug!(user_id = self.user_id, state = state.name(), "entering state");
        let message = self.last_message.clone();
        {
            let mut cx = self.state_cx(&message);
            state.on_enter(&mut cx).await;
        }
        self.stack.push(state);
    }

    /// Exits the active state and pops it.
    ///
    /// Popping the sole remaining state is rejected as a no-op; the stack is
    /// never left empty.
    async fn pop(&mut self) {
        if self.stack.len() <= 1 {
            warn!(user_id = self.user_id, "refusing to pop the last state");
            return;
        }
        let Some(mut top) = self.stack.pop() else {
            return;
        };
        debug!(user_id = self.user_id, state = top.name(), "exiting state");
        let message = self.last_message.clone();
        let mut cx = self.state_cx(&message);
        top.on_exit(&mut cx).await;
    }

    fn state_cx<'a>(&'a mut self, message: &'a Message) -> StateCx<'a> {
        StateCx {
            component_id: self.component_id,
            user_id: self.user_id,
            message,
            outbox: &self.outbox,
            slot: &mut self.slot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use waymark_core::{outbound_channel, Chat, ChatKind, User};

    /// Pops unconditionally, to exercise the underflow guard.
    struct Quitter;

    #[async_trait]
    impl State for Quitter {
        fn name(&self) -> &'static str {
            "quitter"
        }

        async fn on_enter(&mut self, _cx: &mut StateCx<'_>) {}

        async fn update(&mut self, _cx: &mut StateCx<'_>) -> Transition {
            Transition::Pop
        }
    }

    fn message(text: &str) -> Message {
        Message {
            message_id: 1,
            chat: Chat {
                id: 5,
                kind: ChatKind::Private,
            },
            from: User {
                id: 5,
                username: None,
            },
            text: text.to_string(),
            document: None,
            reply_to: None,
        }
    }

    #[tokio::test]
    async fn first_contact_leaves_exactly_one_state() {
        let (outbox, _rx) = outbound_channel();
        let session = Session::open(ComponentId(0), outbox, &message("hi")).await;
        assert_eq!(session.depth(), 1);
        assert_eq!(session.active_state(), "hello");
    }

    #[tokio::test]
    async fn popping_the_sole_state_is_a_no_op() {
        let (outbox, _rx) = outbound_channel();
        let mut session = Session::open(ComponentId(0), outbox, &message("hi")).await;

        // Swap the initial state for one that always pops.
        session.stack.clear();
        session.stack.push(Box::new(Quitter));

        session.update(message("anything")).await;
        assert_eq!(session.depth(), 1);
        assert_eq!(session.active_state(), "quitter");
    }
}
