//! State trait, transitions and the typed hand-off slot.

use async_trait::async_trait;

use waymark_core::{callback_payload, ComponentId, InlineButton, KeyboardMessage, Message, Outbound, Outbox};

/// Data handed from one state to its successor at a transition.
///
/// A closed union rather than an opaque box: the receiving state matches on
/// the variant it expects and treats anything else as a programming error.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionData {
    /// Completed registration, produced by [`Hello`] on confirmation.
    ///
    /// [`Hello`]: crate::states::Hello
    Registration(RegistrationInfo),
}

/// The slot-filling result of the registration dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationInfo {
    /// Given name, first text answer.
    pub first_name: String,
    /// Family name, second text answer.
    pub last_name: String,
    /// Whether the user confirmed the pair via the inline keyboard.
    pub approved: bool,
}

/// Stack effect requested by a state after handling an event.
pub enum Transition {
    /// Keep the current state active.
    Stay,
    /// Enter the given state and push it on top of the current one.
    Push(Box<dyn State>),
    /// Exit the current state and pop it.
    ///
    /// Popping the sole remaining state is a no-op; the session stack is
    /// never allowed to become empty.
    Pop,
}

/// Everything a state may touch while handling one event.
///
/// Borrowed from the session for the duration of a single callback, so a
/// state can read the triggering message, enqueue replies and use the
/// hand-off slot, but cannot hold on to session internals.
pub struct StateCx<'a> {
    /// The component id of the owning menu, for callback payloads.
    pub component_id: ComponentId,
    /// The session's user id.
    pub user_id: i64,
    /// The message being handled (for callbacks: the last inbound message).
    pub message: &'a Message,
    /// Outbound queue handle.
    pub outbox: &'a Outbox,
    /// The session's hand-off slot.
    pub slot: &'a mut Option<TransitionData>,
}

impl StateCx<'_> {
    /// Enqueues a plain text reply into the current chat.
    pub fn say(&self, text: impl Into<String>) {
        self.outbox.send(Outbound::text(self.message.chat.id, text));
    }

    /// Enqueues a one-row inline keyboard into the current chat.
    pub fn ask(&self, text: impl Into<String>, buttons: Vec<InlineButton>) {
        self.outbox.send(Outbound::Keyboard(KeyboardMessage {
            chat_id: self.message.chat.id,
            text: text.into(),
            reply_to: None,
            buttons,
        }));
    }

    /// Builds a callback payload addressed back to the owning component,
    /// prefixed with this session's user id so the menu can find the
    /// session again.
    pub fn payload(&self, fields: &[&str]) -> String {
        let user = self.user_id.to_string();
        let mut all = Vec::with_capacity(fields.len() + 1);
        all.push(user.as_str());
        all.extend_from_slice(fields);
        callback_payload(self.component_id, &all)
    }

    /// Stores hand-off data for the next state.
    pub fn save(&mut self, data: TransitionData) {
        *self.slot = Some(data);
    }

    /// Takes the hand-off data left by the previous state.
    pub fn take_saved(&mut self) -> Option<TransitionData> {
        self.slot.take()
    }
}

/// One step of a conversation.
///
/// `update` and `update_callback` return the [`Transition`] the session
/// should perform; `on_enter` and `on_exit` run as part of executing that
/// transition.
#[async_trait]
pub trait State: Send {
    /// State name for logging.
    fn name(&self) -> &'static str;

    /// Invoked before the state is pushed.
    async fn on_enter(&mut self, cx: &mut StateCx<'_>);

    /// Invoked before the state is popped.
    async fn on_exit(&mut self, _cx: &mut StateCx<'_>) {}

    /// Handles a text message while this state is on top.
    async fn update(&mut self, cx: &mut StateCx<'_>) -> Transition;

    /// Handles a callback answer while this state is on top.
    ///
    /// `answer` is the payload tail after the menu stripped the component id
    /// and the user id.
    async fn update_callback(&mut self, _cx: &mut StateCx<'_>, _answer: &str) -> Transition {
        Transition::Stay
    }
}
