//! Conversation states.
//!
//! The dialog is small: [`Hello`] runs a slot-filling registration (first
//! name, last name, inline confirmation) and on confirmation pushes
//! [`EnterOne`], which announces the registered user and pops itself when
//! the user types `"one"`.

use async_trait::async_trait;
use tracing::warn;

use waymark_core::InlineButton;

use crate::state::{RegistrationInfo, State, StateCx, Transition, TransitionData};

/// Callback answer confirming the registration.
pub(crate) const ANSWER_YES: &str = "yes";
/// Callback answer aborting the registration.
pub(crate) const ANSWER_NO: &str = "no";

/// Initial registration state.
///
/// Fills first name then last name from successive text messages. Once both
/// are filled, every further text re-issues the confirmation keyboard until
/// a callback answers it.
#[derive(Default)]
pub struct Hello {
    pub(crate) registration: RegistrationInfo,
}

impl Hello {
    fn confirm_keyboard(&self, cx: &StateCx<'_>) {
        let text = format!(
            "Register as {} {}?",
            self.registration.first_name, self.registration.last_name
        );
        cx.ask(
            text,
            vec![
                InlineButton {
                    label: "Confirm".to_string(),
                    payload: cx.payload(&[ANSWER_YES]),
                },
                InlineButton {
                    label: "Cancel".to_string(),
                    payload: cx.payload(&[ANSWER_NO]),
                },
            ],
        );
    }
}

#[async_trait]
impl State for Hello {
    fn name(&self) -> &'static str {
        "hello"
    }

    async fn on_enter(&mut self, cx: &mut StateCx<'_>) {
        self.registration = RegistrationInfo::default();
        cx.say("Hello there! Let's get acquainted. What is your first name?");
    }

    async fn update(&mut self, cx: &mut StateCx<'_>) -> Transition {
        let text = cx.message.text.trim();
        if text.is_empty() {
            return Transition::Stay;
        }

        if self.registration.first_name.is_empty() {
            self.registration.first_name = text.to_string();
            cx.say("And your last name?");
        } else if self.registration.last_name.is_empty() {
            self.registration.last_name = text.to_string();
            self.confirm_keyboard(cx);
        } else {
            // Both names are filled (possibly from an earlier round that
            // already went through confirmation): any text re-issues the
            // prompt.
            self.confirm_keyboard(cx);
        }
        Transition::Stay
    }

    async fn update_callback(&mut self, cx: &mut StateCx<'_>, answer: &str) -> Transition {
        match answer {
            ANSWER_YES => {
                self.registration.approved = true;
                cx.save(TransitionData::Registration(self.registration.clone()));
                Transition::Push(Box::new(EnterOne::default()))
            }
            ANSWER_NO => {
                cx.say("Okay, registration aborted.");
                Transition::Stay
            }
            other => {
                warn!(answer = other, "unexpected registration answer");
                Transition::Stay
            }
        }
    }
}

/// Post-confirmation destination state.
///
/// Entering without hand-off data is a programming error: the only valid
/// transition into this state is the confirm path of [`Hello`].
#[derive(Default)]
pub struct EnterOne {
    registration: RegistrationInfo,
}

#[async_trait]
impl State for EnterOne {
    fn name(&self) -> &'static str {
        "enter_one"
    }

    async fn on_enter(&mut self, cx: &mut StateCx<'_>) {
        let Some(TransitionData::Registration(info)) = cx.take_saved() else {
            panic!("EnterOne entered without registration data");
        };
        cx.say(format!(
            "{} {}, welcome in! Type \"one\" to leave.",
            info.first_name, info.last_name
        ));
        self.registration = info;
    }

    async fn on_exit(&mut self, cx: &mut StateCx<'_>) {
        cx.say("Bye! See you later!");
    }

    async fn update(&mut self, cx: &mut StateCx<'_>) -> Transition {
        if cx.message.text.trim() == "one" {
            Transition::Pop
        } else {
            Transition::Stay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_core::{outbound_channel, Chat, ChatKind, ComponentId, Message, Outbound, User};

    fn private_message(text: &str) -> Message {
        Message {
            message_id: 1,
            chat: Chat {
                id: 42,
                kind: ChatKind::Private,
            },
            from: User {
                id: 42,
                username: Some("alice".to_string()),
            },
            text: text.to_string(),
            document: None,
            reply_to: None,
        }
    }

    #[tokio::test]
    async fn hello_fills_names_in_order_and_prompts_for_confirmation() {
        let (outbox, mut rx) = outbound_channel();
        let mut slot = None;
        let mut hello = Hello::default();

        for text in ["Alice", "Smith"] {
            let message = private_message(text);
            let mut cx = StateCx {
                component_id: ComponentId(0),
                user_id: 42,
                message: &message,
                outbox: &outbox,
                slot: &mut slot,
            };
            hello.update(&mut cx).await;
        }

        assert_eq!(
            hello.registration,
            RegistrationInfo {
                first_name: "Alice".to_string(),
                last_name: "Smith".to_string(),
                approved: false,
            }
        );

        // Last outbound message is the confirmation keyboard with the
        // component-id|user-id|answer payloads.
        let mut last = None;
        while let Ok(out) = rx.try_recv() {
            last = Some(out);
        }
        match last {
            Some(Outbound::Keyboard(kb)) => {
                let payloads: Vec<_> = kb.buttons.iter().map(|b| b.payload.as_str()).collect();
                assert_eq!(payloads, vec!["0|42|yes", "0|42|no"]);
            }
            other => panic!("expected confirmation keyboard, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn any_text_while_awaiting_confirmation_reprompts() {
        let (outbox, mut rx) = outbound_channel();
        let mut slot = None;
        let mut hello = Hello::default();

        for text in ["Alice", "Smith", "hello?", "are you there"] {
            let message = private_message(text);
            let mut cx = StateCx {
                component_id: ComponentId(0),
                user_id: 42,
                message: &message,
                outbox: &outbox,
                slot: &mut slot,
            };
            hello.update(&mut cx).await;
        }

        let mut keyboards = 0;
        while let Ok(out) = rx.try_recv() {
            if matches!(out, Outbound::Keyboard(_)) {
                keyboards += 1;
            }
        }
        assert_eq!(keyboards, 3);
    }

    #[tokio::test]
    async fn cancel_answer_stays_in_hello() {
        let (outbox, mut rx) = outbound_channel();
        let mut slot = None;
        let mut hello = Hello {
            registration: RegistrationInfo {
                first_name: "Alice".to_string(),
                last_name: "Smith".to_string(),
                approved: false,
            },
        };

        let message = private_message("");
        let mut cx = StateCx {
            component_id: ComponentId(0),
            user_id: 42,
            message: &message,
            outbox: &outbox,
            slot: &mut slot,
        };
        let transition = hello.update_callback(&mut cx, ANSWER_NO).await;

        assert!(matches!(transition, Transition::Stay));
        assert!(slot.is_none());
        assert!(matches!(rx.try_recv(), Ok(Outbound::Text(_))));
    }

    #[tokio::test]
    #[should_panic(expected = "without registration data")]
    async fn enter_one_requires_handoff_data() {
        let (outbox, _rx) = outbound_channel();
        let mut slot = None;
        let message = private_message("");
        let mut cx = StateCx {
            component_id: ComponentId(0),
            user_id: 42,
            message: &message,
            outbox: &outbox,
            slot: &mut slot,
        };
        EnterOne::default().on_enter(&mut cx).await;
    }
}
