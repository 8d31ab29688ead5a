//! Inbound event model.
//!
//! These types mirror what the chat transport delivers, reduced to the
//! fields the core actually consumes. The transport itself (polling,
//! authentication, wire decoding) is an out-of-scope collaborator; the
//! router treats these values as opaque structured data.

use serde::{Deserialize, Serialize};

/// A single inbound event from the chat transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Update {
    /// A regular chat message, possibly carrying a document attachment.
    Message(Message),
    /// An inline-keyboard callback with a free-form string payload.
    Callback(CallbackQuery),
}

/// A chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Transport-assigned message id, used for reply threading.
    pub message_id: i64,
    /// The chat this message was sent in.
    pub chat: Chat,
    /// The sender.
    pub from: User,
    /// Plain message text. Empty for attachment-only messages.
    #[serde(default)]
    pub text: String,
    /// Attached document, if any.
    #[serde(default)]
    pub document: Option<Document>,
    /// The message this one replies to, if any.
    #[serde(default)]
    pub reply_to: Option<Box<Message>>,
}

/// The chat a message belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    /// Transport chat id.
    pub id: i64,
    /// Chat type.
    pub kind: ChatKind,
}

/// Chat type, as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    /// One-on-one conversation with a single user.
    Private,
    /// Multi-user group chat.
    Group,
    /// Broadcast channel.
    Channel,
}

/// A message author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Transport user id. Sessions are keyed by this value.
    pub id: i64,
    /// Optional display handle.
    #[serde(default)]
    pub username: Option<String>,
}

/// A document attachment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Opaque transport handle used to fetch the file contents.
    pub file_id: String,
    /// Original file name, extension included.
    pub file_name: String,
}

/// An inline-keyboard callback query.
///
/// `data` carries the pipe-delimited payload a component embedded in the
/// button when the keyboard was sent: `"<componentId>|<tail…>"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    /// The user who tapped the button.
    pub from: User,
    /// The message the keyboard was attached to.
    pub message: Message,
    /// Raw callback payload.
    pub data: String,
}

impl Message {
    /// Returns `true` for messages from a one-on-one chat.
    pub fn is_private(&self) -> bool {
        self.chat.kind == ChatKind::Private
    }
}
