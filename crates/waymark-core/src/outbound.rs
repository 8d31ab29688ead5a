//! Outbound message model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A message queued for delivery to the chat transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Outbound {
    /// Plain text.
    Text(TextMessage),
    /// Text with an inline keyboard attached.
    Keyboard(KeyboardMessage),
    /// A file upload.
    Document(DocumentUpload),
}

/// A plain text message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextMessage {
    /// Target chat.
    pub chat_id: i64,
    /// Message body.
    pub text: String,
    /// Message id to reply to, if threading.
    pub reply_to: Option<i64>,
}

/// One inline keyboard button.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineButton {
    /// User-visible caption.
    pub label: String,
    /// Callback payload returned verbatim when the button is tapped.
    pub payload: String,
}

/// A text message carrying a single row of inline buttons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardMessage {
    /// Target chat.
    pub chat_id: i64,
    /// Message body shown above the keyboard.
    pub text: String,
    /// Message id to reply to, if threading.
    pub reply_to: Option<i64>,
    /// Button row.
    pub buttons: Vec<InlineButton>,
}

/// A document upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUpload {
    /// Target chat.
    pub chat_id: i64,
    /// Local path of the file to upload.
    pub path: PathBuf,
    /// Message id to reply to, if threading.
    pub reply_to: Option<i64>,
}

impl Outbound {
    /// Builds a plain text message.
    pub fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Self::Text(TextMessage {
            chat_id,
            text: text.into(),
            reply_to: None,
        })
    }

    /// Builds a text message replying to `reply_to`.
    pub fn reply(chat_id: i64, reply_to: i64, text: impl Into<String>) -> Self {
        Self::Text(TextMessage {
            chat_id,
            text: text.into(),
            reply_to: Some(reply_to),
        })
    }

    /// Returns the target chat id, whatever the variant.
    pub fn chat_id(&self) -> i64 {
        match self {
            Self::Text(m) => m.chat_id,
            Self::Keyboard(m) => m.chat_id,
            Self::Document(m) => m.chat_id,
        }
    }
}
