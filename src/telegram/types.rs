//! Serde models for the slice of the Telegram Bot API the bot uses.

use serde::{Deserialize, Serialize};

/// An incoming update from getUpdates.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonically increasing update id, used as the polling offset.
    pub update_id: i64,

    /// New text message, if this update carries one.
    pub message: Option<Message>,

    /// Edit of an earlier message. Edits are not re-scored.
    pub edited_message: Option<Message>,
}

/// A chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Message id, unique only within its chat.
    pub message_id: i64,

    /// Sender. Absent for channel posts.
    pub from: Option<User>,

    /// Chat the message belongs to.
    pub chat: Chat,

    /// Text content. Absent for stickers, photos and the like.
    pub text: Option<String>,

    /// Message this one replies to, when sent as a reply.
    pub reply_to_message: Option<Box<Message>>,
}

impl Message {
    /// Display name of the sender, or a placeholder for senderless posts.
    pub fn sender_name(&self) -> String {
        self.from
            .as_ref()
            .map(User::full_name)
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// A chat (group, supergroup or private).
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,

    /// Group title. Absent for private chats.
    pub title: Option<String>,
}

impl Chat {
    /// Title for transcript lines; private chats have none.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Private Chat")
    }
}

/// A Telegram user.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl User {
    /// First and last name joined, matching Telegram's full_name.
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

/// Body of a sendMessage call.
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingMessage {
    pub chat_id: i64,
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
}

impl OutgoingMessage {
    /// Creates a plain message to a chat.
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            reply_to_message_id: None,
        }
    }

    /// Marks the message as a reply to an earlier one.
    pub fn in_reply_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }
}
