//! Telegram Bot API integration.
//!
//! A minimal long-polling client over the handful of methods the bot
//! needs: getUpdates, sendMessage and getMe.

pub mod api;
pub mod types;

pub use api::TelegramApi;
pub use types::{Chat, Message, OutgoingMessage, Update, User};
