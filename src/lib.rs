//! # Debatron
//!
//! Telegram moderation bot for group discussions.
//!
//! Every text message is scored 0-10 by an LLM against an editable set
//! of criteria; the verdict is cached under the message's identity so
//! that replying to it with `/review` retrieves the cached result
//! without a second scoring call.
//!
//! ## Modules
//!
//! - [`bot`] - Polling loop, update dispatch and command handlers
//! - [`cache`] - LRU cache mapping message identity to verdict
//! - [`cli`] - Command-line interface
//! - [`scorer`] - LLM scoring collaborator and prompt assembly
//! - [`telegram`] - Thin Telegram Bot API client
//! - [`types`] - Shared types, configuration and errors

pub mod bot;
pub mod cache;
pub mod cli;
pub mod scorer;
pub mod telegram;
pub mod types;

pub use types::config::Config;
pub use types::errors::{BotError, BotResult};
