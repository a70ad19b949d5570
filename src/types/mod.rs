//! Shared types for Debatron.

pub mod config;
pub mod errors;
pub mod verdict;

pub use config::Config;
pub use errors::{BotError, BotResult};
pub use verdict::Verdict;
