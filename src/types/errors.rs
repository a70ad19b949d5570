//! Error types for Debatron.

use thiserror::Error;

/// Standard result type for Debatron.
pub type BotResult<T> = Result<T, BotError>;

/// Possible errors in Debatron.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API error: {0}")]
    Telegram(String),

    #[error("Scorer '{0}' failed: {1}")]
    Scorer(String, String),

    #[error("Message not found in score cache")]
    NotFound,
}

impl BotError {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a scorer error.
    pub fn scorer<N: Into<String>, M: Into<String>>(name: N, msg: M) -> Self {
        Self::Scorer(name.into(), msg.into())
    }
}
