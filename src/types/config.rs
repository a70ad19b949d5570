//! Configuration for Debatron.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::BotResult;

/// Main configuration for Debatron.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Telegram Bot API settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Scorer (LLM) settings.
    #[serde(default)]
    pub scorer: ScorerConfig,

    /// Score cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Conversation history settings.
    #[serde(default)]
    pub history: HistoryConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Append-only chat transcript file.
    #[serde(default = "default_chat_log")]
    pub chat_log: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            chat_log: default_chat_log(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_chat_log() -> PathBuf {
    PathBuf::from("chat.log")
}

/// Telegram Bot API settings.
///
/// The bot token is not stored here; it is read from the
/// `TELEGRAM_BOT_TOKEN` environment variable at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Base URL of the Bot API.
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,

    /// Long-polling timeout passed to getUpdates (in seconds).
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_api_url(),
            poll_timeout_secs: default_poll_timeout(),
        }
    }
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    30
}

/// Scorer settings.
///
/// The API key is read from the `OPENAI_API_KEY` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Base URL of the chat completions API.
    #[serde(default = "default_scorer_api_url")]
    pub api_url: String,

    /// Model used for scoring.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens per completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// File holding the scoring criteria.
    #[serde(default = "default_criteria_path")]
    pub criteria_path: PathBuf,

    /// Request timeout (in seconds).
    #[serde(default = "default_scorer_timeout")]
    pub timeout_secs: u64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            api_url: default_scorer_api_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            criteria_path: default_criteria_path(),
            timeout_secs: default_scorer_timeout(),
        }
    }
}

fn default_scorer_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_tokens() -> u32 {
    100
}

fn default_criteria_path() -> PathBuf {
    PathBuf::from("criterias.txt")
}

fn default_scorer_timeout() -> u64 {
    60
}

/// LRU score cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum cache capacity (number of entries). Must be at least 1.
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_capacity() -> usize {
    1000
}

/// Conversation history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Number of recent messages kept as scoring context.
    #[serde(default = "default_history_length")]
    pub length: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            length: default_history_length(),
        }
    }
}

fn default_history_length() -> usize {
    20
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> BotResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> BotResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            telegram: TelegramConfig::default(),
            scorer: ScorerConfig::default(),
            cache: CacheConfig::default(),
            history: HistoryConfig::default(),
        }
    }

    /// Tries to load configuration from current directory or uses default.
    pub fn load_or_default() -> Self {
        Self::load("debatron.toml").unwrap_or_else(|_| Self::default_config())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
