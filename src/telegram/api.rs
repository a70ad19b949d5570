//! Thin HTTP client for the Telegram Bot API.

use std::time::Duration;

use serde::Deserialize;

use crate::telegram::types::{OutgoingMessage, Update, User};
use crate::types::config::TelegramConfig;
use crate::{BotError, BotResult};

/// Response envelope shared by every Bot API method.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self, method: &str) -> BotResult<T> {
        if self.ok {
            self.result.ok_or_else(|| {
                BotError::Telegram(format!("{}: ok response without result", method))
            })
        } else {
            Err(BotError::Telegram(format!(
                "{}: {}",
                method,
                self.description.unwrap_or_else(|| "unknown error".to_string())
            )))
        }
    }
}

/// Long-polling client for a single bot token.
pub struct TelegramApi {
    client: reqwest::Client,
    base_url: String,
    poll_timeout_secs: u64,
}

impl TelegramApi {
    /// Creates a client for the configured Bot API endpoint.
    pub fn new(config: &TelegramConfig, token: &str) -> BotResult<Self> {
        if token.is_empty() {
            return Err(BotError::config("Telegram bot token is empty"));
        }

        // The request timeout must outlast the long-poll window.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.poll_timeout_secs + 10))
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/bot{}", config.api_url.trim_end_matches('/'), token),
            poll_timeout_secs: config.poll_timeout_secs,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// Long-polls for updates with ids greater than or equal to `offset`.
    pub async fn get_updates(&self, offset: i64) -> BotResult<Vec<Update>> {
        let response: ApiResponse<Vec<Update>> = self
            .client
            .get(self.method_url("getUpdates"))
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", self.poll_timeout_secs.to_string()),
            ])
            .send()
            .await?
            .json()
            .await?;

        response.into_result("getUpdates")
    }

    /// Sends a text message, optionally as a reply.
    pub async fn send_message(&self, outgoing: &OutgoingMessage) -> BotResult<()> {
        let response: ApiResponse<serde_json::Value> = self
            .client
            .post(self.method_url("sendMessage"))
            .json(outgoing)
            .send()
            .await?
            .json()
            .await?;

        response.into_result("sendMessage").map(|_| ())
    }

    /// Fetches the bot's own identity; used by `doctor` as a reachability
    /// and token check.
    pub async fn get_me(&self) -> BotResult<User> {
        let response: ApiResponse<User> = self
            .client
            .get(self.method_url("getMe"))
            .send()
            .await?
            .json()
            .await?;

        response.into_result("getMe")
    }
}
