//! The bot itself: long-poll loop, dispatch and handlers.

pub mod engine;
pub mod history;
pub mod transcript;

pub use engine::ModerationEngine;
pub use history::ChatHistory;
pub use transcript::Transcript;

use std::time::Duration;

use crate::telegram::TelegramApi;
use crate::BotResult;

/// Pause before retrying after a failed getUpdates call.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Long-polling moderation bot.
///
/// Pulls updates from Telegram one batch at a time and feeds them to
/// the [`ModerationEngine`] sequentially; a failure on one update is
/// logged and never stops the loop.
pub struct Bot {
    api: TelegramApi,
    engine: ModerationEngine,
}

impl Bot {
    /// Creates a bot from an API client and an engine.
    pub fn new(api: TelegramApi, engine: ModerationEngine) -> Self {
        Self { api, engine }
    }

    /// Runs the polling loop until the process is stopped.
    pub async fn run(&mut self) -> BotResult<()> {
        tracing::info!("Bot started");
        let mut offset = 0i64;

        loop {
            let updates = match self.api.get_updates(offset).await {
                Ok(updates) => updates,
                Err(error) => {
                    tracing::warn!(%error, "getUpdates failed, retrying");
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);

                let replies = match self.engine.handle_update(&update).await {
                    Ok(replies) => replies,
                    Err(error) => {
                        tracing::error!(update_id = update.update_id, %error, "handler failed");
                        continue;
                    }
                };

                for reply in &replies {
                    if let Err(error) = self.api.send_message(reply).await {
                        tracing::error!(chat_id = reply.chat_id, %error, "sendMessage failed");
                    }
                }
            }
        }
    }
}
