//! Update dispatch and command handling.

use crate::bot::history::ChatHistory;
use crate::bot::transcript::Transcript;
use crate::cache::ScoreCache;
use crate::scorer::{CriteriaStore, Scorer};
use crate::telegram::types::{Message, OutgoingMessage, Update};
use crate::types::{Config, Verdict};
use crate::BotResult;

/// Commands the bot reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    /// `/hello` - introduce the bot and its criteria.
    Hello,
    /// `/criterias [text]` - replace the scoring criteria.
    Criterias(Option<String>),
    /// `/review` - reply with the cached verdict of the replied-to message.
    Review,
    /// Any other slash command; ignored, never scored.
    Unknown,
}

/// Parses a message text as a command.
///
/// Returns `None` for plain messages. A `@botname` suffix on the
/// command token is tolerated, as Telegram appends it in groups.
fn parse_command(text: &str) -> Option<Command> {
    if !text.starts_with('/') {
        return None;
    }

    let mut parts = text.splitn(2, char::is_whitespace);
    let token = parts.next().unwrap_or_default();
    let command = token.split('@').next().unwrap_or(token);
    let rest = parts.next().map(str::trim).filter(|r| !r.is_empty());

    let parsed = match command {
        "/hello" => Command::Hello,
        "/criterias" => Command::Criterias(rest.map(str::to_string)),
        "/review" => Command::Review,
        _ => Command::Unknown,
    };
    Some(parsed)
}

/// Formats a message as one conversation line for the scoring context.
pub fn format_line(message: &Message, text: &str) -> String {
    format!("{}: {}", message.sender_name(), text)
}

/// Handles updates: scores plain messages, answers commands.
///
/// Owns the verdict cache and the conversation history. Updates are
/// dispatched one at a time, so all state is plainly mutable with no
/// locking.
pub struct ModerationEngine {
    scorer: Box<dyn Scorer>,
    criteria: CriteriaStore,
    transcript: Transcript,
    history: ChatHistory,
    cache: ScoreCache<Verdict>,
}

impl ModerationEngine {
    /// Creates the engine from configuration and a scorer.
    pub fn new(config: &Config, scorer: Box<dyn Scorer>) -> BotResult<Self> {
        Ok(Self {
            scorer,
            criteria: CriteriaStore::new(&config.scorer.criteria_path),
            transcript: Transcript::new(&config.general.chat_log),
            history: ChatHistory::new(config.history.length),
            cache: ScoreCache::new(config.cache.capacity)?,
        })
    }

    /// Number of verdicts currently cached.
    pub fn cached_verdicts(&self) -> usize {
        self.cache.len()
    }

    /// Processes one update and returns the replies to send.
    pub async fn handle_update(&mut self, update: &Update) -> BotResult<Vec<OutgoingMessage>> {
        if let Some(edited) = &update.edited_message {
            tracing::info!(
                "Skipping message edit by {}",
                edited.sender_name()
            );
            return Ok(Vec::new());
        }

        let message = match &update.message {
            Some(message) => message,
            None => return Ok(Vec::new()),
        };
        let text = match message.text.as_deref() {
            Some(text) => text,
            None => return Ok(Vec::new()),
        };

        match parse_command(text) {
            Some(Command::Hello) => self.handle_hello(message).await,
            Some(Command::Criterias(new_criteria)) => {
                self.handle_criterias(message, new_criteria).await
            }
            Some(Command::Review) => Ok(self.handle_review(message)),
            Some(Command::Unknown) => Ok(Vec::new()),
            None => {
                self.ingest(message, text).await;
                Ok(Vec::new())
            }
        }
    }

    /// Scores a plain message and caches the verdict under its identity.
    ///
    /// Scorer failures are logged and leave the message uncached; the
    /// message still enters the history so later context is complete.
    async fn ingest(&mut self, message: &Message, text: &str) {
        let transcript_line = format!(
            "[{}] {}",
            message.chat.display_title(),
            format_line(message, text)
        );
        if let Err(error) = self.transcript.log(&transcript_line).await {
            tracing::warn!(%error, "failed to append chat transcript");
        }

        self.history.push(format_line(message, text));

        match self.scorer.score(&self.history.snapshot()).await {
            Ok(verdict) => {
                tracing::info!(
                    score = verdict.score,
                    justification = %verdict.justification,
                    "message scored"
                );
                self.cache.put(message, verdict);
            }
            Err(error) => {
                tracing::warn!(scorer = self.scorer.name(), %error, "scoring failed");
            }
        }
    }

    async fn handle_hello(&self, message: &Message) -> BotResult<Vec<OutgoingMessage>> {
        tracing::info!("/hello handler called");
        let criteria = self.criteria.read().await?;
        let intro = format!(
            "Hello! I'm a friendly moderator bot for political discussions. \
             I evaluate messages based on the following criteria:\n\n{}\n\n\
             I'm here to help maintain a positive and constructive conversation. \
             Feel free to chat, and I'll provide feedback when necessary!",
            criteria
        );
        Ok(vec![OutgoingMessage::new(message.chat.id, intro)])
    }

    async fn handle_criterias(
        &self,
        message: &Message,
        new_criteria: Option<String>,
    ) -> BotResult<Vec<OutgoingMessage>> {
        tracing::info!("/criterias handler called");
        let reply = match new_criteria {
            None => "No new criterias provided.".to_string(),
            Some(criteria) => {
                tracing::info!("Updating criterias: {}", criteria);
                self.criteria.update(&criteria).await?;
                "Criterias updated.".to_string()
            }
        };
        Ok(vec![OutgoingMessage::new(message.chat.id, reply)])
    }

    /// Looks up the cached verdict of the replied-to message.
    ///
    /// Only the total lookup form is used here, so a missed (evicted or
    /// never scored) message is a user-facing reply, never an error.
    fn handle_review(&mut self, message: &Message) -> Vec<OutgoingMessage> {
        tracing::info!("/review handler called");

        let reviewed = match &message.reply_to_message {
            Some(reviewed) => reviewed.as_ref(),
            None => {
                return vec![OutgoingMessage::new(
                    message.chat.id,
                    "Please reply to the message you want to review with /review.",
                )]
            }
        };

        match self.cache.try_get(reviewed) {
            Some(verdict) => vec![
                OutgoingMessage::new(message.chat.id, verdict.format())
                    .in_reply_to(reviewed.message_id),
            ],
            None => vec![OutgoingMessage::new(
                message.chat.id,
                "Message is too old, please try a more recent message.",
            )],
        }
    }
}
