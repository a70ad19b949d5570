//! Prompt assembly and scoring-criteria storage.

use std::path::{Path, PathBuf};

use crate::{BotError, BotResult};

/// Preamble of the system prompt; the scoring criteria are appended.
pub const SYSTEM_PROMPT_PREAMBLE: &str = "\
You are a helpful assistant that scores chat messages. 0 is a bad message, 10 is \
a good one. You return JSON, one score attribute and one message attribute, the \
message is a short (20 words) message justifying the score. \
Your criterias for scoring are:";

/// Framing line placed before the conversation history.
pub const USER_PROMPT_HISTORY: &str =
    "Here is the partial history of the conversation for context:";

/// Framing line placed before the message under evaluation.
pub const USER_PROMPT_LAST_MESSAGE: &str =
    "Please provide a score for the last message, which is:";

/// Builds the system prompt from the preamble and the criteria text.
pub fn system_prompt(criteria: &str) -> String {
    format!("{}\n{}", SYSTEM_PROMPT_PREAMBLE, criteria.replace('\n', ""))
}

/// Builds the ordered user-message sequence for a scoring call.
///
/// A single-line context is framed directly as the message to score;
/// longer contexts get the history framing first. An empty context is
/// a caller bug surfaced as a scorer error.
pub fn user_messages(context: &[String]) -> BotResult<Vec<String>> {
    let (last, history) = match context.split_last() {
        Some(split) => split,
        None => return Err(BotError::scorer("prompt", "no messages to score")),
    };

    let mut messages = Vec::with_capacity(context.len() + 2);
    if !history.is_empty() {
        messages.push(USER_PROMPT_HISTORY.to_string());
        messages.extend(history.iter().cloned());
    }
    messages.push(USER_PROMPT_LAST_MESSAGE.to_string());
    messages.push(last.clone());

    Ok(messages)
}

/// File-backed store for the moderation criteria.
///
/// The `/criterias` command overwrites the file at runtime, so the
/// criteria are re-read on every scoring call rather than cached.
#[derive(Debug, Clone)]
pub struct CriteriaStore {
    path: PathBuf,
}

impl CriteriaStore {
    /// Creates a store over the given criteria file.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Reads the current criteria text.
    pub async fn read(&self) -> BotResult<String> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(text)
    }

    /// Replaces the criteria text.
    pub async fn update(&self, criteria: &str) -> BotResult<()> {
        tokio::fs::write(&self.path, criteria).await?;
        Ok(())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
