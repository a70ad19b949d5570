//! Scorer backed by the OpenAI chat completions API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::scorer::base::{Scorer, ScorerResponse};
use crate::scorer::prompt::{self, CriteriaStore};
use crate::types::config::ScorerConfig;
use crate::types::Verdict;
use crate::{BotError, BotResult};

/// One message of a chat completion request.
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

impl ChatMessage {
    fn system(content: String) -> Self {
        Self {
            role: "system",
            content,
        }
    }

    fn user(content: String) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Scores messages through the chat completions endpoint.
pub struct OpenAiScorer {
    client: reqwest::Client,
    config: ScorerConfig,
    criteria: CriteriaStore,
    api_key: String,
}

impl OpenAiScorer {
    /// Creates a scorer from configuration and an API key.
    pub fn new(config: ScorerConfig, api_key: String) -> BotResult<Self> {
        if api_key.is_empty() {
            return Err(BotError::config("OpenAI API key is empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let criteria = CriteriaStore::new(&config.criteria_path);

        Ok(Self {
            client,
            config,
            criteria,
            api_key,
        })
    }

    /// Assembles the full message list for one scoring call.
    ///
    /// Criteria are read fresh each time since `/criterias` may have
    /// rewritten them since the previous call.
    async fn build_messages(&self, context: &[String]) -> BotResult<Vec<ChatMessage>> {
        let criteria = self.criteria.read().await?;

        let mut messages = vec![ChatMessage::system(prompt::system_prompt(&criteria))];
        messages.extend(prompt::user_messages(context)?.into_iter().map(ChatMessage::user));

        Ok(messages)
    }
}

#[async_trait]
impl Scorer for OpenAiScorer {
    fn name(&self) -> &str {
        "openai"
    }

    async fn score(&self, context: &[String]) -> BotResult<Verdict> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: self.build_messages(context).await?,
            max_tokens: self.config.max_tokens,
        };

        let response: ChatResponse = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.config.api_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let answer = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or_else(|| BotError::scorer(self.name(), "empty completion"))?
            .trim();

        tracing::debug!(scorer = self.name(), reply = answer, "model reply");

        let parsed = ScorerResponse::parse_from_output(answer, self.name())?;
        Ok(parsed.into_verdict())
    }
}
