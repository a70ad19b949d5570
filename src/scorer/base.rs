//! Base trait for message scorers.

use async_trait::async_trait;

use crate::types::Verdict;
use crate::{BotError, BotResult};

/// Trait for LLM-backed message scorers.
///
/// A scorer receives the recent conversation as formatted lines (the
/// last line being the message under evaluation) and returns a verdict.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Returns the scorer's name, used in logs and errors.
    fn name(&self) -> &str;

    /// Scores the last line of `context` against the moderation criteria.
    async fn score(&self, context: &[String]) -> BotResult<Verdict>;
}

/// Parsed reply from a scoring model.
///
/// The model is instructed to answer with a JSON object carrying a
/// `score` attribute and a short `message` justifying it.
#[derive(Debug, serde::Deserialize)]
pub struct ScorerResponse {
    pub score: u8,
    pub message: String,
}

impl ScorerResponse {
    /// Parses a scorer reply.
    ///
    /// Models occasionally wrap the JSON in prose or code fences, so
    /// this takes the span between the first `{` and the last `}`.
    pub fn parse_from_output(output: &str, scorer_name: &str) -> BotResult<Self> {
        let json_start = output.find('{');
        let json_end = output.rfind('}');

        match (json_start, json_end) {
            (Some(start), Some(end)) if start < end => {
                let json_str = &output[start..=end];
                serde_json::from_str(json_str).map_err(|e| {
                    BotError::scorer(scorer_name, format!("failed to parse JSON reply: {}", e))
                })
            }
            _ => Err(BotError::scorer(
                scorer_name,
                "reply contains no JSON object",
            )),
        }
    }

    /// Converts the reply into a timestamped verdict.
    pub fn into_verdict(self) -> Verdict {
        Verdict::new(self.score.min(10), self.message)
    }
}
