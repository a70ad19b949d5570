//! Verdict produced by the scorer for a single message.

use serde::{Deserialize, Serialize};

/// Result of scoring one chat message against the moderation criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    /// Score from 0 (bad message) to 10 (good message).
    pub score: u8,

    /// Short justification for the score.
    pub justification: String,

    /// Timestamp of the scoring call.
    pub scored_at: chrono::DateTime<chrono::Utc>,
}

impl Verdict {
    /// Creates a new verdict stamped with the current time.
    pub fn new(score: u8, justification: impl Into<String>) -> Self {
        Self {
            score,
            justification: justification.into(),
            scored_at: chrono::Utc::now(),
        }
    }

    /// Renders the verdict as the user-facing reply text.
    pub fn format(&self) -> String {
        format!("Score: {}/10. {}", self.score, self.justification)
    }
}
