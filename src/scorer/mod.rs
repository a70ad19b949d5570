//! Message scoring against the moderation criteria.
//!
//! The [`Scorer`] trait hides the LLM backend; [`OpenAiScorer`] is the
//! chat-completions implementation. Prompt assembly and the editable
//! criteria file live in [`prompt`].

pub mod base;
pub mod openai;
pub mod prompt;

pub use base::{Scorer, ScorerResponse};
pub use openai::OpenAiScorer;
pub use prompt::CriteriaStore;
