//! LRU cache for scored messages.
//!
//! Maps a message identity (chat id + message id) to its moderation
//! verdict with least-recently-used eviction, so `/review` on a recent
//! message never repeats a scoring call.

mod lru;

pub use lru::{MessageKey, ScoreCache};
