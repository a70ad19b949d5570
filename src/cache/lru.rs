//! LRU cache for message verdicts.

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::telegram::types::Message;
use crate::{BotError, BotResult};

/// Identity of a chat message.
///
/// Telegram message ids are only unique within a chat, so the key pairs
/// the chat id with the per-chat message id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKey {
    pub chat_id: i64,
    pub message_id: i64,
}

impl MessageKey {
    /// Creates a key from its raw components.
    pub fn new(chat_id: i64, message_id: i64) -> Self {
        Self {
            chat_id,
            message_id,
        }
    }
}

impl From<&Message> for MessageKey {
    fn from(message: &Message) -> Self {
        Self::new(message.chat.id, message.message_id)
    }
}

/// Fixed-capacity key/value store with least-recently-used eviction.
///
/// Holds the verdict for each recently scored message so `/review` can
/// answer without a second scoring call. The payload type is opaque to
/// the cache. Accessed from the single update-dispatch loop, so no
/// internal locking is needed.
pub struct ScoreCache<V> {
    cache: LruCache<MessageKey, V>,
}

impl<V> ScoreCache<V> {
    /// Creates a new cache holding at most `capacity` entries.
    ///
    /// Fails with a configuration error when `capacity` is zero; the
    /// capacity is fixed for the lifetime of the cache.
    pub fn new(capacity: usize) -> BotResult<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| BotError::config("cache capacity must be at least 1"))?;
        Ok(Self {
            cache: LruCache::new(capacity),
        })
    }

    /// Inserts or overwrites the value for a message.
    ///
    /// Either way the key ends up in the most-recently-used position.
    /// When a new key arrives at full capacity, the least-recently-used
    /// entry is evicted first.
    pub fn put(&mut self, key: impl Into<MessageKey>, value: V) {
        self.cache.put(key.into(), value);
    }

    /// Recency-bumping lookup.
    ///
    /// Callers are expected to check [`contains`](Self::contains) first
    /// or use [`try_get`](Self::try_get); an absent key is a `NotFound`
    /// error, never a silent default.
    pub fn get(&mut self, key: impl Into<MessageKey>) -> BotResult<&V> {
        self.cache.get(&key.into()).ok_or(BotError::NotFound)
    }

    /// Total form of [`get`](Self::get).
    ///
    /// Bumps recency on a hit; a miss returns `None` and leaves the
    /// cache untouched.
    pub fn try_get(&mut self, key: impl Into<MessageKey>) -> Option<&V> {
        self.cache.get(&key.into())
    }

    /// Membership test without a usage side effect.
    ///
    /// Repeated `contains` calls never protect an entry from eviction.
    pub fn contains(&self, key: impl Into<MessageKey>) -> bool {
        self.cache.contains(&key.into())
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Maximum number of resident entries.
    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }
}

impl<V> std::fmt::Debug for ScoreCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
