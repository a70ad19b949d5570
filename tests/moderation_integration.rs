//! Integration tests for the moderation engine: ingest, review and
//! the command handlers, driven end-to-end with a mock scorer.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use debatron::bot::ModerationEngine;
use debatron::scorer::Scorer;
use debatron::telegram::types::{Chat, Message, Update, User};
use debatron::types::{BotError, BotResult, Config, Verdict};

/// Scorer that returns a fixed score and records every context it saw.
struct MockScorer {
    score: u8,
    fail: bool,
    contexts: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockScorer {
    fn new(score: u8) -> Self {
        Self {
            score,
            fail: false,
            contexts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn failing() -> Self {
        Self {
            score: 0,
            fail: true,
            contexts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn contexts(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        Arc::clone(&self.contexts)
    }
}

#[async_trait]
impl Scorer for MockScorer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn score(&self, context: &[String]) -> BotResult<Verdict> {
        self.contexts.lock().unwrap().push(context.to_vec());
        if self.fail {
            return Err(BotError::scorer("mock", "simulated outage"));
        }
        Ok(Verdict::new(
            self.score,
            format!("scored with {} lines of context", context.len()),
        ))
    }
}

fn test_config(dir: &TempDir, cache_capacity: usize, history_length: usize) -> Config {
    let mut config = Config::default_config();
    config.general.chat_log = dir.path().join("chat.log");
    config.scorer.criteria_path = dir.path().join("criterias.txt");
    config.cache.capacity = cache_capacity;
    config.history.length = history_length;
    std::fs::write(&config.scorer.criteria_path, "be constructive").unwrap();
    config
}

fn engine_with(
    dir: &TempDir,
    scorer: MockScorer,
    cache_capacity: usize,
    history_length: usize,
) -> ModerationEngine {
    let config = test_config(dir, cache_capacity, history_length);
    ModerationEngine::new(&config, Box::new(scorer)).unwrap()
}

fn user(name: &str) -> User {
    User {
        id: 1,
        first_name: name.to_string(),
        last_name: None,
    }
}

fn message(chat_id: i64, message_id: i64, from: &str, text: &str) -> Message {
    Message {
        message_id,
        from: Some(user(from)),
        chat: Chat {
            id: chat_id,
            title: Some("Debate Club".to_string()),
        },
        text: Some(text.to_string()),
        reply_to_message: None,
    }
}

fn text_update(update_id: i64, message: Message) -> Update {
    Update {
        update_id,
        message: Some(message),
        edited_message: None,
    }
}

fn review_update(update_id: i64, chat_id: i64, message_id: i64, reviewed: Message) -> Update {
    let mut command = message(chat_id, message_id, "Reviewer", "/review");
    command.reply_to_message = Some(Box::new(reviewed));
    text_update(update_id, command)
}

#[tokio::test]
async fn ingest_then_review_returns_cached_verdict() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = engine_with(&dir, MockScorer::new(8), 10, 20);

    let scored = message(-100, 1, "Ada", "taxes fund roads");
    engine
        .handle_update(&text_update(1, scored.clone()))
        .await
        .unwrap();
    assert_eq!(engine.cached_verdicts(), 1);

    let replies = engine
        .handle_update(&review_update(2, -100, 2, scored))
        .await
        .unwrap();

    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].chat_id, -100);
    assert_eq!(replies[0].reply_to_message_id, Some(1));
    assert!(replies[0].text.starts_with("Score: 8/10."));
}

#[tokio::test]
async fn review_without_reply_asks_for_one() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = engine_with(&dir, MockScorer::new(5), 10, 20);

    let replies = engine
        .handle_update(&text_update(1, message(-100, 1, "Ada", "/review")))
        .await
        .unwrap();

    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.contains("Please reply to the message"));
    assert_eq!(replies[0].reply_to_message_id, None);
}

#[tokio::test]
async fn review_of_unscored_message_reports_too_old() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = engine_with(&dir, MockScorer::new(5), 10, 20);

    let never_scored = message(-100, 99, "Ada", "old take");
    let replies = engine
        .handle_update(&review_update(1, -100, 100, never_scored))
        .await
        .unwrap();

    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.contains("too old"));
}

#[tokio::test]
async fn evicted_verdicts_are_reported_too_old() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = engine_with(&dir, MockScorer::new(6), 2, 20);

    let first = message(-100, 1, "Ada", "one");
    engine.handle_update(&text_update(1, first.clone())).await.unwrap();
    engine
        .handle_update(&text_update(2, message(-100, 2, "Bob", "two")))
        .await
        .unwrap();
    engine
        .handle_update(&text_update(3, message(-100, 3, "Cleo", "three")))
        .await
        .unwrap();

    // Capacity 2: the first verdict was evicted by the third insert.
    assert_eq!(engine.cached_verdicts(), 2);
    let replies = engine
        .handle_update(&review_update(4, -100, 4, first))
        .await
        .unwrap();
    assert!(replies[0].text.contains("too old"));

    let recent = message(-100, 3, "Cleo", "three");
    let replies = engine
        .handle_update(&review_update(5, -100, 5, recent))
        .await
        .unwrap();
    assert!(replies[0].text.starts_with("Score: 6/10."));
}

#[tokio::test]
async fn scorer_failure_leaves_message_uncached_but_in_history() {
    let dir = tempfile::tempdir().unwrap();
    let scorer = MockScorer::failing();
    let contexts = scorer.contexts();
    let mut engine = engine_with(&dir, scorer, 10, 20);

    let unscored = message(-100, 1, "Ada", "dropped by outage");
    engine
        .handle_update(&text_update(1, unscored.clone()))
        .await
        .unwrap();

    assert_eq!(engine.cached_verdicts(), 0);
    let replies = engine
        .handle_update(&review_update(2, -100, 2, unscored))
        .await
        .unwrap();
    assert!(replies[0].text.contains("too old"));

    // The failed message still entered the scoring context.
    let recorded = contexts.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0], vec!["Ada: dropped by outage".to_string()]);
}

#[tokio::test]
async fn scoring_context_is_bounded_by_history_length() {
    let dir = tempfile::tempdir().unwrap();
    let scorer = MockScorer::new(5);
    let contexts = scorer.contexts();
    let mut engine = engine_with(&dir, scorer, 10, 2);

    for (i, text) in ["one", "two", "three"].iter().enumerate() {
        let update = text_update(i as i64 + 1, message(-100, i as i64 + 1, "Ada", text));
        engine.handle_update(&update).await.unwrap();
    }

    let recorded = contexts.lock().unwrap();
    assert_eq!(recorded.len(), 3);
    assert_eq!(recorded[2], vec!["Ada: two".to_string(), "Ada: three".to_string()]);
}

#[tokio::test]
async fn criterias_command_updates_file_and_hello_reflects_it() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = engine_with(&dir, MockScorer::new(5), 10, 20);

    let replies = engine
        .handle_update(&text_update(
            1,
            message(-100, 1, "Admin", "/criterias no memes allowed"),
        ))
        .await
        .unwrap();
    assert_eq!(replies[0].text, "Criterias updated.");

    let replies = engine
        .handle_update(&text_update(2, message(-100, 2, "Ada", "/hello")))
        .await
        .unwrap();
    assert!(replies[0].text.contains("no memes allowed"));

    let on_disk = std::fs::read_to_string(dir.path().join("criterias.txt")).unwrap();
    assert_eq!(on_disk, "no memes allowed");
}

#[tokio::test]
async fn bare_criterias_command_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = engine_with(&dir, MockScorer::new(5), 10, 20);

    let replies = engine
        .handle_update(&text_update(1, message(-100, 1, "Admin", "/criterias")))
        .await
        .unwrap();
    assert_eq!(replies[0].text, "No new criterias provided.");

    let on_disk = std::fs::read_to_string(dir.path().join("criterias.txt")).unwrap();
    assert_eq!(on_disk, "be constructive");
}

#[tokio::test]
async fn edited_messages_are_not_scored() {
    let dir = tempfile::tempdir().unwrap();
    let scorer = MockScorer::new(5);
    let contexts = scorer.contexts();
    let mut engine = engine_with(&dir, scorer, 10, 20);

    let update = Update {
        update_id: 1,
        message: None,
        edited_message: Some(message(-100, 1, "Ada", "edited text")),
    };
    let replies = engine.handle_update(&update).await.unwrap();

    assert!(replies.is_empty());
    assert_eq!(engine.cached_verdicts(), 0);
    assert!(contexts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn commands_are_never_scored() {
    let dir = tempfile::tempdir().unwrap();
    let scorer = MockScorer::new(5);
    let contexts = scorer.contexts();
    let mut engine = engine_with(&dir, scorer, 10, 20);

    engine
        .handle_update(&text_update(1, message(-100, 1, "Ada", "/start")))
        .await
        .unwrap();
    engine
        .handle_update(&text_update(2, message(-100, 2, "Ada", "/hello")))
        .await
        .unwrap();

    assert!(contexts.lock().unwrap().is_empty());
    assert_eq!(engine.cached_verdicts(), 0);
}

#[tokio::test]
async fn transcript_records_every_ingested_message() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = engine_with(&dir, MockScorer::new(5), 10, 20);

    engine
        .handle_update(&text_update(1, message(-100, 1, "Ada", "first point")))
        .await
        .unwrap();
    engine
        .handle_update(&text_update(2, message(-100, 2, "Bob", "counterpoint")))
        .await
        .unwrap();

    let transcript = std::fs::read_to_string(dir.path().join("chat.log")).unwrap();
    let lines: Vec<&str> = transcript.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[Debate Club] Ada: first point"));
    assert!(lines[1].contains("[Debate Club] Bob: counterpoint"));
}
