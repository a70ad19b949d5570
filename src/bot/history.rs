//! Bounded buffer of recent conversation lines.

use std::collections::VecDeque;

/// Ring buffer of the most recent formatted chat lines.
///
/// This is the scoring context, not the verdict cache: it is owned by
/// the ingestion side and bounded independently of the cache capacity.
#[derive(Debug)]
pub struct ChatHistory {
    lines: VecDeque<String>,
    capacity: usize,
}

impl ChatHistory {
    /// Creates a history keeping at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a line, dropping the oldest when over capacity.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    /// Snapshot of the retained lines, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    /// Number of retained lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no lines are retained.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_under_capacity() {
        let mut history = ChatHistory::new(3);
        history.push("a");
        history.push("b");
        assert_eq!(history.snapshot(), vec!["a", "b"]);
    }

    #[test]
    fn test_oldest_lines_dropped() {
        let mut history = ChatHistory::new(2);
        history.push("a");
        history.push("b");
        history.push("c");
        assert_eq!(history.snapshot(), vec!["b", "c"]);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        let mut history = ChatHistory::new(0);
        history.push("a");
        assert!(history.is_empty());
    }
}
