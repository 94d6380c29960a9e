//! Append-only in-memory conversation log.
//!
//! ```rust
//! use pchat::TranscriptLog;
//! use pprovider::Turn;
//!
//! let mut log = TranscriptLog::new();
//! log.append(Turn::user("hello"));
//! log.append(Turn::assistant("hi"));
//! assert_eq!(log.len(), 2);
//!
//! log.reset();
//! assert!(log.is_empty());
//! ```

use pprovider::Turn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptLog {
    turns: Vec<Turn>,
}

impl TranscriptLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn reset(&mut self) {
        self.turns.clear();
    }

    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Turn> {
        self.turns.get(index)
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}
