use serde::{Deserialize, Serialize};
use std::fmt;

/// A word and how many times it was seen
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }

    /// The `(word, 1)` pair emitted for every token
    pub fn one(word: impl Into<String>) -> Self {
        Self::new(word, 1)
    }
}

/// Formats as the `word<TAB>count` output line, without the newline
impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.word, self.count)
    }
}
