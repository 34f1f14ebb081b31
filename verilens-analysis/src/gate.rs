use verilens_common::{Result, VerilensError};

/// Default minimum number of words before a text is worth classifying.
pub const DEFAULT_MIN_WORDS: usize = 10;

/// Rejects submissions that are blank or too short, before any cleanup runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentGate {
    min_words: usize,
}

impl Default for ContentGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_WORDS)
    }
}

impl ContentGate {
    pub fn new(min_words: usize) -> Self {
        Self { min_words }
    }

    pub fn min_words(&self) -> usize {
        self.min_words
    }

    /// Returns the whitespace-separated word count of `raw` when it passes.
    pub fn check(&self, raw: &str) -> Result<usize> {
        if raw.trim().is_empty() {
            return Err(VerilensError::EmptyInput);
        }
        let words = word_count(raw);
        if words < self.min_words {
            return Err(VerilensError::InsufficientContent {
                words,
                required: self.min_words,
            });
        }
        Ok(words)
    }
}

pub fn word_count(raw: &str) -> usize {
    raw.split_whitespace().count()
}
