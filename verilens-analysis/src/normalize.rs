//! Text cleanup applied before vectorization.
//!
//! Pipeline:
//!
//! 1. **Lowercase** the whole input
//! 2. **Strip URLs**: `http://`, `https://` and `ftp://` links plus bare
//!    `www.` tokens, each up to the next whitespace
//! 3. **Restrict the alphabet** to `a-z` and space; other whitespace becomes a
//!    space so words on separate lines stay separate, everything else is
//!    dropped
//!
//! Runs of spaces are left alone. Because every URL marker contains a
//! character that step 3 removes, the transform is idempotent.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?|ftp)://\S+|www\.\S+").expect("valid regex"));

/// Text after lowercasing, URL removal and alphabet restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CleanedText(String);

impl CleanedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Whitespace-separated tokens, skipping empty runs.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl AsRef<str> for CleanedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CleanedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Clean raw user text for the vectorizer.
///
/// # Examples
///
/// ```
/// use verilens_analysis::normalize::normalize_text;
///
/// let cleaned = normalize_text("BREAKING: see https://t.co/x1 NOW!!!");
/// assert_eq!(cleaned.as_str(), "breaking see  now");
/// ```
pub fn normalize_text(raw: &str) -> CleanedText {
    let lowered = raw.to_lowercase();
    let without_urls = URL_PATTERN.replace_all(&lowered, "");

    let cleaned = without_urls
        .chars()
        .filter_map(|c| match c {
            'a'..='z' | ' ' => Some(c),
            c if c.is_whitespace() => Some(' '),
            _ => None,
        })
        .collect();

    CleanedText(cleaned)
}
