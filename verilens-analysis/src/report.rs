//! Plain-text report offered for download after an analysis.

use crate::analyzer::Analysis;
use serde::Serialize;
use std::fmt::Write as _;

pub const DEFAULT_EXCERPT_CHARS: usize = 100;
const REPORT_TITLE: &str = "VeriLens Analysis Report";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportSettings {
    pub author: Option<String>,
}

/// Leading slice of the submitted text, whitespace collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Excerpt {
    pub text: String,
    pub truncated: bool,
}

impl Excerpt {
    /// Take at most `max_chars` characters (not bytes) of `raw`.
    pub fn from_raw(raw: &str, max_chars: usize) -> Self {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        match collapsed.char_indices().nth(max_chars) {
            Some((cut, _)) => Self {
                text: collapsed[..cut].trim_end().to_string(),
                truncated: true,
            },
            None => Self {
                text: collapsed,
                truncated: false,
            },
        }
    }
}

impl std::fmt::Display for Excerpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)?;
        if self.truncated {
            f.write_str("...")?;
        }
        Ok(())
    }
}

/// `<LABEL> (<confidence>% confidence): <excerpt>`
pub fn summary_line(analysis: &Analysis) -> String {
    format!(
        "{} ({:.2}% confidence): {}",
        analysis.verdict.label, analysis.verdict.confidence_percent, analysis.excerpt
    )
}

/// Multi-line report combining verdict, signals and an excerpt.
pub fn render_report(analysis: &Analysis, settings: &ReportSettings) -> String {
    let verdict = &analysis.verdict;
    let signals = &analysis.signals;

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{REPORT_TITLE}");
    let _ = writeln!(out, "Analysis: {}", analysis.id);
    let _ = writeln!(out, "Generated: {}", analysis.created_at.to_rfc3339());
    if let Some(author) = settings.author.as_deref().filter(|a| !a.trim().is_empty()) {
        let _ = writeln!(out, "Author: {}", author.trim());
    }
    out.push('\n');
    let _ = writeln!(out, "Result: {}", verdict.label);
    let _ = writeln!(out, "Confidence: {:.2}%", verdict.confidence_percent);
    let _ = writeln!(out, "Risk tier: {}", verdict.risk_tier);
    let _ = writeln!(
        out,
        "Credibility: {:.1}% ({})",
        signals.credibility_percent,
        signals.credibility_band.as_str()
    );
    let _ = writeln!(
        out,
        "Emotional bias: {:.1}% ({})",
        signals.emotional_bias,
        signals.bias_band.as_str()
    );
    let _ = writeln!(out, "Complexity: {}", signals.complexity.as_str());
    let _ = writeln!(out, "Content: {}", analysis.excerpt);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_not_truncated() {
        let e = Excerpt::from_raw("  hello\n  world ", 100);
        assert_eq!(e.text, "hello world");
        assert!(!e.truncated);
        assert_eq!(e.to_string(), "hello world");
    }

    #[test]
    fn long_text_is_cut_on_char_boundary() {
        let raw = "é".repeat(150);
        let e = Excerpt::from_raw(&raw, 100);
        assert!(e.truncated);
        assert_eq!(e.text.chars().count(), 100);
        assert!(e.to_string().ends_with("..."));
    }

    #[test]
    fn exact_length_is_not_truncated() {
        let raw = "x".repeat(100);
        let e = Excerpt::from_raw(&raw, 100);
        assert!(!e.truncated);
        assert_eq!(e.text.len(), 100);
    }

    #[test]
    fn trailing_space_at_cut_is_trimmed() {
        let e = Excerpt::from_raw("abc def", 4);
        assert_eq!(e.text, "abc");
        assert!(e.truncated);
    }
}
