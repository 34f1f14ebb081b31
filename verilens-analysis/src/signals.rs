//! Supplementary signals shown next to the verdict.
//!
//! None of these feed the classifier. They summarise the tone, register and
//! vocabulary of the submission so a reader can judge the verdict in context.

use crate::normalize::CleanedText;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use verilens_model::traits::ProbabilityPair;

/// Emotional-bias scores strictly inside this band count as neutral.
const NEUTRAL_BAND: (f64, f64) = (40.0, 60.0);
/// Credibility above this percentage is reported as high.
const HIGH_CREDIBILITY_ABOVE: f64 = 70.0;
const MIN_TERM_LEN: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;
const INTENSIFIER_FACTOR: f64 = 1.3;

// Word polarities on [-1, 1]. Entries are already in normalized form
// (lowercase, apostrophes dropped).
const POLARITY: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("calm", 0.3),
    ("celebrate", 0.5),
    ("confident", 0.5),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("fortunate", 0.4),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("hope", 0.3),
    ("incredible", 0.9),
    ("love", 0.5),
    ("lucky", 0.5),
    ("miracle", 0.6),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("positive", 0.2),
    ("safe", 0.5),
    ("success", 0.6),
    ("successful", 0.75),
    ("support", 0.3),
    ("wonderful", 1.0),
    ("abuse", -0.6),
    ("afraid", -0.6),
    ("angry", -0.5),
    ("attack", -0.5),
    ("awful", -1.0),
    ("bad", -0.7),
    ("catastrophe", -0.8),
    ("chaos", -0.6),
    ("corrupt", -0.7),
    ("crisis", -0.5),
    ("danger", -0.6),
    ("dangerous", -0.6),
    ("dead", -0.6),
    ("deadly", -0.7),
    ("destroy", -0.7),
    ("disaster", -0.8),
    ("disgusting", -1.0),
    ("evil", -1.0),
    ("fail", -0.5),
    ("failure", -0.6),
    ("fear", -0.6),
    ("fraud", -0.7),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("illegal", -0.5),
    ("kill", -0.8),
    ("lie", -0.6),
    ("lies", -0.6),
    ("outrage", -0.7),
    ("panic", -0.6),
    ("poor", -0.4),
    ("sad", -0.5),
    ("scandal", -0.6),
    ("scary", -0.5),
    ("shocking", -0.7),
    ("terrible", -1.0),
    ("threat", -0.5),
    ("tragic", -0.75),
    ("ugly", -0.7),
    ("worst", -1.0),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "dont", "doesnt", "didnt", "isnt", "wasnt", "arent",
    "werent", "cant", "cannot", "wont", "wouldnt", "shouldnt", "hardly",
];

const INTENSIFIERS: &[&str] = &[
    "very",
    "extremely",
    "really",
    "totally",
    "absolutely",
    "incredibly",
    "completely",
    "utterly",
    "so",
    "super",
];

const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "and", "any", "are", "because",
    "been", "before", "being", "below", "between", "both", "but", "can", "could", "did", "does",
    "doing", "down", "during", "each", "few", "for", "from", "further", "had", "has", "have",
    "having", "her", "here", "hers", "herself", "him", "himself", "his", "how", "into", "its",
    "itself", "just", "more", "most", "not", "now", "off", "once", "only", "other", "our", "ours",
    "out", "over", "own", "said", "same", "she", "should", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "then", "there", "these", "they", "this", "those", "through", "too",
    "under", "until", "very", "was", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "would", "you", "your", "yours",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasBand {
    Neutral,
    HighlyEmotional,
}

impl BiasBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiasBand::Neutral => "Neutral",
            BiasBand::HighlyEmotional => "Highly Emotional",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Professional,
    Informal,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Professional => "Professional",
            Complexity::Informal => "Informal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredibilityBand {
    High,
    Low,
}

impl CredibilityBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredibilityBand::High => "High",
            CredibilityBand::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signals {
    /// Mean lexicon polarity on [-1, 1].
    pub polarity: f64,
    /// Polarity mapped onto 0..=100.
    pub emotional_bias: f64,
    pub bias_band: BiasBand,
    pub complexity: Complexity,
    /// P(real) as a percentage.
    pub credibility_percent: f64,
    pub credibility_band: CredibilityBand,
    pub top_terms: Vec<TermCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalSettings {
    /// Raw word count above which writing is considered professional.
    pub professional_word_count: usize,
    pub top_terms: usize,
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            professional_word_count: 100,
            top_terms: 10,
        }
    }
}

/// Word-level polarity lexicon with simple negation and intensifier handling.
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    polarity: HashMap<&'static str, f64>,
    negators: HashSet<&'static str>,
    intensifiers: HashSet<&'static str>,
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self {
            polarity: POLARITY.iter().copied().collect(),
            negators: NEGATORS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }
}

impl SentimentLexicon {
    /// Mean polarity of the scored words in `text`, in [-1, 1].
    ///
    /// A negator directly before a scored word (or before its intensifier)
    /// flips and halves it; an intensifier directly before it scales it up.
    /// Text with no scored words is neutral.
    pub fn polarity(&self, text: &CleanedText) -> f64 {
        let tokens: Vec<&str> = text.tokens().collect();
        let mut total = 0.0;
        let mut scored = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.polarity.get(token) else {
                continue;
            };
            let mut value = base;
            let mut lookback = i;

            if lookback > 0 && self.intensifiers.contains(tokens[lookback - 1]) {
                value = (value * INTENSIFIER_FACTOR).clamp(-1.0, 1.0);
                lookback -= 1;
            }
            if lookback > 0 && self.negators.contains(tokens[lookback - 1]) {
                value *= NEGATION_FACTOR;
            }

            total += value;
            scored += 1;
        }

        if scored == 0 {
            0.0
        } else {
            (total / scored as f64).clamp(-1.0, 1.0)
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Map polarity in [-1, 1] to an emotional-bias score in [0, 100].
pub fn emotional_bias(polarity: f64) -> f64 {
    round2((polarity.clamp(-1.0, 1.0) + 1.0) * 50.0)
}

pub fn bias_band(emotional_bias: f64) -> BiasBand {
    if emotional_bias > NEUTRAL_BAND.0 && emotional_bias < NEUTRAL_BAND.1 {
        BiasBand::Neutral
    } else {
        BiasBand::HighlyEmotional
    }
}

pub fn complexity(raw_word_count: usize, professional_word_count: usize) -> Complexity {
    if raw_word_count > professional_word_count {
        Complexity::Professional
    } else {
        Complexity::Informal
    }
}

pub fn credibility_percent(pair: &ProbabilityPair) -> f64 {
    round2(pair.p_real() * 100.0)
}

pub fn credibility_band(credibility_percent: f64) -> CredibilityBand {
    if credibility_percent > HIGH_CREDIBILITY_ABOVE {
        CredibilityBand::High
    } else {
        CredibilityBand::Low
    }
}

/// The `limit` most frequent non-stopword terms; ties break alphabetically.
pub fn top_terms(text: &CleanedText, limit: usize) -> Vec<TermCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in text.tokens() {
        if token.len() >= MIN_TERM_LEN && !STOPWORD_SET.contains(token) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(term, count)| TermCount {
            term: term.to_string(),
            count,
        })
        .collect()
}

/// Derive all signals for one request.
pub fn compute_signals(
    lexicon: &SentimentLexicon,
    settings: &SignalSettings,
    cleaned: &CleanedText,
    raw_word_count: usize,
    pair: &ProbabilityPair,
) -> Signals {
    let polarity = lexicon.polarity(cleaned);
    let emotional_bias = emotional_bias(polarity);
    let credibility_percent = credibility_percent(pair);

    Signals {
        polarity,
        emotional_bias,
        bias_band: bias_band(emotional_bias),
        complexity: complexity(raw_word_count, settings.professional_word_count),
        credibility_percent,
        credibility_band: credibility_band(credibility_percent),
        top_terms: top_terms(cleaned, settings.top_terms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_text;

    fn polarity(text: &str) -> f64 {
        SentimentLexicon::default().polarity(&normalize_text(text))
    }

    #[test]
    fn neutral_text_scores_zero() {
        assert_eq!(polarity("The committee met on Tuesday to review the budget."), 0.0);
        assert_eq!(emotional_bias(0.0), 50.0);
        assert_eq!(bias_band(50.0), BiasBand::Neutral);
    }

    #[test]
    fn averages_scored_words() {
        let p = polarity("A good plan with a bad ending");
        assert!((p - 0.0).abs() < 1e-12);
        let p = polarity("great news");
        assert!((p - 0.8).abs() < 1e-12);
    }

    #[test]
    fn negation_flips_and_dampens() {
        let p = polarity("this is not good");
        assert!((p - (-0.35)).abs() < 1e-12);
    }

    #[test]
    fn contractions_survive_normalization_as_negators() {
        let p = polarity("it isn't bad");
        assert!((p - 0.35).abs() < 1e-12);
    }

    #[test]
    fn intensifier_scales_and_clamps() {
        let p = polarity("very good");
        assert!((p - 0.91).abs() < 1e-12);
        assert_eq!(polarity("absolutely perfect"), 1.0);
        let p = polarity("not very good");
        assert!((p - (-0.455)).abs() < 1e-12);
    }

    #[test]
    fn bias_band_boundaries_are_exclusive() {
        assert_eq!(bias_band(40.0), BiasBand::HighlyEmotional);
        assert_eq!(bias_band(60.0), BiasBand::HighlyEmotional);
        assert_eq!(bias_band(40.01), BiasBand::Neutral);
        assert_eq!(emotional_bias(-1.0), 0.0);
        assert_eq!(emotional_bias(1.0), 100.0);
    }

    #[test]
    fn complexity_threshold() {
        assert_eq!(complexity(100, 100), Complexity::Informal);
        assert_eq!(complexity(101, 100), Complexity::Professional);
    }

    #[test]
    fn credibility_tracks_p_real() {
        let c = credibility_percent(&ProbabilityPair::new(0.7, 0.3));
        assert_eq!(c, 70.0);
        assert_eq!(credibility_band(c), CredibilityBand::Low);
        let c = credibility_percent(&ProbabilityPair::new(0.85, 0.15));
        assert_eq!(credibility_band(c), CredibilityBand::High);
    }

    #[test]
    fn top_terms_rank_by_count_then_alphabet() {
        let cleaned = normalize_text(
            "Vaccine rumours spread. The vaccine claim spread online; officials deny the claim.",
        );
        let terms = top_terms(&cleaned, 3);
        assert_eq!(
            terms,
            vec![
                TermCount { term: "claim".into(), count: 2 },
                TermCount { term: "spread".into(), count: 2 },
                TermCount { term: "vaccine".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn top_terms_skip_short_words_and_stopwords() {
        let cleaned = normalize_text("we is at the an of zebra");
        let terms = top_terms(&cleaned, 10);
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].term, "zebra");
    }
}
