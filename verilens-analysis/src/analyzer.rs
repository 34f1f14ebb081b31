use crate::gate::ContentGate;
use crate::normalize::normalize_text;
use crate::report::{Excerpt, DEFAULT_EXCERPT_CHARS};
use crate::signals::{compute_signals, SentimentLexicon, SignalSettings, Signals};
use crate::verdict::{Verdict, VerdictClassifier, VerdictThresholds};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use verilens_common::Result;
use verilens_model::traits::ProbabilityPair;
use verilens_model::ModelBundle;

/// Knobs for one [`Analyzer`]. Built once from configuration at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerSettings {
    pub min_words: usize,
    pub thresholds: VerdictThresholds,
    pub signals: SignalSettings,
    pub excerpt_chars: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            min_words: crate::gate::DEFAULT_MIN_WORDS,
            thresholds: VerdictThresholds::default(),
            signals: SignalSettings::default(),
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

/// Everything one request produces.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Whitespace-separated words in the submitted text.
    pub word_count: usize,
    pub probabilities: ProbabilityPair,
    pub verdict: Verdict,
    pub signals: Signals,
    pub excerpt: Excerpt,
}

/// Runs the gate, cleanup, model and interpretation steps for one text.
///
/// Holds the injected [`ModelBundle`] read-only; every call to
/// [`Analyzer::analyze`] is independent.
#[derive(Debug, Clone)]
pub struct Analyzer {
    bundle: ModelBundle,
    gate: ContentGate,
    classifier: VerdictClassifier,
    lexicon: SentimentLexicon,
    settings: AnalyzerSettings,
}

impl Analyzer {
    pub fn new(bundle: ModelBundle, settings: AnalyzerSettings) -> Self {
        Self {
            bundle,
            gate: ContentGate::new(settings.min_words),
            classifier: VerdictClassifier::new(settings.thresholds),
            lexicon: SentimentLexicon::default(),
            settings,
        }
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    /// Analyze one submission. Either the whole [`Analysis`] is produced or
    /// an error explains why nothing was.
    pub fn analyze(&self, raw: &str) -> Result<Analysis> {
        let id = Uuid::new_v4();
        let span = tracing::info_span!("analysis", %id);
        let _enter = span.enter();

        let word_count = self.gate.check(raw).inspect_err(|e| {
            tracing::info!(error = %e, "submission rejected before classification");
        })?;

        let cleaned = normalize_text(raw);
        let probabilities = self.bundle.score(cleaned.as_str()).inspect_err(|e| {
            tracing::error!(error = %e, "classification failed");
        })?;

        let verdict = self.classifier.classify(&probabilities);
        let signals = compute_signals(
            &self.lexicon,
            &self.settings.signals,
            &cleaned,
            word_count,
            &probabilities,
        );

        tracing::info!(
            words = word_count,
            label = %verdict.label,
            confidence = verdict.confidence_percent,
            risk = %verdict.risk_tier,
            "analysis complete"
        );

        Ok(Analysis {
            id,
            created_at: Utc::now(),
            word_count,
            probabilities,
            verdict,
            signals,
            excerpt: Excerpt::from_raw(raw, self.settings.excerpt_chars),
        })
    }
}
