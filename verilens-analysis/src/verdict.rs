//! Interpretation of a classifier's probability pair.
//!
//! The label and risk tier depend only on P(fake):
//!
//! | P(fake)                      | label       | risk tier |
//! |------------------------------|-------------|-----------|
//! | `> fake_above` (0.75)        | `FAKE`      | `HIGH`    |
//! | `< real_below` (0.25)        | `REAL`      | `LOW`     |
//! | otherwise                    | `UNCERTAIN` | `MEDIUM`  |
//!
//! Confidence rescales the winning probability from [0.5, 1.0] onto
//! [0, 100], rounded to two decimals, regardless of which class wins.

use serde::Serialize;
use verilens_common::{Result, VerilensError};
use verilens_model::traits::ProbabilityPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Real,
    Fake,
    Uncertain,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Real => "REAL",
            Label::Fake => "FAKE",
            Label::Uncertain => "UNCERTAIN",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse bucket derived from P(fake).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verdict {
    pub label: Label,
    /// Winning probability rescaled onto 0..=100, two decimals.
    pub confidence_percent: f64,
    pub risk_tier: RiskTier,
}

impl Verdict {
    /// One-sentence summary suitable for a banner.
    pub fn headline(&self) -> String {
        match self.label {
            Label::Real => format!(
                "Content passes the authenticity check ({:.2}% confidence)",
                self.confidence_percent
            ),
            Label::Fake => format!(
                "High risk of misinformation detected ({:.2}% confidence)",
                self.confidence_percent
            ),
            Label::Uncertain => format!(
                "Signals are mixed; verify with independent sources ({:.2}% confidence)",
                self.confidence_percent
            ),
        }
    }
}

/// Decision boundaries on P(fake).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerdictThresholds {
    fake_above: f64,
    real_below: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            fake_above: 0.75,
            real_below: 0.25,
        }
    }
}

impl VerdictThresholds {
    pub fn new(fake_above: f64, real_below: f64) -> Result<Self> {
        let in_unit = |t: f64| (0.0..=1.0).contains(&t);
        if !in_unit(fake_above) || !in_unit(real_below) {
            return Err(VerilensError::Config(format!(
                "verdict thresholds must lie in [0, 1], got fake_above={fake_above} real_below={real_below}"
            )));
        }
        if real_below > fake_above {
            return Err(VerilensError::Config(format!(
                "real_below ({real_below}) must not exceed fake_above ({fake_above})"
            )));
        }
        Ok(Self {
            fake_above,
            real_below,
        })
    }

    pub fn fake_above(&self) -> f64 {
        self.fake_above
    }

    pub fn real_below(&self) -> f64 {
        self.real_below
    }
}

/// Rescale the winning probability: 0.5 maps to 0, 1.0 maps to 100.
pub fn confidence_percent(pair: &ProbabilityPair) -> f64 {
    let scaled = (pair.max() - 0.5) * 2.0 * 100.0;
    ((scaled * 100.0).round() / 100.0).clamp(0.0, 100.0)
}

/// Stateless mapping from [`ProbabilityPair`] to [`Verdict`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VerdictClassifier {
    thresholds: VerdictThresholds,
}

impl VerdictClassifier {
    pub fn new(thresholds: VerdictThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &VerdictThresholds {
        &self.thresholds
    }

    pub fn classify(&self, pair: &ProbabilityPair) -> Verdict {
        let p_fake = pair.p_fake();
        let (label, risk_tier) = if p_fake > self.thresholds.fake_above {
            (Label::Fake, RiskTier::High)
        } else if p_fake < self.thresholds.real_below {
            (Label::Real, RiskTier::Low)
        } else {
            (Label::Uncertain, RiskTier::Medium)
        };

        Verdict {
            label,
            confidence_percent: confidence_percent(pair),
            risk_tier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(p_real: f64, p_fake: f64) -> Verdict {
        VerdictClassifier::default().classify(&ProbabilityPair::new(p_real, p_fake))
    }

    #[test]
    fn mostly_real_pair() {
        let v = classify(0.9, 0.1);
        assert_eq!(v.label, Label::Real);
        assert_eq!(v.risk_tier, RiskTier::Low);
        assert_eq!(v.confidence_percent, 80.0);
    }

    #[test]
    fn mostly_fake_pair() {
        let v = classify(0.1, 0.9);
        assert_eq!(v.label, Label::Fake);
        assert_eq!(v.risk_tier, RiskTier::High);
        assert_eq!(v.confidence_percent, 80.0);
    }

    #[test]
    fn coin_flip_has_zero_confidence() {
        let v = classify(0.5, 0.5);
        assert_eq!(v.label, Label::Uncertain);
        assert_eq!(v.risk_tier, RiskTier::Medium);
        assert_eq!(v.confidence_percent, 0.0);
    }

    #[test]
    fn certainty_has_full_confidence() {
        let v = classify(0.0, 1.0);
        assert_eq!(v.label, Label::Fake);
        assert_eq!(v.confidence_percent, 100.0);
        assert_eq!(classify(1.0, 0.0).confidence_percent, 100.0);
    }

    #[test]
    fn fake_range_is_open_at_threshold() {
        for p_fake in [0.7500001, 0.76, 0.8, 0.95, 0.999, 1.0] {
            let v = VerdictClassifier::default().classify(&ProbabilityPair::from_fake(p_fake));
            assert_eq!(v.label, Label::Fake, "p_fake={p_fake}");
        }
        let at = VerdictClassifier::default().classify(&ProbabilityPair::from_fake(0.75));
        assert_eq!(at.label, Label::Uncertain);
    }

    #[test]
    fn real_range_is_open_at_threshold() {
        for p_fake in [0.0, 0.001, 0.1, 0.2, 0.2499999] {
            let v = VerdictClassifier::default().classify(&ProbabilityPair::from_fake(p_fake));
            assert_eq!(v.label, Label::Real, "p_fake={p_fake}");
        }
        let at = VerdictClassifier::default().classify(&ProbabilityPair::from_fake(0.25));
        assert_eq!(at.label, Label::Uncertain);
    }

    #[test]
    fn confidence_rounds_to_two_decimals() {
        let v = classify(0.123456, 0.876544);
        assert_eq!(v.confidence_percent, 75.31);
    }

    #[test]
    fn confidence_is_monotonic_in_winning_probability() {
        let mut last = -1.0;
        for step in 0..=50 {
            let p = 0.5 + step as f64 * 0.01;
            let c = confidence_percent(&ProbabilityPair::from_fake(p));
            assert!(c >= last, "confidence dropped at p={p}");
            last = c;
        }
    }

    #[test]
    fn custom_thresholds_shift_the_bands() {
        let classifier = VerdictClassifier::new(VerdictThresholds::new(0.6, 0.4).unwrap());
        let v = classifier.classify(&ProbabilityPair::from_fake(0.65));
        assert_eq!(v.label, Label::Fake);
        let v = classifier.classify(&ProbabilityPair::from_fake(0.35));
        assert_eq!(v.label, Label::Real);
    }

    #[test]
    fn rejects_inverted_thresholds() {
        assert!(VerdictThresholds::new(0.3, 0.6).is_err());
        assert!(VerdictThresholds::new(1.2, 0.1).is_err());
    }

    #[test]
    fn labels_serialize_uppercase() {
        let v = classify(0.1, 0.9);
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json["label"], "FAKE");
        assert_eq!(json["risk_tier"], "HIGH");
    }
}
