use serde::Serialize;
use verilens_common::Result;

/// Largest deviation from 1.0 tolerated for `P(real) + P(fake)`.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Two-class output of a classifier: P(real) and P(fake).
///
/// The pair is expected to sum to 1.0. Constructing one that does not is a
/// caller bug and trips a debug assertion; release builds keep the values
/// as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbabilityPair {
    p_real: f64,
    p_fake: f64,
}

impl ProbabilityPair {
    pub fn new(p_real: f64, p_fake: f64) -> Self {
        debug_assert!(
            ((p_real + p_fake) - 1.0).abs() <= PROBABILITY_SUM_TOLERANCE,
            "probabilities must sum to 1.0, got {p_real} + {p_fake}"
        );
        Self { p_real, p_fake }
    }

    /// Build the pair from P(fake) alone.
    pub fn from_fake(p_fake: f64) -> Self {
        Self::new(1.0 - p_fake, p_fake)
    }

    pub fn p_real(&self) -> f64 {
        self.p_real
    }

    pub fn p_fake(&self) -> f64 {
        self.p_fake
    }

    /// Probability of whichever class wins.
    pub fn max(&self) -> f64 {
        self.p_real.max(self.p_fake)
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        let in_range = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
        in_range(self.p_real)
            && in_range(self.p_fake)
            && ((self.p_real + self.p_fake) - 1.0).abs() <= PROBABILITY_SUM_TOLERANCE
    }
}

/// Sparse feature representation handed from a [`Vectorizer`] to a
/// [`ProbabilityModel`]. Entries are sorted by column and unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Build from unsorted `(column, weight)` pairs; duplicate columns are summed
    /// and columns outside `dimension` are dropped.
    pub fn from_entries(dimension: usize, entries: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut entries: Vec<(usize, f64)> =
            entries.into_iter().filter(|(col, _)| *col < dimension).collect();
        entries.sort_by_key(|(col, _)| *col);
        entries.dedup_by(|next, kept| {
            if next.0 == kept.0 {
                kept.1 += next.1;
                true
            } else {
                false
            }
        });
        Self { dimension, entries }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero columns.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product against a dense weight vector of the same dimension.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(col, v)| weights.get(*col).map(|w| w * v))
            .sum()
    }

    pub(crate) fn scale(&mut self, factor: f64) {
        self.entries.iter_mut().for_each(|(_, v)| *v *= factor);
    }

    pub(crate) fn l2_norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }
}

/// Turns cleaned text into a feature representation.
pub trait Vectorizer: Send + Sync {
    /// Vectorize already-normalized text.
    fn transform(&self, text: &str) -> Result<FeatureVector>;

    /// Width of the produced vectors.
    fn dimension(&self) -> usize;

    /// Human-readable identifier (usually the artifact path).
    fn name(&self) -> &str;
}

/// Produces a probability distribution over {real, fake}.
pub trait ProbabilityModel: Send + Sync {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ProbabilityPair>;

    /// Width of the vectors this model accepts.
    fn dimension(&self) -> usize;

    fn name(&self) -> &str;
}
