//! TF-IDF vectorizer backed by a JSON artifact.
//!
//! The artifact layout follows what a fitted scikit-learn `TfidfVectorizer`
//! exposes (`vocabulary_`, `idf_`, `ngram_range`, `sublinear_tf`, `norm`),
//! so exporting one is a matter of dumping those attributes:
//!
//! ```json
//! {
//!   "vocabulary": { "breaking": 0, "shocking": 1, "official report": 2 },
//!   "idf": [1.2, 2.5, 1.9],
//!   "ngram_range": [1, 2],
//!   "sublinear_tf": false,
//!   "norm": "l2"
//! }
//! ```
use crate::traits::{FeatureVector, Vectorizer};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use verilens_common::{Result, VerilensError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

#[derive(Debug, Deserialize)]
struct TfidfArtifact {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default)]
    norm: Norm,
    #[serde(default)]
    stop_words: Vec<String>,
    #[serde(default = "default_min_token_len")]
    min_token_len: usize,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

// scikit-learn's default token pattern ignores single-character tokens.
fn default_min_token_len() -> usize {
    2
}

#[derive(Debug)]
pub struct TfidfVectorizer {
    name: String,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Norm,
    stop_words: HashSet<String>,
    min_token_len: usize,
}

impl TfidfVectorizer {
    /// Read and validate a vectorizer artifact from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| VerilensError::artifact(path, e))?;
        Self::from_json(&path.display().to_string(), &raw)
            .map_err(|reason| VerilensError::artifact(path, reason))
    }

    /// Parse an artifact from a JSON string. `name` identifies it in logs.
    pub fn from_json(name: &str, json: &str) -> std::result::Result<Self, String> {
        let artifact: TfidfArtifact =
            serde_json::from_str(json).map_err(|e| format!("invalid vectorizer JSON: {e}"))?;
        Self::from_artifact(name, artifact)
    }

    fn from_artifact(name: &str, artifact: TfidfArtifact) -> std::result::Result<Self, String> {
        let dimension = artifact.idf.len();
        if dimension == 0 {
            return Err("vectorizer has an empty idf table".into());
        }
        if let Some((term, col)) = artifact.vocabulary.iter().find(|(_, col)| **col >= dimension) {
            return Err(format!(
                "vocabulary term {term:?} maps to column {col}, but idf has {dimension} entries"
            ));
        }
        if artifact.idf.iter().any(|w| !w.is_finite()) {
            return Err("idf table contains non-finite weights".into());
        }
        let (lo, hi) = artifact.ngram_range;
        if lo == 0 || lo > hi {
            return Err(format!("invalid ngram_range ({lo}, {hi})"));
        }

        Ok(Self {
            name: name.to_string(),
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            stop_words: artifact.stop_words.into_iter().collect(),
            min_token_len: artifact.min_token_len,
        })
    }

    fn tokens<'a>(&'a self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace()
            .filter(|t| t.chars().count() >= self.min_token_len)
            .filter(|t| !self.stop_words.contains(*t))
            .collect()
    }

    fn term_counts(&self, tokens: &[&str]) -> HashMap<usize, f64> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        let (lo, hi) = self.ngram_range;
        for n in lo..=hi {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                let gram = window.join(" ");
                if let Some(&col) = self.vocabulary.get(&gram) {
                    *counts.entry(col).or_insert(0.0) += 1.0;
                }
            }
        }
        counts
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector> {
        let tokens = self.tokens(text);
        let counts = self.term_counts(&tokens);

        let weighted = counts.into_iter().map(|(col, tf)| {
            let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
            (col, tf * self.idf[col])
        });
        let mut features = FeatureVector::from_entries(self.idf.len(), weighted);

        if self.norm == Norm::L2 {
            let norm = features.l2_norm();
            if norm > 0.0 {
                features.scale(1.0 / norm);
            }
        }

        tracing::trace!(
            tokens = tokens.len(),
            nnz = features.nnz(),
            "vectorized text"
        );
        Ok(features)
    }

    fn dimension(&self) -> usize {
        self.idf.len()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
