//! Binary logistic-regression classifier backed by a JSON artifact.
//!
//! Mirrors a fitted scikit-learn `LogisticRegression`: `coef` and `intercept`
//! describe the log-odds of `classes[1]`. Both the flat form and the
//! one-row nested form scikit-learn produces are accepted.
use crate::traits::{FeatureVector, ProbabilityModel, ProbabilityPair};
use serde::Deserialize;
use std::path::Path;
use verilens_common::{Result, VerilensError};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coefficients {
    Flat(Vec<f64>),
    Rows(Vec<Vec<f64>>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Intercept {
    Scalar(f64),
    Row(Vec<f64>),
}

#[derive(Debug, Deserialize)]
struct LogisticArtifact {
    classes: Vec<String>,
    coef: Coefficients,
    intercept: Intercept,
    /// Which entry of `classes` means "fake" when the labels are not
    /// literally `fake`/`real` (e.g. `0`/`1`).
    #[serde(default)]
    fake_label: Option<String>,
}

#[derive(Debug)]
pub struct LogisticRegression {
    name: String,
    coef: Vec<f64>,
    intercept: f64,
    /// `true` when `classes[1]` (the positive class) is the fake class.
    positive_is_fake: bool,
}

impl LogisticRegression {
    /// Read and validate a classifier artifact from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| VerilensError::artifact(path, e))?;
        Self::from_json(&path.display().to_string(), &raw)
            .map_err(|reason| VerilensError::artifact(path, reason))
    }

    pub fn from_json(name: &str, json: &str) -> std::result::Result<Self, String> {
        let artifact: LogisticArtifact =
            serde_json::from_str(json).map_err(|e| format!("invalid classifier JSON: {e}"))?;
        Self::from_artifact(name, artifact)
    }

    fn from_artifact(name: &str, artifact: LogisticArtifact) -> std::result::Result<Self, String> {
        if artifact.classes.len() != 2 {
            return Err(format!(
                "expected exactly two classes, found {}",
                artifact.classes.len()
            ));
        }
        let fake_index = resolve_fake_index(&artifact.classes, artifact.fake_label.as_deref())?;

        let coef = match artifact.coef {
            Coefficients::Flat(row) => row,
            Coefficients::Rows(mut rows) if rows.len() == 1 => rows.remove(0),
            Coefficients::Rows(rows) => {
                return Err(format!(
                    "binary classifier needs one coefficient row, found {}",
                    rows.len()
                ))
            }
        };
        let intercept = match artifact.intercept {
            Intercept::Scalar(b) => b,
            Intercept::Row(row) if row.len() == 1 => row[0],
            Intercept::Row(row) => {
                return Err(format!("expected one intercept, found {}", row.len()))
            }
        };

        if coef.is_empty() {
            return Err("classifier has no coefficients".into());
        }
        if coef.iter().any(|w| !w.is_finite()) || !intercept.is_finite() {
            return Err("classifier weights must be finite".into());
        }

        Ok(Self {
            name: name.to_string(),
            coef,
            intercept,
            positive_is_fake: fake_index == 1,
        })
    }
}

fn resolve_fake_index(classes: &[String], fake_label: Option<&str>) -> std::result::Result<usize, String> {
    if let Some(label) = fake_label {
        return classes
            .iter()
            .position(|c| c == label)
            .ok_or_else(|| format!("fake_label {label:?} is not one of {classes:?}"));
    }

    let lowered: Vec<String> = classes.iter().map(|c| c.to_lowercase()).collect();
    match (
        lowered.iter().position(|c| c == "fake"),
        lowered.iter().position(|c| c == "real"),
    ) {
        (Some(fake), Some(_)) => Ok(fake),
        _ => Err(format!(
            "classes {classes:?} must be \"fake\" and \"real\", or set fake_label"
        )),
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl ProbabilityModel for LogisticRegression {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ProbabilityPair> {
        if features.dimension() != self.coef.len() {
            return Err(VerilensError::Inference(format!(
                "feature dimension {} does not match classifier dimension {}",
                features.dimension(),
                self.coef.len()
            )));
        }

        let z = self.intercept + features.dot(&self.coef);
        let p_positive = sigmoid(z);
        let p_fake = if self.positive_is_fake {
            p_positive
        } else {
            1.0 - p_positive
        };

        tracing::trace!(log_odds = z, p_fake, "classifier scored features");
        Ok(ProbabilityPair::from_fake(p_fake))
    }

    fn dimension(&self) -> usize {
        self.coef.len()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
