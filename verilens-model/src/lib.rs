//! Model seam for VeriLens.
//!
//! This crate exposes the two capabilities the analysis pipeline needs from a
//! pre-trained model, [`traits::Vectorizer`] and [`traits::ProbabilityModel`],
//! along with JSON-artifact implementations of both and a [`ModelBundle`]
//! that pairs them. Build the bundle once at startup and hand it to whatever
//! serves requests; it is immutable afterwards.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//! use verilens_model::load_model_bundle;
//!
//! # fn main() -> verilens_common::Result<()> {
//! let bundle = load_model_bundle(Path::new("vectorizer.json"), Path::new("classifier.json"))?;
//! let pair = bundle.score("officials confirmed the report on monday")?;
//! assert!(pair.p_fake() >= 0.0 && pair.p_fake() <= 1.0);
//! # Ok(())
//! # }
//! ```
pub mod logistic;
pub mod tfidf;
pub mod traits;

use logistic::LogisticRegression;
use std::path::Path;
use std::sync::Arc;
use tfidf::TfidfVectorizer;
use traits::{ProbabilityModel, ProbabilityPair, Vectorizer};
use verilens_common::{Result, VerilensError};

pub use traits::FeatureVector;

/// Default artifact file names, relative to the working directory.
pub const DEFAULT_VECTORIZER_FILE: &str = "vectorizer.json";
pub const DEFAULT_CLASSIFIER_FILE: &str = "classifier.json";

/// A vectorizer and classifier known to agree on feature dimension.
#[derive(Clone)]
pub struct ModelBundle {
    vectorizer: Arc<dyn Vectorizer + Send + Sync + 'static>,
    model: Arc<dyn ProbabilityModel + Send + Sync + 'static>,
}

impl std::fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBundle")
            .field("vectorizer", &self.vectorizer.name())
            .field("model", &self.model.name())
            .field("dimension", &self.dimension())
            .finish()
    }
}

impl ModelBundle {
    pub fn new(
        vectorizer: Arc<dyn Vectorizer + Send + Sync + 'static>,
        model: Arc<dyn ProbabilityModel + Send + Sync + 'static>,
    ) -> Result<Self> {
        if vectorizer.dimension() != model.dimension() {
            return Err(VerilensError::artifact(
                model.name(),
                format!(
                    "classifier expects {} features but vectorizer {} produces {}",
                    model.dimension(),
                    vectorizer.name(),
                    vectorizer.dimension()
                ),
            ));
        }
        Ok(Self { vectorizer, model })
    }

    pub fn dimension(&self) -> usize {
        self.vectorizer.dimension()
    }

    pub fn vectorizer(&self) -> &dyn Vectorizer {
        self.vectorizer.as_ref()
    }

    pub fn model(&self) -> &dyn ProbabilityModel {
        self.model.as_ref()
    }

    /// Vectorize cleaned text and return the classifier's probability pair.
    ///
    /// Output that is not a proper distribution is reported as an inference
    /// failure rather than passed on.
    pub fn score(&self, cleaned: &str) -> Result<ProbabilityPair> {
        let features = self.vectorizer.transform(cleaned)?;
        let pair = self.model.predict_proba(&features)?;
        if !pair.is_well_formed() {
            return Err(VerilensError::Inference(format!(
                "classifier {} returned an invalid distribution: {pair:?}",
                self.model.name()
            )));
        }
        tracing::debug!(
            nnz = features.nnz(),
            p_real = pair.p_real(),
            p_fake = pair.p_fake(),
            "scored text"
        );
        Ok(pair)
    }
}

/// Load both JSON artifacts from disk and check they fit together.
pub fn load_model_bundle(vectorizer_path: &Path, classifier_path: &Path) -> Result<ModelBundle> {
    let vectorizer = TfidfVectorizer::from_path(vectorizer_path)?;
    let model = LogisticRegression::from_path(classifier_path)?;
    tracing::info!(
        vectorizer = %vectorizer_path.display(),
        classifier = %classifier_path.display(),
        dimension = vectorizer.dimension(),
        "loaded model artifacts"
    );
    ModelBundle::new(Arc::new(vectorizer), Arc::new(model))
}
