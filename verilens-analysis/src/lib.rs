//! Request pipeline for VeriLens.
//!
//! A submission passes through:
//!
//! 1. [`gate::ContentGate`]: blank and too-short texts are rejected
//! 2. [`normalize::normalize_text`]: lowercase, URL and symbol stripping
//! 3. the injected [`verilens_model::ModelBundle`]: vectorize and predict
//! 4. [`verdict::VerdictClassifier`]: label, confidence and risk tier
//! 5. [`signals`]: tone, register, credibility and frequent terms
//!
//! [`analyzer::Analyzer`] strings these together; [`report`] renders the
//! result as downloadable text and [`input`] resolves where text comes from.
pub mod analyzer;
pub mod gate;
pub mod input;
pub mod normalize;
pub mod report;
pub mod signals;
pub mod verdict;

pub use analyzer::{Analysis, Analyzer, AnalyzerSettings};
pub use verdict::{Label, RiskTier, Verdict};
