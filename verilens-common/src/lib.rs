//! Common types and utilities shared across VeriLens crates.
//!
//! This crate defines the shared error type, output enums and the
//! observability helpers used throughout the VeriLens workspace. It stays
//! dependency‑light so every crate can pull it in without dragging model or
//! configuration code along.
//!
//! # Overview
//!
//! - [`VerilensError`] and [`Result`]: Shared error handling
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`OutputFormat`]: How analysis results are rendered
//!
//! # Examples
//!
//! Gate failures are user-facing and carry enough context to explain
//! themselves:
//!
//! ```rust
//! use verilens_common::VerilensError;
//!
//! let err = VerilensError::InsufficientContent { words: 2, required: 10 };
//! assert!(err.is_input_rejection());
//! assert_eq!(
//!     err.to_string(),
//!     "Insufficient content: 2 words provided, at least 10 required"
//! );
//! ```
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod observability;

/// Preferred rendering for analysis results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Error types used across the VeriLens system.
#[derive(thiserror::Error, Debug)]
pub enum VerilensError {
    /// The submitted text was blank or whitespace-only.
    #[error("Empty input: please provide content to analyze")]
    EmptyInput,

    /// The submitted text is too short to classify.
    #[error("Insufficient content: {words} words provided, at least {required} required")]
    InsufficientContent { words: usize, required: usize },

    /// A model artifact could not be loaded or is inconsistent.
    #[error("Failed to load model artifact {}: {reason}", path.display())]
    ArtifactLoad { path: PathBuf, reason: String },

    /// The vectorizer or classifier failed while scoring a request.
    #[error("Inference error: {0}")]
    Inference(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The input source could not be read.
    #[error("Input error: {0}")]
    Input(String),
}

impl VerilensError {
    /// Build an [`VerilensError::ArtifactLoad`] for `path`.
    pub fn artifact(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ArtifactLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// `true` for the conditions that block a request before any
    /// classification is attempted.
    pub fn is_input_rejection(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::InsufficientContent { .. })
    }
}

/// Convenient alias for results that use [`VerilensError`].
pub type Result<T> = std::result::Result<T, VerilensError>;
