use anyhow::{Context, Result};
use verilens_analysis::input::InputOptions;
use verilens_analysis::report::ReportSettings;
use verilens_analysis::signals::SignalSettings;
use verilens_analysis::verdict::VerdictThresholds;
use verilens_analysis::{Analyzer, AnalyzerSettings};
use verilens_config::VerilensConfig;
use verilens_model::{ModelBundle, load_model_bundle};

pub fn analyzer_settings(cfg: &VerilensConfig) -> Result<AnalyzerSettings> {
    let a = &cfg.analysis;
    let thresholds = VerdictThresholds::new(a.fake_above, a.real_below)?;
    Ok(AnalyzerSettings {
        min_words: a.min_words,
        thresholds,
        signals: SignalSettings {
            professional_word_count: a.professional_word_count,
            top_terms: a.top_terms,
        },
        excerpt_chars: cfg.report.excerpt_chars,
    })
}

pub fn report_settings(cfg: &VerilensConfig) -> ReportSettings {
    ReportSettings {
        author: cfg.report.author.clone(),
    }
}

pub fn input_options(cfg: &VerilensConfig) -> InputOptions {
    InputOptions {
        csv_has_header: cfg.analysis.csv_has_header,
    }
}

/// Load the artifacts named in `cfg`. Failure here is fatal: nothing can be
/// analyzed without a model.
pub fn load_bundle(cfg: &VerilensConfig) -> Result<ModelBundle> {
    load_model_bundle(&cfg.model.vectorizer_path, &cfg.model.classifier_path)
        .context("model artifacts could not be loaded")
}

pub fn build_analyzer(cfg: &VerilensConfig) -> Result<Analyzer> {
    let settings = analyzer_settings(cfg)?;
    let bundle = load_bundle(cfg)?;
    Ok(Analyzer::new(bundle, settings))
}
