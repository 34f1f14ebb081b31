//! Loader for VeriLens configuration with YAML + environment overlays.
//!
//! Sources are merged in order: an optional `verilens.yaml` (or any file the
//! `config` crate recognises by suffix), inline YAML snippets, then
//! `VERILENS__`-prefixed environment variables (`__` separates nesting, so
//! `VERILENS__ANALYSIS__MIN_WORDS=20` overrides `analysis.min_words`).
//! `${VAR}` placeholders inside string values are expanded after merging.
//! Every section has defaults, so an empty configuration is valid.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use verilens_common::observability::LogFormat;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerilensConfig {
    pub version: Option<String>,
    pub model: ModelSection,
    pub analysis: AnalysisSection,
    pub report: ReportSection,
    pub logging: LoggingSection,
}

/// Locations of the two pre-serialized artifacts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    pub vectorizer_path: PathBuf,
    pub classifier_path: PathBuf,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            vectorizer_path: PathBuf::from("vectorizer.json"),
            classifier_path: PathBuf::from("classifier.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Minimum whitespace-separated words before classification is attempted.
    pub min_words: usize,
    /// P(fake) strictly above this is labelled FAKE.
    pub fake_above: f64,
    /// P(fake) strictly below this is labelled REAL.
    pub real_below: f64,
    /// Number of frequent terms reported alongside the verdict.
    pub top_terms: usize,
    /// Word count above which writing is considered professional.
    pub professional_word_count: usize,
    /// Skip the first row of CSV uploads.
    pub csv_has_header: bool,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            min_words: 10,
            fake_above: 0.75,
            real_below: 0.25,
            top_terms: 10,
            professional_word_count: 100,
            csv_has_header: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    pub author: Option<String>,
    /// Characters of the submitted text quoted in the report.
    pub excerpt_chars: usize,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            author: None,
            excerpt_chars: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub format: LogFormat,
    pub dir: Option<PathBuf>,
    pub filter: String,
    pub stderr: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            dir: None,
            filter: "info".into(),
            stderr: false,
        }
    }
}

impl VerilensConfig {
    /// Reject values that would make the verdict or report meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.analysis;
        for (name, value) in [("fake_above", a.fake_above), ("real_below", a.real_below)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Message(format!(
                    "analysis.{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if a.real_below > a.fake_above {
            return Err(ConfigError::Message(format!(
                "analysis.real_below ({}) must not exceed analysis.fake_above ({})",
                a.real_below, a.fake_above
            )));
        }
        if a.min_words == 0 {
            return Err(ConfigError::Message(
                "analysis.min_words must be at least 1".into(),
            ));
        }
        if self.report.excerpt_chars == 0 {
            return Err(ConfigError::Message(
                "report.excerpt_chars must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct VerilensConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for VerilensConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl VerilensConfigLoader {
    /// Start from defaults. `VERILENS__` environment overrides are applied
    /// last in [`load`](Self::load), so they beat every file and snippet.
    ///
    /// ```
    /// use verilens_config::VerilensConfigLoader;
    ///
    /// let config = VerilensConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.analysis.min_words, 10);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a file that must exist; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is merged only when present, so deployments can
    /// rely purely on environment variables.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use verilens_config::VerilensConfigLoader;
    ///
    /// let cfg = VerilensConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// model:
    ///   vectorizer_path: "artifacts/vectorizer.json"
    /// analysis:
    ///   fake_above: 0.8
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.model.vectorizer_path.to_str(), Some("artifacts/vectorizer.json"));
    /// assert_eq!(cfg.model.classifier_path.to_str(), Some("classifier.json"));
    /// assert_eq!(cfg.analysis.fake_above, 0.8);
    /// assert_eq!(cfg.analysis.real_below, 0.25);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly
    /// typed, validated config.
    pub fn load(self) -> Result<VerilensConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("VERILENS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: VerilensConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        typed.validate()?;

        Ok(typed)
    }
}
