use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;
use verilens_common::observability::LogFormat;
use verilens_config::VerilensConfigLoader;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
version: "1"
model:
  vectorizer_path: "${VERILENS_TEST_MODELS}/vectorizer.json"
  classifier_path: "${VERILENS_TEST_MODELS}/classifier.json"
analysis:
  min_words: 12
  top_terms: 5
report:
  author: "Newsroom Desk"
logging:
  format: json
  filter: "verilens=debug"
"#;
    let p = write_yaml(&tmp, "verilens.yaml", file_yaml);

    temp_env::with_var("VERILENS_TEST_MODELS", Some("/srv/models"), || {
        let config = VerilensConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load system config");

        assert_eq!(config.version.as_deref(), Some("1"));
        assert_eq!(
            config.model.vectorizer_path,
            PathBuf::from("/srv/models/vectorizer.json")
        );
        assert_eq!(
            config.model.classifier_path,
            PathBuf::from("/srv/models/classifier.json")
        );
        assert_eq!(config.analysis.min_words, 12);
        assert_eq!(config.analysis.top_terms, 5);
        assert_eq!(config.analysis.fake_above, 0.75);
        assert_eq!(config.report.author.as_deref(), Some("Newsroom Desk"));
        assert_eq!(config.report.excerpt_chars, 100);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter, "verilens=debug");
    });
}

#[test]
#[serial]
fn env_overrides_file_values() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "verilens.yaml", "analysis:\n  min_words: 12\n");

    temp_env::with_vars(
        [
            ("VERILENS__ANALYSIS__MIN_WORDS", Some("25")),
            ("VERILENS__REPORT__AUTHOR", Some("Fact Desk")),
        ],
        || {
            let config = VerilensConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("load with env overrides");

            assert_eq!(config.analysis.min_words, 25);
            assert_eq!(config.report.author.as_deref(), Some("Fact Desk"));
        },
    );
}

#[test]
#[serial]
fn missing_optional_file_yields_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = VerilensConfigLoader::new()
        .with_optional_file(tmp.path().join("absent.yaml"))
        .load()
        .expect("defaults");

    assert_eq!(config.analysis.min_words, 10);
    assert_eq!(config.model.classifier_path, PathBuf::from("classifier.json"));
    assert!(config.report.author.is_none());
}

#[test]
#[serial]
fn missing_required_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let result = VerilensConfigLoader::new()
        .with_file(tmp.path().join("absent.yaml"))
        .load();
    assert!(result.is_err());
}

#[test]
#[serial]
fn invalid_thresholds_fail_to_load() {
    let err = VerilensConfigLoader::new()
        .with_yaml_str("analysis:\n  fake_above: 0.2\n  real_below: 0.4\n")
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("must not exceed"));
}

#[test]
#[serial]
fn env_overrides_inline_yaml_added_after_new() {
    temp_env::with_var("VERILENS__ANALYSIS__FAKE_ABOVE", Some("0.9"), || {
        let config = VerilensConfigLoader::new()
            .with_yaml_str("analysis:\n  fake_above: 0.8\n  real_below: 0.1\n")
            .load()
            .expect("load");

        assert_eq!(config.analysis.fake_above, 0.9);
        assert_eq!(config.analysis.real_below, 0.1);
    });
}
