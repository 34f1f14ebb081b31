use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use verilens_common::observability::{LogConfig, LogFormat};

static INIT_PATH: OnceLock<PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "verilens-tests",
            log_dir: Some(std::env::temp_dir().join("verilens-tests")),
            emit_stderr: true,
            format: if std::env::var("VERILENS_LOG_FORMAT")
                .map(|raw| raw.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false)
            {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
            default_filter: "debug".to_string(),
        };

        verilens_common::observability::init_logging(config).unwrap_or_default()
    });
}

pub const VECTORIZER_JSON: &str = r#"{
  "vocabulary": {
    "shocking": 0,
    "secret": 1,
    "miracle": 2,
    "officials": 3,
    "confirmed": 4,
    "report": 5
  },
  "idf": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
  "norm": "none"
}"#;

pub const CLASSIFIER_JSON: &str = r#"{
  "classes": ["real", "fake"],
  "coef": [[2.0, 2.0, 2.0, -2.0, -2.0, -2.0]],
  "intercept": [0.0]
}"#;

pub fn write_artifact(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write artifact");
    path
}
