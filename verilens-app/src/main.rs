use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use verilens_analysis::input::InputSource;
use verilens_analysis::report::render_report;
use verilens_common::observability::{LogConfig, LogFormat, init_logging};
use verilens_common::{OutputFormat, VerilensError};
use verilens_config::{VerilensConfig, VerilensConfigLoader};

mod render;
mod wiring;

const DEFAULT_CONFIG_FILE: &str = "verilens.yaml";

#[derive(Debug, Parser)]
#[command(name = "verilens", version, about = "Screen news text for likely misinformation")]
struct Cli {
    /// YAML configuration file. Without it `verilens.yaml` is used if present.
    #[arg(long, global = true, env = "VERILENS_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides `logging.format` from the configuration.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormatArg>,

    /// Log at debug level and mirror events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify one piece of text.
    Analyze {
        /// Text to analyze. Read from stdin when neither this nor --file is given.
        text: Option<String>,

        /// Read the text from a file. `.csv` files contribute their first column.
        #[arg(long, short, conflicts_with = "text")]
        file: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,

        /// Also write the plain-text report to this path.
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Load the model artifacts and print what was loaded.
    CheckModel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if is_input_rejection(&err) {
                eprintln!("{err}");
            } else {
                eprintln!("error: {err:#}");
            }
            exit_code_for(&err)
        }
    }
}

fn is_input_rejection(err: &anyhow::Error) -> bool {
    err.downcast_ref::<VerilensError>()
        .is_some_and(VerilensError::is_input_rejection)
}

/// 2 when the text was rejected before classification, 1 for anything else.
fn exit_status(err: &anyhow::Error) -> u8 {
    if is_input_rejection(err) { 2 } else { 1 }
}

fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn run(cli: Cli) -> Result<()> {
    let cfg = load_config(cli.config.as_ref())?;
    setup_logging(&cfg, cli.log_format, cli.verbose)?;

    match cli.command {
        Command::Analyze {
            text,
            file,
            format,
            report,
        } => {
            let source = match (text, file) {
                (Some(text), _) => InputSource::Inline(text),
                (None, Some(path)) => InputSource::File(path),
                (None, None) => InputSource::Stdin,
            };
            analyze(&cfg, &source, format.into(), report)
        }
        Command::CheckModel => {
            let bundle = wiring::load_bundle(&cfg)?;
            print!("{}", render::render_model_summary(&bundle));
            Ok(())
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<VerilensConfig> {
    let loader = match path {
        Some(path) => VerilensConfigLoader::new().with_file(path),
        None => VerilensConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    loader.load().context("failed to load configuration")
}

fn setup_logging(cfg: &VerilensConfig, format: Option<LogFormatArg>, verbose: bool) -> Result<()> {
    let logging = &cfg.logging;
    let log_path = init_logging(LogConfig {
        app_name: "verilens",
        log_dir: logging.dir.clone(),
        emit_stderr: logging.stderr || verbose,
        format: format.map(LogFormat::from).unwrap_or(logging.format),
        default_filter: if verbose {
            "debug".to_string()
        } else {
            logging.filter.clone()
        },
    })?;
    tracing::debug!(path = %log_path.display(), "logging initialised");
    Ok(())
}

fn analyze(
    cfg: &VerilensConfig,
    source: &InputSource,
    format: OutputFormat,
    report_path: Option<PathBuf>,
) -> Result<()> {
    let analyzer = wiring::build_analyzer(cfg)?;
    let raw = source.read(&wiring::input_options(cfg))?;
    let analysis = analyzer.analyze(&raw)?;

    match format {
        OutputFormat::Text => print!("{}", render::render_text(&analysis)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
    }

    if let Some(path) = report_path {
        let report = render_report(&analysis, &wiring::report_settings(cfg));
        std::fs::write(&path, report)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        tracing::info!(path = %path.display(), "report written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn text_and_file_conflict() {
        let err = Cli::try_parse_from(["verilens", "analyze", "some text", "--file", "a.txt"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn analyze_defaults_to_text_output() {
        let cli = Cli::try_parse_from(["verilens", "analyze", "hello"]).unwrap();
        match cli.command {
            Command::Analyze { text, format, report, .. } => {
                assert_eq!(text.as_deref(), Some("hello"));
                assert_eq!(format, FormatArg::Text);
                assert!(report.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "verilens",
            "check-model",
            "--config",
            "custom.yaml",
            "--log-format",
            "json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
        assert_eq!(cli.log_format, Some(LogFormatArg::Json));
        assert!(cli.verbose);
    }

    #[test]
    fn gate_rejections_exit_with_two() {
        let short = anyhow::Error::from(VerilensError::InsufficientContent {
            words: 2,
            required: 10,
        });
        assert_eq!(exit_status(&short), 2);
        let blank = anyhow::Error::from(VerilensError::EmptyInput);
        assert_eq!(exit_status(&blank), 2);
        let wrapped = anyhow::Error::from(VerilensError::EmptyInput).context("reading stdin");
        assert_eq!(exit_status(&wrapped), 2);
    }

    #[test]
    fn other_failures_exit_with_one() {
        let artifact: Result<()> = Err(VerilensError::artifact("classifier.json", "missing"))
            .context("model artifacts could not be loaded");
        assert_eq!(exit_status(&artifact.unwrap_err()), 1);
        assert_eq!(exit_status(&anyhow::anyhow!("boom")), 1);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("absent.yaml");
        assert!(load_config(Some(&path)).is_err());
    }
}
