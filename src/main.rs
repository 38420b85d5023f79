//! CLI entry point for the survey satisfaction check.
//!
//! Downloads a survey export, scores every response, prints the summary and
//! exits with status 0 only when average satisfaction meets the threshold.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use survey_scorer::{
    fetch::{BasicClient, fetch_source},
    output::{RunRecord, append_record, write_failure, write_json, write_report},
    parser::parse_rows,
    scoring::{SurveyReport, aggregate},
};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Debug, Parser)]
#[command(name = "survey_scorer", version)]
#[command(about = "Checks survey satisfaction against the 80% threshold", long_about = None)]
struct Cli {
    /// URL of the spreadsheet export (a local path also works)
    #[arg(value_name = "URL")]
    source: String,

    /// CSV file to append a record of this run to
    #[arg(long, value_name = "CSV")]
    record: Option<String>,

    /// Also print the result as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let mut stdout = std::io::stdout().lock();
    let cli = match parse_args(std::env::args_os(), &mut stdout) {
        Ok(cli) => cli,
        Err(code) => return ExitCode::from(code),
    };

    let _log_guard = init_logging();

    let result = run(&cli, &mut stdout).await;
    ExitCode::from(exit_status(result, &mut stdout))
}

/// Parses the command line. `Err` holds the exit code when there is nothing
/// to run: 0 after `--help`/`--version`, 1 with a usage line otherwise.
fn parse_args<I, T, W>(args: I, out: &mut W) -> Result<Cli, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = write!(out, "{}", e.render());
            Err(0)
        }
        Err(_) => {
            let _ = writeln!(out, "{}", Cli::command().render_usage());
            Err(1)
        }
    }
}

/// Maps a finished run to the process exit code, reporting run-level errors.
fn exit_status<W: Write>(result: Result<SurveyReport>, out: &mut W) -> u8 {
    match result {
        Ok(report) => report.exit_code(),
        Err(e) => {
            error!(error = %format!("{e:#}"), "Survey check failed");
            let _ = write_failure(out, &e);
            1
        }
    }
}

/// Fetches, parses and scores the survey, then writes the report.
#[tracing::instrument(skip_all, fields(source = %cli.source))]
async fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<SurveyReport> {
    let client = BasicClient::new();
    let bytes = fetch_source(&client, &cli.source).await?;
    let rows = parse_rows(&bytes)?;
    info!(rows = rows.len(), "Survey responses loaded");

    let report = aggregate(&rows);
    write_report(out, &report)?;

    if cli.json {
        write_json(out, &report)?;
    }

    if let Some(path) = &cli.record {
        append_record(path, &RunRecord::from_report(&cli.source, &report))?;
        info!(path = %path, "Run recorded");
    }

    Ok(report)
}

/// Logging setup: colored stderr + JSON rolling log file.
///
/// Falls back to stderr only when the log file cannot be opened.
fn init_logging() -> Option<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/survey_scorer.log".to_string());
    let file_appender = open_log_file(&log_file_path);

    let (json_layer, guard, file_error) = match file_appender {
        Ok(appender) => {
            let (non_blocking_file, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(env_filter("RUST_LOG_JSON", "debug"));
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    if let Some(e) = file_error {
        warn!(path = %log_file_path, error = %e, "Log file unavailable, logging to stderr only");
    }

    guard
}

/// Opens the daily-rolling JSON log file at `path`, creating its directory.
fn open_log_file(path: &str) -> Result<RollingFileAppender, InitError> {
    let log_dir = Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let log_file_name = Path::new(path)
        .file_name()
        .unwrap_or(OsStr::new("survey_scorer.log"));

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(log_file_name.to_string_lossy().into_owned())
        .build(log_dir)
}

/// Reads a filter from `var`, falling back to `default` when unset or invalid.
fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}
