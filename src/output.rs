//! Console report and run persistence.
//!
//! Writes the human-readable summary, an optional JSON rendering, and appends
//! one CSV record per run.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::scoring::{SurveyOutcome, SurveyReport};

/// Writes the report lines: failed rows first, then the summary and verdict.
pub fn write_report<W: Write>(out: &mut W, report: &SurveyReport) -> Result<()> {
    for e in &report.row_errors {
        writeln!(out, "Error processing row: {e}")?;
    }

    match &report.outcome {
        SurveyOutcome::NoValidData => {
            writeln!(out, "No valid data found in the survey responses")?;
        }
        SurveyOutcome::Scored(result) => {
            writeln!(out, "Average satisfaction score: {:.2}%", result.average)?;
            writeln!(out, "Number of responses analyzed: {}", result.responses)?;
            if result.passed {
                writeln!(out, "✅ Satisfaction is above threshold!")?;
            } else {
                writeln!(out, "⚠️ Satisfaction below {}% threshold!", result.threshold)?;
            }
        }
    }

    Ok(())
}

/// Writes the run-level failure line.
pub fn write_failure<W: Write>(out: &mut W, error: &anyhow::Error) -> Result<()> {
    writeln!(out, "Error processing survey data: {error:#}")?;
    Ok(())
}

/// Writes the report as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, report: &SurveyReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// One line of the run history CSV.
#[derive(Debug, Serialize)]
pub struct RunRecord {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub outcome: &'static str,
    pub average: Option<f64>,
    pub responses: usize,
    pub threshold: Option<f64>,
    pub passed: bool,
    pub row_errors: usize,
}

impl RunRecord {
    pub fn from_report(source: &str, report: &SurveyReport) -> Self {
        let (average, responses, threshold) = match &report.outcome {
            SurveyOutcome::NoValidData => (None, 0, None),
            SurveyOutcome::Scored(r) => (Some(r.average), r.responses, Some(r.threshold)),
        };

        RunRecord {
            timestamp: Utc::now(),
            source: source.to_string(),
            outcome: report.outcome.label(),
            average,
            responses,
            threshold,
            passed: report.outcome.passed(),
            row_errors: report.row_errors.len(),
        }
    }
}

/// Appends a [`RunRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, record: &RunRecord) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // header only on a fresh file
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}
