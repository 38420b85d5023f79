//! Data types produced by the scoring pipeline.

use serde::Serialize;
use std::fmt;

/// A response that could not be scored. The row counts as unscored and the
/// run continues.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreError {
    /// The ratings summed past the range of `f64`.
    NonFinite { row: usize },
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::NonFinite { row } => {
                write!(f, "row {row}: rating total is not a finite number")
            }
        }
    }
}

impl std::error::Error for ScoreError {}

/// Aggregate over every response that produced a positive score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyResult {
    pub average: f64,
    pub responses: usize,
    pub threshold: f64,
    pub passed: bool,
}

/// Result of scoring a whole worksheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SurveyOutcome {
    NoValidData,
    Scored(SurveyResult),
}

impl SurveyOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, SurveyOutcome::Scored(result) if result.passed)
    }

    /// Short label used in run records: `pass`, `below_threshold` or `no_data`.
    pub fn label(&self) -> &'static str {
        match self {
            SurveyOutcome::NoValidData => "no_data",
            SurveyOutcome::Scored(result) if result.passed => "pass",
            SurveyOutcome::Scored(_) => "below_threshold",
        }
    }
}

/// Outcome plus the responses that failed to score, in worksheet order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyReport {
    #[serde(flatten)]
    pub outcome: SurveyOutcome,
    pub row_errors: Vec<ScoreError>,
}

impl SurveyReport {
    /// `0` only when valid data met the threshold.
    pub fn exit_code(&self) -> u8 {
        if self.outcome.passed() { 0 } else { 1 }
    }
}
