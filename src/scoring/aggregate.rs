use crate::parser::ResponseRow;
use crate::scoring::score::score_row;
use crate::scoring::types::{SurveyOutcome, SurveyReport, SurveyResult};
use crate::scoring::utility::mean;
use tracing::{debug, info, warn};

/// Minimum average satisfaction, in percent, for a survey to pass.
pub const PASS_THRESHOLD: f64 = 80.0;

impl SurveyResult {
    /// Averages positive scores and checks them against [`PASS_THRESHOLD`].
    /// The boundary itself passes.
    pub fn from_scores(scores: &[f64]) -> Self {
        let average = mean(scores);
        SurveyResult {
            average,
            responses: scores.len(),
            threshold: PASS_THRESHOLD,
            passed: average >= PASS_THRESHOLD,
        }
    }
}

/// Scores every response and averages the ones with a positive score.
///
/// A response that fails to score is recorded in
/// [`SurveyReport::row_errors`] and does not stop the run.
#[tracing::instrument(skip_all, fields(rows = rows.len()))]
pub fn aggregate(rows: &[ResponseRow]) -> SurveyReport {
    let mut scores = Vec::new();
    let mut row_errors = Vec::new();

    for row in rows {
        match score_row(row) {
            Ok(score) if score > 0.0 => scores.push(score),
            Ok(_) => debug!(row = row.number(), "Response has no usable ratings"),
            Err(e) => {
                warn!(error = %e, "Response could not be scored");
                row_errors.push(e);
            }
        }
    }

    let outcome = if scores.is_empty() {
        SurveyOutcome::NoValidData
    } else {
        SurveyOutcome::Scored(SurveyResult::from_scores(&scores))
    };

    info!(
        scored = scores.len(),
        failed = row_errors.len(),
        outcome = outcome.label(),
        "Survey aggregated"
    );

    SurveyReport {
        outcome,
        row_errors,
    }
}
