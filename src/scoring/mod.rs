//! Satisfaction scoring.
//!
//! Each response is averaged over the rated columns and scaled to a
//! percentage; responses with a positive score are then averaged and
//! compared with the pass threshold.

pub mod aggregate;
pub mod columns;
pub mod score;
pub mod types;
pub mod utility;

pub use aggregate::{PASS_THRESHOLD, aggregate};
pub use score::{score_row, score_row_with};
pub use types::{ScoreError, SurveyOutcome, SurveyReport, SurveyResult};
