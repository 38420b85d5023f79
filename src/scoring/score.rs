//! Per-response satisfaction score.

use crate::parser::ResponseRow;
use crate::scoring::columns::{RECOMMENDATION_COLUMN, SATISFACTION_COLUMNS, SatisfactionColumn};
use crate::scoring::types::ScoreError;
use tracing::trace;

/// Answer range a response average is scaled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingScale {
    OneToFive,
    OneToTen,
}

impl RatingScale {
    pub fn max(self) -> f64 {
        match self {
            RatingScale::OneToFive => 5.0,
            RatingScale::OneToTen => 10.0,
        }
    }

    /// A lone rating is read on the recommendation question's 1-10 scale
    /// when the configured column set ends with that question.
    ///
    /// NOTE: this checks the configured last column, not the column that
    /// actually produced the lone rating, so with the standard column set
    /// every single-rating response lands on the 1-10 scale.
    ///
    /// NOTE: boolean cells never count as ratings (see
    /// [`ResponseRow::read_number`]), so a lone `TRUE` does not reach this
    /// rule as a rating of 1.
    pub fn select(valid_count: usize, columns: &[SatisfactionColumn]) -> Self {
        let ends_with_recommendation =
            columns.last().map(|c| c.index) == Some(RECOMMENDATION_COLUMN);
        if valid_count == 1 && ends_with_recommendation {
            RatingScale::OneToTen
        } else {
            RatingScale::OneToFive
        }
    }
}

/// Scores a response against the standard satisfaction columns.
pub fn score_row(row: &ResponseRow) -> Result<f64, ScoreError> {
    score_row_with(row, SATISFACTION_COLUMNS)
}

/// Scores a response as a percentage of the rating scale.
///
/// Only numeric ratings above zero count; blank, non-numeric and
/// unreadable cells are skipped. Returns `0.0` when nothing counts.
///
/// # Errors
///
/// Returns [`ScoreError::NonFinite`] if the ratings sum past `f64` range.
/// Scores are otherwise left unclamped; an infinite total is the one case
/// rejected instead of propagated as an infinite score.
pub fn score_row_with(row: &ResponseRow, columns: &[SatisfactionColumn]) -> Result<f64, ScoreError> {
    let mut total = 0.0;
    let mut valid_count = 0usize;

    for column in columns {
        match row.read_number(column.index) {
            Ok(value) if value > 0.0 => {
                total += value;
                valid_count += 1;
            }
            Ok(_) => {}
            Err(e) => trace!(row = row.number(), error = %e, "Skipping cell"),
        }
    }

    if !total.is_finite() {
        return Err(ScoreError::NonFinite { row: row.number() });
    }

    if valid_count == 0 {
        return Ok(0.0);
    }

    let avg = total / valid_count as f64;
    let scale = RatingScale::select(valid_count, columns);

    Ok(avg / scale.max() * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CellValue;

    /// Builds a 40-column row with `values` placed at 1-based columns.
    fn row_with(values: &[(usize, CellValue)]) -> ResponseRow {
        let mut cells = vec![CellValue::Empty; 40];
        for (column, value) in values {
            cells[column - 1] = value.clone();
        }
        ResponseRow::new(2, cells)
    }

    fn standard_ratings(values: &[f64]) -> ResponseRow {
        let placed: Vec<_> = SATISFACTION_COLUMNS
            .iter()
            .zip(values)
            .map(|(c, v)| (c.index, CellValue::Number(*v)))
            .collect();
        row_with(&placed)
    }

    #[test]
    fn test_empty_row_scores_zero() {
        assert_eq!(score_row(&row_with(&[])), Ok(0.0));
    }

    #[test]
    fn test_non_positive_ratings_score_zero() {
        let row = standard_ratings(&[0.0, -3.0, -1.0, 0.0]);
        assert_eq!(score_row(&row), Ok(0.0));
    }

    #[test]
    fn test_full_response() {
        let mut values = vec![4.0; 18];
        values.push(8.0);
        let score = score_row(&standard_ratings(&values)).unwrap();

        assert!((score - 80.0 / 19.0 / 5.0 * 100.0).abs() < 1e-9);
        assert!((score - 84.21).abs() < 0.01);
    }

    #[test]
    fn test_single_rating_uses_ten_point_scale() {
        // The lone rating sits in a 1-5 column, yet the configured set ends
        // with the recommendation column, so the 1-10 scale applies.
        let row = row_with(&[(5, CellValue::Number(4.0))]);
        assert_eq!(score_row(&row), Ok(40.0));
    }

    #[test]
    fn test_single_rating_without_recommendation_column_uses_five_point_scale() {
        let columns = &SATISFACTION_COLUMNS[..SATISFACTION_COLUMNS.len() - 1];
        let row = row_with(&[(5, CellValue::Number(4.0))]);
        assert_eq!(score_row_with(&row, columns), Ok(80.0));
    }

    #[test]
    fn test_two_ratings_use_five_point_scale() {
        let row = row_with(&[(5, CellValue::Number(4.0)), (6, CellValue::Number(5.0))]);
        assert_eq!(score_row(&row), Ok(90.0));
    }

    #[test]
    fn test_scale_selection() {
        assert_eq!(
            RatingScale::select(1, SATISFACTION_COLUMNS),
            RatingScale::OneToTen
        );
        assert_eq!(
            RatingScale::select(2, SATISFACTION_COLUMNS),
            RatingScale::OneToFive
        );
        assert_eq!(RatingScale::select(1, &[]), RatingScale::OneToFive);
    }

    #[test]
    fn test_unreadable_cells_are_skipped() {
        let row = row_with(&[
            (5, CellValue::Text("Agree".into())),
            (6, CellValue::Error("#N/A".into())),
            (7, CellValue::Bool(true)),
            (8, CellValue::Temporal("2024-05-01".into())),
            (9, CellValue::Number(3.0)),
            (10, CellValue::Number(5.0)),
        ]);
        assert_eq!(score_row(&row), Ok(80.0));
    }

    #[test]
    fn test_lone_boolean_is_not_a_rating() {
        let row = row_with(&[(38, CellValue::Bool(true))]);
        assert_eq!(score_row(&row), Ok(0.0));
    }

    #[test]
    fn test_short_row_is_tolerated() {
        let mut cells = vec![CellValue::Empty; 6];
        cells[4] = CellValue::Number(3.0);
        cells[5] = CellValue::Number(4.0);
        let row = ResponseRow::new(7, cells);

        assert_eq!(score_row(&row), Ok(70.0));
    }

    #[test]
    fn test_ratings_above_scale_are_not_clamped() {
        let row = row_with(&[(5, CellValue::Number(7.0)), (6, CellValue::Number(7.0))]);
        assert_eq!(score_row(&row), Ok(140.0));
    }

    #[test]
    fn test_overflowing_ratings_fail_the_row() {
        let row = row_with(&[
            (5, CellValue::Number(f64::MAX)),
            (6, CellValue::Number(f64::MAX)),
        ]);
        assert_eq!(score_row(&row), Err(ScoreError::NonFinite { row: 2 }));
    }

    #[test]
    fn test_scoring_is_repeatable() {
        let row = standard_ratings(&[5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(score_row(&row), score_row(&row));
    }
}
