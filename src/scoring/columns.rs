//! Worksheet columns that carry satisfaction ratings.

/// A rated survey question and the 1-based worksheet column holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SatisfactionColumn {
    pub label: &'static str,
    pub index: usize,
}

const fn column(label: &'static str, index: usize) -> SatisfactionColumn {
    SatisfactionColumn { label, index }
}

/// Column of "How likely are you to recommend this platform to others?",
/// answered on a 1-10 scale.
pub const RECOMMENDATION_COLUMN: usize = 38;

/// Rated questions in worksheet order. Every question except the
/// recommendation one is answered on a 1-5 scale.
pub static SATISFACTION_COLUMNS: &[SatisfactionColumn] = &[
    column("The tutorials are well-structured and easy to follow", 5),
    column("The exercises help reinforce the concepts learned", 6),
    column("The quizzes effectively test my understanding", 7),
    column("The progression of topics makes sense", 8),
    column("The content is up-to-date with current GitHub features", 9),
    column("How helpful is the personal dashboard?", 10),
    column("The progress tracking accurately reflects my learning journey", 13),
    column("I find the progress indicators motivating", 14),
    column("The dashboard provides useful insights about my learning", 15),
    column("The leaderboard motivates me to complete more exercises", 17),
    column("The scoring system is fair and transparent", 18),
    column("The AI chatbot provides helpful responses", 23),
    column("The AI chatbot understands my questions correctly", 24),
    column("Chatbot and exercises integration", 29),
    column("Leaderboard and progress tracking", 30),
    column("Chatbot and error resolution", 31),
    column("How would you rate the platform's performance?", 36),
    column("How would you rate the platform's user interface?", 37),
    column(
        "How likely are you to recommend this platform to others?",
        RECOMMENDATION_COLUMN,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_set_layout() {
        let indices: Vec<usize> = SATISFACTION_COLUMNS.iter().map(|c| c.index).collect();
        assert_eq!(
            indices,
            vec![
                5, 6, 7, 8, 9, 10, 13, 14, 15, 17, 18, 23, 24, 29, 30, 31, 36, 37, 38
            ]
        );
    }

    #[test]
    fn test_recommendation_is_last() {
        assert_eq!(
            SATISFACTION_COLUMNS.last().map(|c| c.index),
            Some(RECOMMENDATION_COLUMN)
        );
    }
}
