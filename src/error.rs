//! Error types for Mood Insights

use thiserror::Error;

/// Errors that can occur while building or analyzing a mood series
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No mood entries supplied")]
    EmptyInput,

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AnalysisError {
    /// Score outside the accepted 1-10 range
    pub(crate) fn score_out_of_range(index: usize, date: &str, score: i64) -> Self {
        AnalysisError::InvalidInput(format!(
            "entry {} ({}): mood score {} is outside 1-10",
            index, date, score
        ))
    }

    /// Date string that none of the accepted formats could parse
    pub(crate) fn unparseable_date(index: usize, date: &str) -> Self {
        AnalysisError::InvalidInput(format!("entry {}: cannot parse date '{}'", index, date))
    }
}
