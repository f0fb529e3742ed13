//! Sentiment mismatch detection
//!
//! Scores every journal with the injected [`SentimentScorer`] and finds days
//! where a high self-reported mood sits next to a strongly negative journal.

use crate::sentiment::SentimentScorer;
use crate::series::Series;
use crate::types::MoodRecord;
use tracing::{debug, warn};

/// Journal sentiment scorer and mismatch query
pub struct SentimentMismatchDetector {
    min_mood: u8,
    max_sentiment: f64,
}

impl SentimentMismatchDetector {
    pub fn new(min_mood: u8, max_sentiment: f64) -> Self {
        Self {
            min_mood,
            max_sentiment,
        }
    }

    /// Fill the sentiment column. Empty journals score 0 without calling the scorer.
    pub fn score_journals(&self, series: &mut Series, scorer: &dyn SentimentScorer) {
        let column: Vec<f64> = series
            .records()
            .iter()
            .map(|record| journal_sentiment(record, scorer))
            .collect();

        debug!(
            scored = series.records().iter().filter(|r| !r.journal.is_empty()).count(),
            "Scored journals"
        );

        series.set_sentiment(column);
    }

    /// Earliest record with high mood and strongly negative sentiment
    pub fn first_mismatch<'a>(&self, series: &'a Series) -> Option<&'a MoodRecord> {
        let sentiment = series.sentiment()?;
        series
            .records()
            .iter()
            .zip(sentiment)
            .find(|(record, score)| {
                record.mood_score > self.min_mood && **score < self.max_sentiment
            })
            .map(|(record, _)| record)
    }
}

fn journal_sentiment(record: &MoodRecord, scorer: &dyn SentimentScorer) -> f64 {
    if record.journal.is_empty() {
        return 0.0;
    }
    let score = scorer.score(&record.journal);
    if !score.is_finite() {
        warn!(date = %record.date, "Sentiment scorer returned a non-finite value; using 0");
        return 0.0;
    }
    score.clamp(-1.0, 1.0)
}
