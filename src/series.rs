//! Series store
//!
//! Holds the validated, date-ordered mood records together with the derived
//! per-day columns the later stages fill in. Derived columns are write-once.

use crate::error::AnalysisError;
use crate::types::{MoodEntry, MoodRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

/// Validated mood records plus derived columns
#[derive(Debug, Clone)]
pub struct Series {
    records: Vec<MoodRecord>,
    rolling_avg: Option<Vec<Option<f64>>>,
    anomalies: Option<Vec<bool>>,
    sentiment: Option<Vec<f64>>,
}

impl Series {
    /// Validate and sort raw entries into a series
    pub fn from_entries(entries: &[MoodEntry]) -> Result<Self, AnalysisError> {
        if entries.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let mut records = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| to_record(idx, entry))
            .collect::<Result<Vec<_>, _>>()?;

        // Stable: equal dates keep input order
        records.sort_by_key(|r| r.date);

        Ok(Self {
            records,
            rolling_avg: None,
            anomalies: None,
            sentiment: None,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MoodRecord] {
        &self.records
    }

    /// Mood scores in date order
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| f64::from(r.mood_score))
    }

    pub fn tags(&self, idx: usize) -> &[String] {
        &self.records[idx].tags
    }

    pub fn journal(&self, idx: usize) -> &str {
        &self.records[idx].journal
    }

    pub fn first_date(&self) -> NaiveDate {
        self.records[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.records[self.records.len() - 1].date
    }

    /// Trailing rolling average column, absent until baselines exist
    pub fn rolling_avg(&self) -> Option<&[Option<f64>]> {
        self.rolling_avg.as_deref()
    }

    /// Anomaly flag column, absent until baselines exist
    pub fn anomalies(&self) -> Option<&[bool]> {
        self.anomalies.as_deref()
    }

    /// Journal sentiment column
    pub fn sentiment(&self) -> Option<&[f64]> {
        self.sentiment.as_deref()
    }

    pub fn set_rolling_avg(&mut self, column: Vec<Option<f64>>) {
        write_once(&mut self.rolling_avg, column, "mood_7_day_avg", self.records.len());
    }

    pub fn set_anomalies(&mut self, column: Vec<bool>) {
        write_once(&mut self.anomalies, column, "is_anomaly", self.records.len());
    }

    pub fn set_sentiment(&mut self, column: Vec<f64>) {
        write_once(&mut self.sentiment, column, "journal_sentiment", self.records.len());
    }
}

fn write_once<T>(slot: &mut Option<Vec<T>>, column: Vec<T>, name: &str, len: usize) {
    if slot.is_some() {
        warn!("Ignoring second write to derived column {}", name);
        return;
    }
    debug_assert_eq!(column.len(), len, "column {} misaligned with series", name);
    *slot = Some(column);
}

fn to_record(idx: usize, entry: &MoodEntry) -> Result<MoodRecord, AnalysisError> {
    let date = parse_date(&entry.date)
        .ok_or_else(|| AnalysisError::unparseable_date(idx, &entry.date))?;

    if !(1..=10).contains(&entry.mood_score) {
        return Err(AnalysisError::score_out_of_range(
            idx,
            &entry.date,
            entry.mood_score,
        ));
    }

    Ok(MoodRecord {
        date,
        mood_score: entry.mood_score as u8,
        tags: entry.tags.clone().unwrap_or_default(),
        journal: entry.journal.clone().unwrap_or_default(),
    })
}

/// Parse an ISO-8601 date or date-time into a calendar date
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sorts_by_date() {
        let entries = vec![
            MoodEntry::score_only("2024-03-03", 3),
            MoodEntry::score_only("2024-03-01", 1),
            MoodEntry::score_only("2024-03-02", 2),
        ];
        let series = Series::from_entries(&entries).unwrap();
        let scores: Vec<f64> = series.scores().collect();
        assert_eq!(scores, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(series.last_date(), NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    }

    #[test]
    fn test_normalizes_missing_fields() {
        let series = Series::from_entries(&[MoodEntry::score_only("2024-03-01", 5)]).unwrap();
        assert!(series.tags(0).is_empty());
        assert_eq!(series.journal(0), "");
    }

    #[test]
    fn test_rejects_out_of_range_scores() {
        for score in [0, 11, -3] {
            let result = Series::from_entries(&[MoodEntry::score_only("2024-03-01", score)]);
            assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_rejects_bad_dates() {
        let result = Series::from_entries(&[
            MoodEntry::score_only("2024-03-01", 5),
            MoodEntry::score_only("yesterday", 5),
        ]);
        match result {
            Err(AnalysisError::InvalidInput(msg)) => assert!(msg.contains("yesterday")),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            Series::from_entries(&[]),
            Err(AnalysisError::EmptyInput)
        ));
    }

    #[test]
    fn test_parse_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(parse_date("2024-01-15"), expected);
        assert_eq!(parse_date("2024-01-15T08:30:00Z"), expected);
        assert_eq!(parse_date("2024-01-15T23:30:00-05:00"), expected);
        assert_eq!(parse_date("2024-01-15 08:30:00"), expected);
        assert_eq!(parse_date("2024-01-15T08:30:00"), expected);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn test_derived_columns_are_write_once() {
        let mut series = Series::from_entries(&[MoodEntry::score_only("2024-03-01", 5)]).unwrap();
        assert!(series.sentiment().is_none());
        series.set_sentiment(vec![0.4]);
        series.set_sentiment(vec![-0.9]);
        assert_eq!(series.sentiment(), Some(&[0.4][..]));
    }
}
