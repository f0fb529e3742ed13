//! Core data types for Mood Insights
//!
//! This module defines the records, insights and report envelopes that flow
//! through the analysis pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A raw mood entry as supplied by the caller (console, file, API)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Calendar date (ISO-8601 date or date-time)
    pub date: String,
    /// Self-reported mood (1-10)
    pub mood_score: i64,
    /// Free-form tags, missing or null means none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Journal text, missing or null means empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
}

impl MoodEntry {
    /// Create an entry with tags and journal
    pub fn new(
        date: impl Into<String>,
        mood_score: i64,
        tags: Vec<String>,
        journal: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            mood_score,
            tags: Some(tags),
            journal: Some(journal.into()),
        }
    }

    /// Create an entry carrying only a date and score
    pub fn score_only(date: impl Into<String>, mood_score: i64) -> Self {
        Self {
            date: date.into(),
            mood_score,
            tags: None,
            journal: None,
        }
    }
}

/// A validated, immutable mood record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodRecord {
    pub date: NaiveDate,
    /// Mood score, guaranteed to be in 1..=10
    pub mood_score: u8,
    pub tags: Vec<String>,
    pub journal: String,
}

/// Insight categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Info,
    PositivePattern,
    NegativePattern,
    ConcerningTrend,
    CareRecommendation,
    NlpInsight,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Info => "info",
            InsightKind::PositivePattern => "positive_pattern",
            InsightKind::NegativePattern => "negative_pattern",
            InsightKind::ConcerningTrend => "concerning_trend",
            InsightKind::CareRecommendation => "care_recommendation",
            InsightKind::NlpInsight => "nlp_insight",
        }
    }
}

/// A single typed, human-readable finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub text: String,
}

impl Insight {
    pub fn new(kind: InsightKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Average mood across all days carrying one tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagCorrelation {
    pub tag: String,
    /// Mean mood score of records with this tag
    pub mean: f64,
    /// Number of records with this tag
    pub count: usize,
}

/// Whole-series statistics, present only once enough records exist
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineStats {
    /// Mean of all mood scores
    pub baseline_mood: f64,
    /// Sample standard deviation, None for a single record
    pub mood_std_dev: Option<f64>,
}

/// Summary of the derived analytics of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub baseline_mood: f64,
    pub mood_std_dev: Option<f64>,
    pub anomaly_threshold: Option<f64>,
    pub anomaly_count: usize,
    pub latest_7_day_avg: Option<f64>,
    pub tag_correlations: Vec<TagCorrelation>,
}

/// Producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
}

/// Envelope around one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodReport {
    pub report_id: String,
    pub generated_at: DateTime<Utc>,
    pub producer: ReportProducer,
    pub record_count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Absent when fewer records than the baseline minimum were supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<AnalyticsSummary>,
    pub insights: Vec<Insight>,
}
