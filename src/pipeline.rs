//! Pipeline orchestration
//!
//! This module provides the public API for Mood Insights. It runs the full
//! analysis from raw entries to an ordered list of insights.

use crate::anomaly::AnomalyDetector;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::input::EntryParser;
use crate::insights::{Analytics, InsightSynthesizer};
use crate::mismatch::SentimentMismatchDetector;
use crate::sentiment::SentimentScorer;
use crate::series::Series;
use crate::tags::TagCorrelator;
use crate::trend::TrendEstimator;
use crate::types::{AnalyticsSummary, Insight, MoodEntry, MoodReport, ReportProducer};
use crate::{PRODUCER_NAME, VERSION};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

/// Analyze mood entries with the default configuration.
///
/// # Arguments
/// * `entries` - Raw mood entries in any order
/// * `scorer` - Journal sentiment capability
///
/// # Returns
/// Insights in rule order
///
/// # Example
/// ```ignore
/// let insights = analyze(&entries, &LexiconSentiment::new())?;
/// ```
pub fn analyze(
    entries: &[MoodEntry],
    scorer: &dyn SentimentScorer,
) -> Result<Vec<Insight>, AnalysisError> {
    MoodAnalyzer::new().analyze(entries, scorer)
}

/// The fully derived state of one analysis run
#[derive(Debug, Clone)]
pub struct Analysis {
    pub series: Series,
    /// None in reduced mode (too few records)
    pub analytics: Option<Analytics>,
    pub insights: Vec<Insight>,
}

impl Analysis {
    /// Serializable summary of the derived analytics
    pub fn summary(&self) -> Option<AnalyticsSummary> {
        let analytics = self.analytics.as_ref()?;
        Some(AnalyticsSummary {
            baseline_mood: analytics.stats.baseline_mood,
            mood_std_dev: analytics.stats.mood_std_dev,
            anomaly_threshold: analytics.anomaly_threshold,
            anomaly_count: self
                .series
                .anomalies()
                .map(|flags| flags.iter().filter(|&&f| f).count())
                .unwrap_or(0),
            latest_7_day_avg: self
                .series
                .rolling_avg()
                .and_then(|column| column.last().copied().flatten()),
            tag_correlations: analytics.tag_correlations.clone(),
        })
    }
}

/// Configured analyzer.
///
/// Each call builds its own series and analytics; the analyzer holds no
/// per-run state.
#[derive(Debug, Clone, Default)]
pub struct MoodAnalyzer {
    config: AnalysisConfig,
}

impl MoodAnalyzer {
    /// Create an analyzer with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom thresholds
    pub fn with_config(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run every stage and keep the derived state.
    ///
    /// Stages:
    /// 1. Series - validate and sort entries
    /// 2. TrendEstimator - baseline, std dev, rolling average
    /// 3. AnomalyDetector - flag low days
    /// 4. TagCorrelator - per-tag means
    /// 5. SentimentMismatchDetector - journal sentiment
    /// 6. InsightSynthesizer - ordered insights
    ///
    /// Stages 3-5 run only when stage 2 produced a baseline.
    pub fn run(
        &self,
        entries: &[MoodEntry],
        scorer: &dyn SentimentScorer,
    ) -> Result<Analysis, AnalysisError> {
        let mut series = Series::from_entries(entries)?;

        let trend = TrendEstimator::new(self.config.min_records, self.config.rolling_window);
        let analytics = match trend.estimate(&mut series) {
            Some(stats) => {
                let anomaly_threshold =
                    AnomalyDetector::new(self.config.anomaly_std_factor).detect(&mut series, &stats);
                let tag_correlations = TagCorrelator::correlate(&series);
                SentimentMismatchDetector::new(
                    self.config.mismatch_min_mood,
                    self.config.mismatch_max_sentiment,
                )
                .score_journals(&mut series, scorer);

                Some(Analytics {
                    stats,
                    anomaly_threshold,
                    tag_correlations,
                })
            }
            None => None,
        };

        let insights = InsightSynthesizer::new(&self.config).synthesize(&series, analytics.as_ref());

        info!(
            records = series.len(),
            insights = insights.len(),
            reduced = analytics.is_none(),
            "Mood analysis complete"
        );

        Ok(Analysis {
            series,
            analytics,
            insights,
        })
    }

    /// Analyze entries and return insights only
    pub fn analyze(
        &self,
        entries: &[MoodEntry],
        scorer: &dyn SentimentScorer,
    ) -> Result<Vec<Insight>, AnalysisError> {
        Ok(self.run(entries, scorer)?.insights)
    }

    /// Analyze entries and wrap the result in a report envelope
    pub fn analyze_report(
        &self,
        entries: &[MoodEntry],
        scorer: &dyn SentimentScorer,
    ) -> Result<MoodReport, AnalysisError> {
        let analysis = self.run(entries, scorer)?;
        let analytics = analysis.summary();

        Ok(MoodReport {
            report_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: VERSION.to_string(),
            },
            record_count: analysis.series.len(),
            first_date: analysis.series.first_date(),
            last_date: analysis.series.last_date(),
            analytics,
            insights: analysis.insights,
        })
    }

    /// Analyze a JSON array of entries and return a JSON array of insights
    pub fn analyze_json(
        &self,
        json: &str,
        scorer: &dyn SentimentScorer,
    ) -> Result<String, AnalysisError> {
        let entries = EntryParser::parse_array(json)?;
        let insights = self.analyze(&entries, scorer)?;
        Ok(serde_json::to_string(&insights)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::LexiconSentiment;
    use crate::types::InsightKind;

    fn neutral(_: &str) -> f64 {
        0.0
    }

    fn week(score: i64) -> Vec<MoodEntry> {
        (1..=7)
            .map(|d| MoodEntry::score_only(format!("2024-08-{:02}", d), score))
            .collect()
    }

    #[test]
    fn test_reduced_mode_skips_scoring() {
        let entries: Vec<MoodEntry> = (1..=6)
            .map(|d| MoodEntry::new(format!("2024-08-{:02}", d), 9, vec![], "journal"))
            .collect();
        let panicking = |_: &str| -> f64 { panic!("scorer must not run in reduced mode") };

        let analysis = MoodAnalyzer::new().run(&entries, &panicking).unwrap();
        assert!(analysis.analytics.is_none());
        assert!(analysis.summary().is_none());
        assert_eq!(analysis.insights.len(), 1);
        assert!(analysis.series.rolling_avg().is_none());
        assert!(analysis.series.anomalies().is_none());
        assert!(analysis.series.sentiment().is_none());
    }

    #[test]
    fn test_summary() {
        let analysis = MoodAnalyzer::new().run(&week(6), &neutral).unwrap();
        let summary = analysis.summary().unwrap();
        assert_eq!(summary.baseline_mood, 6.0);
        assert_eq!(summary.mood_std_dev, Some(0.0));
        assert_eq!(summary.anomaly_threshold, Some(6.0));
        assert_eq!(summary.anomaly_count, 0);
        assert_eq!(summary.latest_7_day_avg, Some(6.0));
    }

    #[test]
    fn test_report_envelope() {
        let report = MoodAnalyzer::new()
            .analyze_report(&week(4), &LexiconSentiment::new())
            .unwrap();
        assert_eq!(report.record_count, 7);
        assert_eq!(report.producer.name, PRODUCER_NAME);
        assert_eq!(report.first_date.to_string(), "2024-08-01");
        assert_eq!(report.last_date.to_string(), "2024-08-07");
        assert!(report.analytics.is_some());
        assert_eq!(report.insights[0].kind, InsightKind::Info);
        assert!(Uuid::parse_str(&report.report_id).is_ok());
    }

    #[test]
    fn test_analyze_json() {
        let json = serde_json::to_string(&week(5)).unwrap();
        let output = MoodAnalyzer::new().analyze_json(&json, &neutral).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["type"], "info");
        assert_eq!(
            value[0]["text"],
            "Over the last 7 days, your average mood has been 5.0/10."
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            min_records: 0,
            ..Default::default()
        };
        assert!(MoodAnalyzer::with_config(config).is_err());
    }

    #[test]
    fn test_custom_minimum() {
        let config = AnalysisConfig {
            min_records: 3,
            ..Default::default()
        };
        let entries = &week(7)[..3];
        let insights = MoodAnalyzer::with_config(config)
            .unwrap()
            .analyze(entries, &neutral)
            .unwrap();
        assert_eq!(
            insights[0].text,
            "Over the last 3 days, your average mood has been 7.0/10."
        );
    }
}
