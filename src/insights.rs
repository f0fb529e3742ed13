//! Insight synthesis
//!
//! Turns the derived analytics of a series into an ordered list of typed,
//! templated insights. Rules run in a fixed order:
//!
//! 1. Baseline summary (or a single "keep logging" prompt, which ends synthesis)
//! 2. Tag patterns, in first-encountered tag order
//! 3. Concerning trend from recent anomalies
//! 4. Care recommendation from the latest rolling average
//! 5. First high-mood / negative-journal mismatch

use crate::anomaly::recent_anomaly_count;
use crate::config::AnalysisConfig;
use crate::mismatch::SentimentMismatchDetector;
use crate::series::Series;
use crate::types::{BaselineStats, Insight, InsightKind, TagCorrelation};
use tracing::debug;

/// Analytics derived once per run, present only when baselines exist
#[derive(Debug, Clone)]
pub struct Analytics {
    pub stats: BaselineStats,
    /// None when the standard deviation is undefined
    pub anomaly_threshold: Option<f64>,
    pub tag_correlations: Vec<TagCorrelation>,
}

/// Rule-based insight generator
pub struct InsightSynthesizer<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> InsightSynthesizer<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Produce insights in rule order
    pub fn synthesize(&self, series: &Series, analytics: Option<&Analytics>) -> Vec<Insight> {
        let Some(analytics) = analytics else {
            return vec![self.insufficient_data()];
        };

        let baseline = analytics.stats.baseline_mood;
        let mut insights = vec![Insight::new(
            InsightKind::Info,
            format!(
                "Over the last {} days, your average mood has been {:.1}/10.",
                series.len(),
                baseline
            ),
        )];

        insights.extend(self.tag_patterns(baseline, &analytics.tag_correlations));

        if let Some(insight) = self.concerning_trend(series) {
            insights.push(insight);
        }

        if let Some(insight) = self.care_recommendation(series, &analytics.stats) {
            insights.push(insight);
        }

        if let Some(insight) = self.sentiment_mismatch(series) {
            insights.push(insight);
        }

        debug!(count = insights.len(), "Synthesized insights");
        insights
    }

    fn insufficient_data(&self) -> Insight {
        Insight::new(
            InsightKind::Info,
            format!(
                "Keep logging your mood! Once you have {} days of data, we can start showing you trends.",
                self.config.min_records
            ),
        )
    }

    fn tag_patterns(&self, baseline: f64, correlations: &[TagCorrelation]) -> Vec<Insight> {
        let margin = self.config.tag_margin;

        correlations
            .iter()
            .filter_map(|c| {
                if c.mean > baseline + margin {
                    Some(Insight::new(
                        InsightKind::PositivePattern,
                        format!(
                            "Positive Pattern: When you log '{}', your mood is {:.1}/10 on average, which is higher than usual.",
                            c.tag, c.mean
                        ),
                    ))
                } else if c.mean < baseline - margin {
                    Some(Insight::new(
                        InsightKind::NegativePattern,
                        format!(
                            "Challenging Pattern: Days you log '{}' seem to be tougher, with an average mood of {:.1}/10.",
                            c.tag, c.mean
                        ),
                    ))
                } else {
                    None
                }
            })
            .collect()
    }

    fn concerning_trend(&self, series: &Series) -> Option<Insight> {
        let flags = series.anomalies()?;
        let recent = recent_anomaly_count(flags, self.config.trend_lookback);

        (recent >= self.config.trend_min_anomalies).then(|| {
            Insight::new(
                InsightKind::ConcerningTrend,
                "Concerning Trend: We've noticed a few days where your mood was significantly lower than your typical range.",
            )
        })
    }

    fn care_recommendation(&self, series: &Series, stats: &BaselineStats) -> Option<Insight> {
        if series.len() <= self.config.care_min_records {
            return None;
        }
        let std_dev = stats.mood_std_dev?;
        let latest = series.rolling_avg()?.last().copied().flatten()?;

        (latest < stats.baseline_mood - std_dev).then(|| {
            Insight::new(
                InsightKind::CareRecommendation,
                "Care Recommendation: Your average mood has been trending low for a significant period. Considering a chat with a professional is a proactive step towards well-being.",
            )
        })
    }

    fn sentiment_mismatch(&self, series: &Series) -> Option<Insight> {
        let detector = SentimentMismatchDetector::new(
            self.config.mismatch_min_mood,
            self.config.mismatch_max_sentiment,
        );
        let record = detector.first_mismatch(series)?;

        Some(Insight::new(
            InsightKind::NlpInsight,
            format!(
                "On {}, you reported a high mood, but your journal entry had a strongly negative sentiment.",
                record.date.format("%B %d")
            ),
        ))
    }
}
