//! Anomaly detection
//!
//! Flags days whose mood falls strictly below a static, full-history
//! threshold of `baseline - factor * std_dev`.

use crate::series::Series;
use crate::types::BaselineStats;
use tracing::debug;

/// Detector for unusually low mood days
pub struct AnomalyDetector {
    std_factor: f64,
}

impl AnomalyDetector {
    pub fn new(std_factor: f64) -> Self {
        Self { std_factor }
    }

    /// Threshold below which a score is anomalous, None if std dev is undefined
    pub fn threshold(&self, stats: &BaselineStats) -> Option<f64> {
        stats
            .mood_std_dev
            .map(|std_dev| stats.baseline_mood - self.std_factor * std_dev)
            .filter(|t| t.is_finite())
    }

    /// Fill the anomaly column and return the threshold used.
    ///
    /// Leaves the column absent when the threshold is undefined.
    pub fn detect(&self, series: &mut Series, stats: &BaselineStats) -> Option<f64> {
        let threshold = self.threshold(stats)?;
        let flags: Vec<bool> = series.scores().map(|s| s < threshold).collect();

        debug!(
            threshold,
            anomalies = flags.iter().filter(|&&f| f).count(),
            "Flagged anomalies"
        );

        series.set_anomalies(flags);
        Some(threshold)
    }
}

/// Number of flagged days among the most recent `lookback` records
pub fn recent_anomaly_count(flags: &[bool], lookback: usize) -> usize {
    let start = flags.len().saturating_sub(lookback);
    flags[start..].iter().filter(|&&f| f).count()
}
