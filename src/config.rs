//! Analysis configuration
//!
//! Every threshold the pipeline uses lives here. Defaults reproduce the
//! standard rule set; a JSON file can override any subset of fields.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Minimum records before baselines are computed
pub const DEFAULT_MIN_RECORDS: usize = 7;

/// Rolling average window in records
pub const DEFAULT_ROLLING_WINDOW: usize = 7;

/// Records inspected by the concerning-trend rule
pub const DEFAULT_TREND_LOOKBACK: usize = 14;

/// Tunable thresholds for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Records required before any statistics are produced
    pub min_records: usize,
    /// Trailing window for the rolling average (positional, not calendar days)
    pub rolling_window: usize,
    /// Anomaly threshold = baseline - factor * std dev
    pub anomaly_std_factor: f64,
    /// Distance from baseline a tag mean must exceed to be reported
    pub tag_margin: f64,
    /// Most recent records inspected for anomalies
    pub trend_lookback: usize,
    /// Anomalies within the lookback that make a concerning trend
    pub trend_min_anomalies: usize,
    /// Record count that must be exceeded before care is recommended
    pub care_min_records: usize,
    /// Mood strictly above this counts as high
    pub mismatch_min_mood: u8,
    /// Sentiment strictly below this counts as strongly negative
    pub mismatch_max_sentiment: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_records: DEFAULT_MIN_RECORDS,
            rolling_window: DEFAULT_ROLLING_WINDOW,
            anomaly_std_factor: 1.75,
            tag_margin: 1.0,
            trend_lookback: DEFAULT_TREND_LOOKBACK,
            trend_min_anomalies: 3,
            care_min_records: 14,
            mismatch_min_mood: 7,
            mismatch_max_sentiment: -0.5,
        }
    }
}

impl AnalysisConfig {
    /// Check that the configuration can drive an analysis
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.min_records == 0 {
            return Err(AnalysisError::Config("min_records must be at least 1".into()));
        }
        if self.rolling_window == 0 {
            return Err(AnalysisError::Config(
                "rolling_window must be at least 1".into(),
            ));
        }
        if self.trend_lookback == 0 {
            return Err(AnalysisError::Config(
                "trend_lookback must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("anomaly_std_factor", self.anomaly_std_factor),
            ("tag_margin", self.tag_margin),
            ("mismatch_max_sentiment", self.mismatch_max_sentiment),
        ] {
            if !value.is_finite() {
                return Err(AnalysisError::Config(format!("{} must be finite", name)));
            }
        }
        if self.anomaly_std_factor < 0.0 || self.tag_margin < 0.0 {
            return Err(AnalysisError::Config(
                "anomaly_std_factor and tag_margin must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON, missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
