//! Trend estimation
//!
//! This module computes the whole-history baseline (mean and sample standard
//! deviation) and the trailing rolling average over a series.

use crate::series::Series;
use crate::types::BaselineStats;
use tracing::debug;

/// Baseline and rolling-average estimator
pub struct TrendEstimator {
    min_records: usize,
    window: usize,
}

impl TrendEstimator {
    pub fn new(min_records: usize, window: usize) -> Self {
        Self {
            min_records,
            window,
        }
    }

    /// Compute baseline statistics and fill the rolling average column.
    ///
    /// Returns None (and leaves the series untouched) when the series holds
    /// fewer than `min_records` records.
    pub fn estimate(&self, series: &mut Series) -> Option<BaselineStats> {
        if series.len() < self.min_records {
            debug!(
                records = series.len(),
                required = self.min_records,
                "Not enough records for baseline"
            );
            return None;
        }

        let scores: Vec<f64> = series.scores().collect();
        let baseline_mood = mean(&scores)?;
        let mood_std_dev = sample_std_dev(&scores, baseline_mood);
        series.set_rolling_avg(rolling_mean(&scores, self.window));

        debug!(baseline_mood, ?mood_std_dev, "Computed baseline");

        Some(BaselineStats {
            baseline_mood,
            mood_std_dev,
        })
    }
}

/// Arithmetic mean, None for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), None below two values
pub fn sample_std_dev(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Trailing mean over `window` positions, undefined until the window fills
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut prefix = Vec::with_capacity(values.len() + 1);
    prefix.push(0.0);
    for v in values {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + v);
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                Some((prefix[i + 1] - prefix[i + 1 - window]) / window as f64)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MoodEntry;

    fn make_series(scores: &[i64]) -> Series {
        let entries: Vec<MoodEntry> = scores
            .iter()
            .enumerate()
            .map(|(i, &s)| MoodEntry::score_only(format!("2024-01-{:02}", i + 1), s))
            .collect();
        Series::from_entries(&entries).unwrap()
    }

    #[test]
    fn test_no_baseline_below_minimum() {
        let mut series = make_series(&[5, 6, 7, 8, 9, 10]);
        let stats = TrendEstimator::new(7, 7).estimate(&mut series);
        assert!(stats.is_none());
        assert!(series.rolling_avg().is_none());
    }

    #[test]
    fn test_baseline_and_std_dev() {
        let mut series = make_series(&[8, 8, 8, 8, 8, 8, 8, 2]);
        let stats = TrendEstimator::new(7, 7).estimate(&mut series).unwrap();
        assert!((stats.baseline_mood - 7.25).abs() < 1e-9);
        // Squared deviations: 7 * 0.5625 + 27.5625 = 31.5, / 7 = 4.5
        assert!((stats.mood_std_dev.unwrap() - 4.5_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_rolling_average_positions() {
        let mut series = make_series(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        TrendEstimator::new(7, 7).estimate(&mut series).unwrap();
        let rolling = series.rolling_avg().unwrap();

        assert!(rolling[..6].iter().all(Option::is_none));
        assert!((rolling[6].unwrap() - 4.0).abs() < 1e-9);
        assert!((rolling[7].unwrap() - 5.0).abs() < 1e-9);
        assert!((rolling[8].unwrap() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_dates_and_gaps_window_by_position() {
        let mut entries = vec![MoodEntry::score_only("2024-03-20", 9)];
        entries.extend((1..=6).map(|d| MoodEntry::score_only(format!("2024-03-{d:02}"), 5)));
        entries.push(MoodEntry::score_only("2024-03-07", 1));
        entries.push(MoodEntry::score_only("2024-03-07", 5));

        let mut series = Series::from_entries(&entries).unwrap();
        let scores: Vec<f64> = series.scores().collect();
        assert_eq!(scores, vec![5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 1.0, 5.0, 9.0]);

        TrendEstimator::new(7, 7).estimate(&mut series).unwrap();
        let rolling = series.rolling_avg().unwrap();
        assert!(rolling[..6].iter().all(Option::is_none));
        assert!((rolling[6].unwrap() - 31.0 / 7.0).abs() < 1e-9);
        assert!((rolling[7].unwrap() - 31.0 / 7.0).abs() < 1e-9);
        // 03-20 follows 03-07 directly; the gap does not shrink the window
        assert!((rolling[8].unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_record_std_dev_undefined() {
        let mut series = make_series(&[6]);
        let stats = TrendEstimator::new(1, 7).estimate(&mut series).unwrap();
        assert_eq!(stats.baseline_mood, 6.0);
        assert!(stats.mood_std_dev.is_none());
    }

    #[test]
    fn test_constant_series_zero_std_dev() {
        let mut series = make_series(&[5; 15]);
        let stats = TrendEstimator::new(7, 7).estimate(&mut series).unwrap();
        assert_eq!(stats.baseline_mood, 5.0);
        assert_eq!(stats.mood_std_dev, Some(0.0));
    }

    #[test]
    fn test_rolling_mean_short_window() {
        let rolling = rolling_mean(&[2.0, 4.0, 6.0], 2);
        assert_eq!(rolling, vec![None, Some(3.0), Some(5.0)]);
    }
}
