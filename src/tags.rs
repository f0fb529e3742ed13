//! Tag correlation
//!
//! Groups mood scores by tag and reduces each group to its mean. Results keep
//! the order in which tags were first seen so downstream output is stable.

use crate::series::Series;
use crate::types::TagCorrelation;
use std::collections::HashMap;

/// Computes per-tag average mood
pub struct TagCorrelator;

impl TagCorrelator {
    /// Mean mood per tag, in first-encountered order
    pub fn correlate(series: &Series) -> Vec<TagCorrelation> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<TagAccumulator> = Vec::new();

        for (idx, record) in series.records().iter().enumerate() {
            let score = f64::from(record.mood_score);
            for tag in series.tags(idx) {
                let slot = *index.entry(tag.as_str()).or_insert_with(|| {
                    groups.push(TagAccumulator::new(tag));
                    groups.len() - 1
                });
                groups[slot].add(idx, score);
            }
        }

        groups.into_iter().map(TagAccumulator::finish).collect()
    }
}

/// Running sum for a single tag
struct TagAccumulator {
    tag: String,
    sum: f64,
    count: usize,
    last_record: Option<usize>,
}

impl TagAccumulator {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            sum: 0.0,
            count: 0,
            last_record: None,
        }
    }

    fn add(&mut self, record: usize, score: f64) {
        // Repeated tag on the same record
        if self.last_record == Some(record) {
            return;
        }
        self.last_record = Some(record);
        self.sum += score;
        self.count += 1;
    }

    fn finish(self) -> TagCorrelation {
        TagCorrelation {
            mean: self.sum / self.count as f64,
            tag: self.tag,
            count: self.count,
        }
    }
}
