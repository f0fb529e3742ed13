//! Mood entry parsing
//!
//! Reads entries from a JSON array or NDJSON (one entry per line) and reports
//! per-entry validation problems without running an analysis.

use crate::error::AnalysisError;
use crate::series::parse_date;
use crate::types::MoodEntry;

/// Parser for mood entry payloads
pub struct EntryParser;

impl EntryParser {
    /// Parse a JSON string containing an array of entries
    pub fn parse_array(json: &str) -> Result<Vec<MoodEntry>, AnalysisError> {
        let entries: Vec<MoodEntry> = serde_json::from_str(json)?;
        Ok(entries)
    }

    /// Parse NDJSON (newline-delimited JSON) containing entries
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<MoodEntry>, AnalysisError> {
        let mut entries = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<MoodEntry>(trimmed) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    return Err(AnalysisError::InvalidInput(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(entries)
    }

    /// Validate a batch of entries, returning only the failures
    pub fn validate_entries(entries: &[MoodEntry]) -> Vec<EntryProblem> {
        entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| {
                let problem = if parse_date(&entry.date).is_none() {
                    format!("cannot parse date '{}'", entry.date)
                } else if !(1..=10).contains(&entry.mood_score) {
                    format!("mood score {} is outside 1-10", entry.mood_score)
                } else {
                    return None;
                };
                Some(EntryProblem {
                    index: idx,
                    date: entry.date.clone(),
                    problem,
                })
            })
            .collect()
    }
}

/// A single invalid entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryProblem {
    pub index: usize,
    pub date: String,
    pub problem: String,
}
