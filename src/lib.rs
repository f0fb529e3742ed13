//! Mood Insights - Turns daily mood journals into human-readable insights
//!
//! A chronological series of self-reported mood records (score, tags, journal)
//! flows through a deterministic pipeline: series validation → baseline and
//! rolling trend → anomaly flags → tag correlation → journal sentiment →
//! insight synthesis.
//!
//! Sentiment scoring is injected through [`SentimentScorer`]; any
//! `Fn(&str) -> f64` works, and [`LexiconSentiment`] is bundled for callers
//! without their own model.

pub mod anomaly;
pub mod config;
pub mod error;
pub mod input;
pub mod insights;
pub mod mismatch;
pub mod pipeline;
pub mod report;
pub mod sentiment;
pub mod series;
pub mod tags;
pub mod trend;
pub mod types;

// FFI bindings for C interop
#[cfg(feature = "ffi")]
pub mod ffi;

pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use input::EntryParser;
pub use pipeline::{analyze, Analysis, MoodAnalyzer};
pub use sentiment::{LexiconSentiment, SentimentScorer};
pub use types::{Insight, InsightKind, MoodEntry, MoodRecord, MoodReport};

/// Library version embedded in reports
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "mood-insights";
