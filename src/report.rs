//! Report rendering
//!
//! Console presentation of insights: one icon per insight kind followed by
//! the insight text.

use crate::types::{Insight, InsightKind};

/// Banner printed above a rendered report
pub const REPORT_TITLE: &str = "✨ Your Mindful Metrics Report ✨";

/// Display icon for an insight kind
pub fn icon(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Info => "ℹ️",
        InsightKind::PositivePattern => "✅",
        InsightKind::NegativePattern => "⚠️",
        InsightKind::ConcerningTrend => "❗️",
        InsightKind::CareRecommendation => "❤️",
        InsightKind::NlpInsight => "🧠",
    }
}

/// Render a single insight line
pub fn render_insight(insight: &Insight) -> String {
    format!("{} {}", icon(insight.kind), insight.text)
}

/// Render insights under the report banner, one blank line between entries
pub fn render_text(insights: &[Insight]) -> String {
    let rule = "=".repeat(30);
    let mut out = format!("{}\n{}\n{}\n", rule, REPORT_TITLE, rule);
    for insight in insights {
        out.push_str(&render_insight(insight));
        out.push_str("\n\n");
    }
    out
}
