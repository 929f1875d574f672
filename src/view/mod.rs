// src/view/mod.rs
//! Presentational views of backend payloads. No state, no I/O.

pub mod analytics;
pub mod extraction;
pub mod match_score;
pub mod suggestions;

pub use analytics::AnalyticsView;
pub use extraction::ExtractionView;
pub use match_score::MatchScoreView;
pub use suggestions::SuggestionView;

/// Placeholder for absent values.
pub const EMPTY: &str = "—";

pub(crate) fn or_empty(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| EMPTY.to_string())
}

pub(crate) fn joined(values: &[String], separator: &str) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(separator))
    }
}
