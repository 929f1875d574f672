use std::fmt;

use super::{or_empty, EMPTY};
use crate::types::{AnalyticsSummary, Charts};

pub struct AnalyticsView<'a> {
    summary: &'a AnalyticsSummary,
    charts: Option<&'a Charts>,
}

impl<'a> AnalyticsView<'a> {
    pub fn new(summary: &'a AnalyticsSummary, charts: Option<&'a Charts>) -> Self {
        Self { summary, charts }
    }

    /// `"name (count), ..."`, or `None` for an empty list.
    pub fn format_counts(items: &[(String, u64)]) -> Option<String> {
        if items.is_empty() {
            return None;
        }
        Some(
            items
                .iter()
                .map(|(name, count)| format!("{} ({})", name, count))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Resumes", self.summary.total_resumes.to_string()),
            ("Top Skills", or_empty(Self::format_counts(&self.summary.top_skills))),
            (
                "Top Education",
                or_empty(Self::format_counts(&self.summary.top_education)),
            ),
            (
                "Top Organizations",
                or_empty(Self::format_counts(&self.summary.top_organizations)),
            ),
        ]
    }

    pub fn chart_titles(&self) -> Vec<&'static str> {
        self.charts
            .map(|c| c.entries().into_iter().map(|(title, _)| title).collect())
            .unwrap_or_default()
    }
}

impl fmt::Display for AnalyticsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analytics Dashboard")?;
        for (label, value) in self.rows() {
            writeln!(f, "  {:<18} {}", format!("{}:", label), value)?;
        }
        let charts = self.chart_titles();
        if charts.is_empty() {
            writeln!(f, "  Charts: {}", EMPTY)?;
        } else {
            writeln!(f, "  Charts: {}", charts.join(", "))?;
        }
        Ok(())
    }
}
