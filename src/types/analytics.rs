use serde::{Deserialize, Serialize};

/// Aggregate counts across a batch of parsed resumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSummary {
    pub total_resumes: u64,
    pub top_skills: Vec<(String, u64)>,
    pub top_education: Vec<(String, u64)>,
    pub top_organizations: Vec<(String, u64)>,
}

/// Base64 PNG bar charts, present only when requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Charts {
    pub skills: Option<String>,
    pub education: Option<String>,
    pub organizations: Option<String>,
}

impl Charts {
    pub fn is_empty(&self) -> bool {
        self.skills.is_none() && self.education.is_none() && self.organizations.is_none()
    }

    /// `(title, base64)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Skills", self.skills.as_deref()),
            ("Education", self.education.as_deref()),
            ("Organizations", self.organizations.as_deref()),
        ]
        .into_iter()
        .filter_map(|(title, data)| data.map(|d| (title, d)))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsResponse {
    pub summary: AnalyticsSummary,
    pub charts: Charts,
}

/// One parsed file from `/bulk/bulk`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkResult {
    pub filename: String,
    pub text: Option<String>,
    pub entities: serde_json::Value,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub links: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkParseResponse {
    pub results: Vec<BulkResult>,
    pub csv: String,
    pub analytics: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_pairs_decode() {
        let body = r#"{
            "summary": {
                "total_resumes": 3,
                "top_skills": [["Rust", 3], ["Go", 1]],
                "top_education": [],
                "top_organizations": [["Acme", 2]]
            },
            "charts": {}
        }"#;
        let parsed: AnalyticsResponse = serde_json::from_str(body).expect("decode");
        assert_eq!(parsed.summary.total_resumes, 3);
        assert_eq!(parsed.summary.top_skills[0], ("Rust".to_string(), 3));
        assert!(parsed.charts.is_empty());
    }

    #[test]
    fn test_chart_entries_skip_missing() {
        let charts = Charts {
            skills: Some("AAAA".into()),
            education: None,
            organizations: Some("BBBB".into()),
        };
        let titles: Vec<_> = charts.entries().into_iter().map(|(t, _)| t).collect();
        assert_eq!(titles, vec!["Skills", "Organizations"]);
    }
}
