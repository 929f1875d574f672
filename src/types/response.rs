use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::resume::ResumeRecord;

// ===== /api/* responses =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub filename: Option<String>,
    pub data: ResumeRecord,
}

/// Match result from `/api/match/file`. Scores are on a 0-100 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchResult {
    pub overall_score: f64,
    pub skill_score: f64,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchResponse {
    pub success: bool,
    pub filename: Option<String>,
    pub resume_data: ResumeRecord,
    pub match_result: MatchResult,
}

// ===== Text pipeline responses =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractResponse {
    pub text: Option<String>,
    pub needs_ocr: bool,
}

/// Keyword match from `/match/match`. Scores are fractions in 0-1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordMatch {
    pub overall_score: f64,
    pub breakdown: BTreeMap<String, f64>,
    pub missing_skills: Vec<String>,
    pub suggested_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticMatch {
    pub semantic_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestion {
    pub suggestion: String,
}

const IMPROVED_RESUME_MARKER: &str = "Improved Resume:";

impl Suggestion {
    /// Text after the `Improved Resume:` marker, trimmed. `None` when the
    /// marker is absent or nothing follows it.
    pub fn improved_resume(&self) -> Option<&str> {
        let (_, tail) = self.suggestion.split_once(IMPROVED_RESUME_MARKER)?;
        let tail = tail.trim();
        (!tail.is_empty()).then_some(tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_response_decodes_backend_shape() {
        let body = r#"{
            "success": true,
            "filename": "cv.pdf",
            "resume_data": {"name": "Jo", "skills": ["Go", "Rust"]},
            "match_result": {
                "overall_score": 72.5,
                "skill_score": 60.0,
                "matching_skills": ["rust"],
                "missing_skills": ["kubernetes"],
                "recommendations": ["Add cloud experience"]
            }
        }"#;
        let parsed: MatchResponse = serde_json::from_str(body).expect("decode");
        assert_eq!(parsed.resume_data.skills.len(), 2);
        assert_eq!(parsed.match_result.overall_score, 72.5);
        assert_eq!(parsed.match_result.missing_skills, vec!["kubernetes"]);
    }

    #[test]
    fn test_keyword_match_breakdown() {
        let body = r#"{"overall_score": 0.45, "breakdown": {"skill_score": 0.3, "tone_score": 0.5}}"#;
        let parsed: KeywordMatch = serde_json::from_str(body).expect("decode");
        assert_eq!(parsed.breakdown.len(), 2);
        assert_eq!(parsed.breakdown["skill_score"], 0.3);
    }

    #[test]
    fn test_improved_resume_split() {
        let s = Suggestion {
            suggestion: "Looks solid.\nImproved Resume:\n  Jo - Engineer\n".into(),
        };
        assert_eq!(s.improved_resume(), Some("Jo - Engineer"));

        let none = Suggestion {
            suggestion: "No rewrite offered".into(),
        };
        assert_eq!(none.improved_resume(), None);
    }

    #[test]
    fn test_extract_needs_ocr() {
        let parsed: ExtractResponse =
            serde_json::from_str(r#"{"text": null, "needs_ocr": true}"#).expect("decode");
        assert!(parsed.needs_ocr);
        assert!(parsed.text.is_none());
    }
}
