use std::fmt;

use crate::heatmap::ScoreTier;
use crate::types::{KeywordMatch, MatchResult, SemanticMatch};

/// Skill badges shown per list before collapsing into "+N more".
pub const BADGE_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchScoreView {
    /// Overall score on a 0-100 scale.
    pub percent: f64,
    pub breakdown: Vec<(String, f64)>,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
    /// Semantic similarity on a 0-100 scale, when computed.
    pub semantic_percent: Option<f64>,
}

impl MatchScoreView {
    /// From the file match endpoint, already on a 0-100 scale.
    pub fn from_match_result(result: &MatchResult) -> Self {
        Self {
            percent: result.overall_score,
            breakdown: vec![("SKILL SCORE".to_string(), result.skill_score)],
            matching_skills: result.matching_skills.clone(),
            missing_skills: result.missing_skills.clone(),
            recommendations: result.recommendations.clone(),
            semantic_percent: None,
        }
    }

    /// From the text match endpoints, whose scores are 0-1 fractions.
    pub fn from_keyword(result: &KeywordMatch, semantic: Option<&SemanticMatch>) -> Self {
        Self {
            percent: result.overall_score * 100.0,
            breakdown: result
                .breakdown
                .iter()
                .map(|(k, v)| (k.replacen('_', " ", 1).to_uppercase(), v * 100.0))
                .collect(),
            matching_skills: Vec::new(),
            missing_skills: result.missing_skills.clone(),
            recommendations: Vec::new(),
            semantic_percent: semantic.map(|s| s.semantic_score * 100.0),
        }
    }

    pub fn rounded_percent(&self) -> i64 {
        self.percent.round() as i64
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::classify(self.percent)
    }

    /// Up to [`BADGE_LIMIT`] badges and the count of hidden ones.
    pub fn badges(skills: &[String]) -> (&[String], usize) {
        let shown = &skills[..skills.len().min(BADGE_LIMIT)];
        (shown, skills.len() - shown.len())
    }
}

fn write_badges(f: &mut fmt::Formatter<'_>, title: &str, skills: &[String]) -> fmt::Result {
    if skills.is_empty() {
        return Ok(());
    }
    let (shown, hidden) = MatchScoreView::badges(skills);
    write!(f, "{} ({}):", title, skills.len())?;
    for skill in shown {
        write!(f, " [{}]", skill)?;
    }
    if hidden > 0 {
        write!(f, " +{} more", hidden)?;
    }
    writeln!(f)
}

impl fmt::Display for MatchScoreView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Match Analysis")?;
        writeln!(
            f,
            "Score: {}% ({})",
            self.rounded_percent(),
            self.tier().label()
        )?;
        for (label, value) in &self.breakdown {
            writeln!(f, "  {}: {}%", label, value.round() as i64)?;
        }
        if let Some(semantic) = self.semantic_percent {
            writeln!(f, "  SEMANTIC: {}%", semantic.round() as i64)?;
        }
        write_badges(f, "Matching", &self.matching_skills)?;
        write_badges(f, "Missing", &self.missing_skills)?;
        if !self.recommendations.is_empty() {
            writeln!(f, "Recommendations")?;
            for rec in &self.recommendations {
                writeln!(f, "  • {}", rec)?;
            }
        }
        Ok(())
    }
}
