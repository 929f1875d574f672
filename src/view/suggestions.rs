use std::fmt;

use crate::types::Suggestion;

pub struct SuggestionView<'a> {
    suggestion: &'a Suggestion,
}

impl<'a> SuggestionView<'a> {
    pub fn new(suggestion: &'a Suggestion) -> Self {
        Self { suggestion }
    }

    pub fn is_empty(&self) -> bool {
        self.suggestion.suggestion.trim().is_empty()
    }
}

impl fmt::Display for SuggestionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        writeln!(f, "AI Suggestions")?;
        writeln!(f, "{}", self.suggestion.suggestion.trim_end())?;
        if let Some(improved) = self.suggestion.improved_resume() {
            writeln!(f)?;
            writeln!(f, "Improved Resume (AI):")?;
            writeln!(f, "{}", improved)?;
        }
        Ok(())
    }
}
