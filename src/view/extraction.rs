use std::fmt;

use super::{joined, or_empty, EMPTY};
use crate::types::ResumeRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub value: Option<String>,
    pub highlight: bool,
}

impl Field {
    fn new(label: &'static str, value: Option<String>) -> Self {
        Self {
            label,
            value,
            highlight: false,
        }
    }

    pub fn display_value(&self) -> String {
        or_empty(self.value.clone())
    }
}

/// Extracted resume fields, as labelled rows and skill badges.
pub struct ExtractionView<'a> {
    record: &'a ResumeRecord,
}

impl<'a> ExtractionView<'a> {
    pub fn new(record: &'a ResumeRecord) -> Self {
        Self { record }
    }

    pub fn fields(&self) -> Vec<Field> {
        let r = self.record;
        vec![
            Field {
                highlight: true,
                ..Field::new("Name", r.name.clone())
            },
            Field::new("Emails", joined(&r.emails, ", ")),
            Field::new("Phones", joined(&r.phones, ", ")),
            Field::new("Links", joined(&r.links, ", ")),
            Field::new("Education", joined(&r.education, "; ")),
            Field::new("Work Experience", joined(&r.experience, "; ")),
            Field::new("Skills", joined(&r.skills, ", ")),
            Field::new("Organizations", joined(&r.organizations, ", ")),
            Field::new("Locations", joined(&r.locations, ", ")),
            Field::new("Dates", joined(&r.dates, ", ")),
            Field::new("Summary", r.summary.clone()),
        ]
    }

    /// One badge per skill, in received order.
    pub fn skill_badges(&self) -> Vec<&'a str> {
        self.record.skills.iter().map(String::as_str).collect()
    }

    pub fn display_name(&self) -> &'a str {
        self.record
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Unknown Candidate")
    }

    pub fn initial(&self) -> char {
        self.record
            .name
            .as_deref()
            .and_then(|n| n.trim().chars().next())
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('?')
    }

    pub fn primary_email(&self) -> &'a str {
        self.record
            .emails
            .first()
            .map(String::as_str)
            .unwrap_or("No email found")
    }
}

impl fmt::Display for ExtractionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[{}] {} <{}>",
            self.initial(),
            self.display_name(),
            self.primary_email()
        )?;
        for field in self.fields() {
            writeln!(f, "  {:<16} {}", format!("{}:", field.label), field.display_value())?;
        }

        let badges = self.skill_badges();
        if badges.is_empty() {
            writeln!(f, "  Skills (0): {}", EMPTY)?;
        } else {
            let rendered: Vec<String> = badges.iter().map(|s| format!("[{}]", s)).collect();
            writeln!(f, "  Skills ({}): {}", badges.len(), rendered.join(" "))?;
        }
        Ok(())
    }
}
