// src/types/resume.rs
//! Structured resume fields as returned by the extraction endpoints

use serde::{Deserialize, Serialize};

/// Fields extracted from one resume. Every field may be missing upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    pub name: Option<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub links: Vec<String>,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    #[serde(rename = "work_experience", alias = "experience")]
    pub experience: Vec<String>,
    pub organizations: Vec<String>,
    pub locations: Vec<String>,
    pub dates: Vec<String>,
    pub summary: Option<String>,
}

impl ResumeRecord {
    /// Flatten every populated field into one whitespace separated string,
    /// in field order. Used as `resume_text` for the text based endpoints.
    pub fn flatten_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();

        if let Some(name) = self.name.as_deref() {
            parts.push(name);
        }
        for list in [
            &self.emails,
            &self.phones,
            &self.links,
            &self.skills,
            &self.education,
            &self.experience,
            &self.organizations,
            &self.locations,
            &self.dates,
        ] {
            parts.extend(list.iter().map(String::as_str));
        }
        if let Some(summary) = self.summary.as_deref() {
            parts.push(summary);
        }

        parts
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.flatten_text().is_empty()
    }
}

/// Body of `POST /export/pdf` and `POST /export/docx`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub name: String,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub links: Vec<String>,
    pub education: Vec<String>,
    pub work_experience: Vec<String>,
    pub skills: Vec<String>,
    pub summary: String,
}

impl From<&ResumeRecord> for ExportRequest {
    fn from(record: &ResumeRecord) -> Self {
        Self {
            name: record.name.clone().unwrap_or_default(),
            emails: record.emails.clone(),
            phones: record.phones.clone(),
            links: record.links.clone(),
            education: record.education.clone(),
            work_experience: record.experience.clone(),
            skills: record.skills.clone(),
            summary: record.summary.clone().unwrap_or_default(),
        }
    }
}
