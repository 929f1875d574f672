// src/export.rs
//! Export formats. JSON and CSV are built locally, PDF and DOCX come from the backend.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::types::ResumeRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
    Json,
    Csv,
}

/// Formats rendered server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }

    /// True when no network call is needed.
    pub fn is_local(self) -> bool {
        self.document().is_none()
    }

    pub fn document(self) -> Option<DocumentFormat> {
        match self {
            Self::Pdf => Some(DocumentFormat::Pdf),
            Self::Docx => Some(DocumentFormat::Docx),
            Self::Json | Self::Csv => None,
        }
    }

    pub fn file_name(self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }
}

/// Pretty printed JSON of any exportable value.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize export JSON")
}

const CSV_COLUMNS: [&str; 11] = [
    "name",
    "emails",
    "phones",
    "links",
    "skills",
    "education",
    "work_experience",
    "organizations",
    "locations",
    "dates",
    "summary",
];

/// One header row and one data row. Header names are bare, every value is
/// quoted and list fields are joined with `;`.
pub fn to_csv(record: &ResumeRecord) -> Result<String> {
    let mut header = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());
    header
        .write_record(CSV_COLUMNS)
        .context("Failed to write CSV header")?;
    let header = header
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV header: {}", e.error()))?;

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(header);

    let join = |values: &[String]| values.join(";");
    let row = [
        record.name.clone().unwrap_or_default(),
        join(&record.emails),
        join(&record.phones),
        join(&record.links),
        join(&record.skills),
        join(&record.education),
        join(&record.experience),
        join(&record.organizations),
        join(&record.locations),
        join(&record.dates),
        record.summary.clone().unwrap_or_default(),
    ];
    writer.write_record(&row).context("Failed to write CSV row")?;

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}
