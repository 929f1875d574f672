// src/controller/workbench.rs
//! Extraction workbench: text extraction with OCR fallback, entity
//! extraction, keyword and semantic matching, AI suggestions and export.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use super::state::{ActionKind, ActionLog};
use super::{MISSING_INPUT_MESSAGE, NO_EXPORT_DATA_MESSAGE};
use crate::core::{FsOps, ResumeApi};
use crate::export::{self, ExportFormat};
use crate::types::{
    AnalyticsResponse, ExportRequest, KeywordMatch, ResumeRecord, SemanticMatch, Suggestion,
};
use crate::upload::{AcceptPolicy, UploadControl, UploadEvent, UploadFile};

const EXTRACTION_FAILED: &str = "Extraction failed. Please try another file.";
const MATCH_FAILED: &str = "Matching failed. Try again.";
const SUGGEST_FAILED: &str = "AI suggestion failed. Try again.";
const EXPORT_FAILED: &str = "Export failed. Try again.";
const EXPORT_STEM: &str = "resume";

#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkbenchState {
    pub file_name: Option<String>,
    pub job_description: String,
    pub extracted: Option<ResumeRecord>,
    pub analytics: Option<AnalyticsResponse>,
    pub keyword_match: Option<KeywordMatch>,
    pub semantic_match: Option<SemanticMatch>,
    pub suggestion: Option<Suggestion>,
    pub improved_resume: Option<String>,
    pub last_export: Option<PathBuf>,
    pub actions: ActionLog,
}

pub struct WorkbenchPage<A: ResumeApi> {
    api: A,
    upload: UploadControl,
    state: WorkbenchState,
}

impl<A: ResumeApi> WorkbenchPage<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            upload: UploadControl::new(AcceptPolicy::documents_and_images()),
            state: WorkbenchState::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &WorkbenchState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.state.actions.error()
    }

    pub fn is_loading(&self) -> bool {
        self.state.actions.is_loading()
    }

    pub fn extracted(&self) -> Option<&ResumeRecord> {
        self.state.extracted.as_ref()
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.state.job_description = text.into();
    }

    /// Feed a drag/drop or picker event. Files outside the allow-list are
    /// ignored.
    pub async fn handle_upload(&mut self, event: UploadEvent) {
        if let Some(file) = self.upload.handle(event, |_| {}) {
            self.run_pipeline(file).await;
        }
    }

    /// Pick a file as if from the file dialog.
    pub async fn upload_file(&mut self, file: UploadFile) {
        self.handle_upload(UploadEvent::Pick(file)).await;
    }

    /// Run the extraction pipeline on a new file. Every previous result is
    /// dropped first, including the match and suggestion. The record is kept
    /// even when the analytics step after it fails.
    async fn run_pipeline(&mut self, file: UploadFile) {
        let job_description = std::mem::take(&mut self.state.job_description);
        self.state = WorkbenchState {
            file_name: Some(file.name.clone()),
            job_description,
            ..Default::default()
        };

        self.state.actions.begin(ActionKind::Upload);
        let record = match self.extract_record(&file).await {
            Ok(record) => record,
            Err(e) => {
                error!("Extraction pipeline failed for {}: {:#}", file.name, e);
                self.state.actions.fail(ActionKind::Upload, EXTRACTION_FAILED);
                return;
            }
        };
        info!("Extracted {} skills from {}", record.skills.len(), file.name);

        let analytics = self.summarize(&record).await;
        self.state.extracted = Some(record);
        match analytics {
            Ok(analytics) => {
                self.state.analytics = Some(analytics);
                self.state.actions.succeed(ActionKind::Upload);
            }
            Err(e) => {
                error!("Analytics failed for {}: {:#}", file.name, e);
                self.state.actions.fail(ActionKind::Upload, EXTRACTION_FAILED);
            }
        }
    }

    async fn extract_record(&self, file: &UploadFile) -> Result<ResumeRecord> {
        let mut extracted = self.api.extract(file).await.context("extract")?;
        if extracted.needs_ocr {
            debug!("{} has no text layer, running OCR", file.name);
            extracted = self.api.ocr(file).await.context("ocr")?;
        }

        let text = extracted
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow!("no text extracted from {}", file.name))?;

        self.api.nlp_extract(&text).await.context("nlp")
    }

    async fn summarize(&self, record: &ResumeRecord) -> Result<AnalyticsResponse> {
        let payload = serde_json::to_value(record).context("encode record")?;
        self.api
            .analytics_summary(&[payload], false)
            .await
            .context("analytics")
    }

    /// All record values joined by spaces.
    pub fn resume_text(&self) -> String {
        self.state
            .extracted
            .as_ref()
            .map(ResumeRecord::flatten_text)
            .unwrap_or_default()
    }

    pub async fn run_match(&mut self) {
        let jd = self.state.job_description.trim().to_string();
        if self.state.extracted.is_none() || jd.is_empty() {
            self.state
                .actions
                .reject(ActionKind::Match, MISSING_INPUT_MESSAGE);
            return;
        }

        let resume_text = self.resume_text();
        self.state.actions.begin(ActionKind::Match);
        self.state.keyword_match = None;
        self.state.semantic_match = None;

        let keyword = match self.api.keyword_match(&resume_text, &jd).await {
            Ok(keyword) => keyword,
            Err(e) => {
                error!("Keyword match failed: {}", e);
                self.state.actions.fail(ActionKind::Match, MATCH_FAILED);
                return;
            }
        };

        info!("Keyword score {:.2}", keyword.overall_score);
        self.state.keyword_match = Some(keyword);

        match self.api.semantic_match(&resume_text, &jd).await {
            Ok(semantic) => {
                info!("Semantic score {:.2}", semantic.semantic_score);
                self.state.semantic_match = Some(semantic);
                self.state.actions.succeed(ActionKind::Match);
            }
            Err(e) => {
                error!("Semantic match failed: {}", e);
                self.state.actions.fail(ActionKind::Match, MATCH_FAILED);
            }
        }
    }

    pub async fn run_suggest(&mut self) {
        if self.state.extracted.is_none() {
            self.state
                .actions
                .reject(ActionKind::Suggest, "Please upload a resume first.");
            return;
        }

        let resume_text = self.resume_text();
        let jd = self.state.job_description.trim().to_string();
        self.state.actions.begin(ActionKind::Suggest);

        match self.api.suggest(&resume_text, &jd).await {
            Ok(suggestion) => {
                self.state.improved_resume = suggestion.improved_resume().map(str::to_string);
                self.state.suggestion = Some(suggestion);
                self.state.actions.succeed(ActionKind::Suggest);
            }
            Err(e) => {
                error!("Suggestion failed: {}", e);
                self.state.actions.fail(ActionKind::Suggest, SUGGEST_FAILED);
            }
        }
    }

    /// Save the extracted record as `resume.<ext>` under `dir`.
    pub async fn export(&mut self, format: ExportFormat, dir: &Path) -> Option<PathBuf> {
        let Some(record) = self.state.extracted.clone() else {
            self.state
                .actions
                .reject(ActionKind::Export, NO_EXPORT_DATA_MESSAGE);
            return None;
        };

        self.state.actions.begin(ActionKind::Export);
        match self.write_export(&record, format, dir).await {
            Ok(path) => {
                self.state.last_export = Some(path.clone());
                self.state.actions.succeed(ActionKind::Export);
                Some(path)
            }
            Err(e) => {
                error!("Export to {} failed: {:#}", format.extension(), e);
                self.state.actions.fail(ActionKind::Export, EXPORT_FAILED);
                None
            }
        }
    }

    async fn write_export(
        &self,
        record: &ResumeRecord,
        format: ExportFormat,
        dir: &Path,
    ) -> Result<PathBuf> {
        let bytes = match format.document() {
            Some(document) => {
                let request = ExportRequest::from(record);
                self.api.export_document(&request, document).await?
            }
            None if format == ExportFormat::Csv => export::to_csv(record)?.into_bytes(),
            None => export::to_json(record)?.into_bytes(),
        };

        FsOps::save_download(dir, &format.file_name(EXPORT_STEM), &bytes).await
    }
}
