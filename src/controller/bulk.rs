// src/controller/bulk.rs
//! Bulk parsing of many resumes with aggregate analytics.

use anyhow::{bail, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::state::{ActionKind, ActionLog};
use super::NO_EXPORT_DATA_MESSAGE;
use crate::core::{FsOps, ResumeApi};
use crate::export::{self, ExportFormat};
use crate::types::{AnalyticsResponse, BulkParseResponse};
use crate::upload::{AcceptPolicy, UploadFile};

const PARSE_FAILED: &str = "Bulk parsing failed. Please try again.";
const NOTHING_PARSED: &str = "No resumes could be parsed. Please check your files.";
const UNSUPPORTED_EXPORT: &str = "Export type not supported in bulk.";
const EXPORT_FAILED: &str = "Export failed.";
const EXPORT_STEM: &str = "bulk_results";

#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkState {
    pub file_names: Vec<String>,
    pub anonymize: bool,
    pub parsed: Option<BulkParseResponse>,
    pub analytics: Option<AnalyticsResponse>,
    pub last_export: Option<PathBuf>,
    pub actions: ActionLog,
}

pub struct BulkPage<A: ResumeApi> {
    api: A,
    policy: AcceptPolicy,
    files: Vec<UploadFile>,
    state: BulkState,
}

impl<A: ResumeApi> BulkPage<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            policy: AcceptPolicy::documents_and_images(),
            files: Vec::new(),
            state: BulkState::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &BulkState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.state.actions.error()
    }

    pub fn is_loading(&self) -> bool {
        self.state.actions.is_loading()
    }

    /// Replace the selection. Files outside the allow-list are dropped.
    pub fn set_files(&mut self, files: Vec<UploadFile>) {
        let (accepted, rejected): (Vec<_>, Vec<_>) =
            files.into_iter().partition(|f| self.policy.accepts(f));
        for file in &rejected {
            debug!("Skipping unsupported file: {}", file.name);
        }

        self.state.file_names = accepted.iter().map(|f| f.name.clone()).collect();
        self.files = accepted;
    }

    pub fn set_anonymize(&mut self, anonymize: bool) {
        self.state.anonymize = anonymize;
    }

    pub async fn run(&mut self) {
        if self.files.is_empty() {
            return;
        }

        self.state.parsed = None;
        self.state.analytics = None;
        self.state.actions.begin(ActionKind::Upload);

        info!(
            "Bulk parsing {} files (anonymize: {})",
            self.files.len(),
            self.state.anonymize
        );
        let parsed = match self.api.bulk_parse(&self.files, self.state.anonymize).await {
            Ok(parsed) => parsed,
            Err(e) => {
                error!("Bulk parse failed: {}", e);
                self.state.actions.fail(ActionKind::Upload, PARSE_FAILED);
                return;
            }
        };

        if parsed.results.is_empty() {
            warn!("Backend returned no parsed resumes");
            self.state.actions.fail(ActionKind::Upload, NOTHING_PARSED);
            return;
        }

        let payload = match parsed
            .results
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(payload) => payload,
            Err(e) => {
                self.state.parsed = Some(parsed);
                self.state
                    .actions
                    .fail(ActionKind::Upload, format!("Analytics failed: {}", e));
                return;
            }
        };

        let analytics = self.api.analytics_summary(&payload, true).await;
        self.state.parsed = Some(parsed);
        match analytics {
            Ok(analytics) => {
                self.state.analytics = Some(analytics);
                self.state.actions.succeed(ActionKind::Upload);
            }
            Err(e) => {
                error!("Bulk analytics failed: {}", e);
                self.state
                    .actions
                    .fail(ActionKind::Upload, format!("Analytics failed: {}", e));
            }
        }
    }

    /// Save the parse results as `bulk_results.<ext>` under `dir`.
    pub async fn export(&mut self, format: ExportFormat, dir: &Path) -> Option<PathBuf> {
        let Some(parsed) = self.state.parsed.as_ref() else {
            self.state
                .actions
                .reject(ActionKind::Export, NO_EXPORT_DATA_MESSAGE);
            return None;
        };

        if !format.is_local() {
            self.state
                .actions
                .reject(ActionKind::Export, UNSUPPORTED_EXPORT);
            return None;
        }

        self.state.actions.begin(ActionKind::Export);
        let bytes = match Self::export_bytes(parsed, format) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Bulk export failed: {:#}", e);
                self.state.actions.fail(ActionKind::Export, EXPORT_FAILED);
                return None;
            }
        };

        match FsOps::save_download(dir, &format.file_name(EXPORT_STEM), &bytes).await {
            Ok(path) => {
                self.state.last_export = Some(path.clone());
                self.state.actions.succeed(ActionKind::Export);
                Some(path)
            }
            Err(e) => {
                error!("Bulk export failed: {:#}", e);
                self.state.actions.fail(ActionKind::Export, EXPORT_FAILED);
                None
            }
        }
    }

    fn export_bytes(parsed: &BulkParseResponse, format: ExportFormat) -> Result<Vec<u8>> {
        match format {
            ExportFormat::Csv if parsed.csv.trim().is_empty() => {
                bail!("backend returned no CSV")
            }
            ExportFormat::Csv => Ok(parsed.csv.clone().into_bytes()),
            _ => Ok(export::to_json(&parsed.results)?.into_bytes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fake::FakeApi;
    use crate::types::{AnalyticsSummary, BulkResult};

    fn files() -> Vec<UploadFile> {
        vec![
            UploadFile::new("a.pdf", "application/pdf", b"%PDF".to_vec()),
            UploadFile::new("b.docx", "", b"PK".to_vec()),
            UploadFile::new("notes.exe", "", b"MZ".to_vec()),
        ]
    }

    fn parsed() -> BulkParseResponse {
        BulkParseResponse {
            results: vec![
                BulkResult {
                    filename: "a.pdf".into(),
                    skills: vec!["Rust".into()],
                    ..Default::default()
                },
                BulkResult {
                    filename: "b.docx".into(),
                    skills: vec!["Go".into()],
                    ..Default::default()
                },
            ],
            csv: "filename,skills\na.pdf,Rust\nb.docx,Go\n".into(),
            analytics: serde_json::Value::Null,
        }
    }

    fn analytics() -> AnalyticsResponse {
        AnalyticsResponse {
            summary: AnalyticsSummary {
                total_resumes: 2,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn ready(api: FakeApi) -> BulkPage<FakeApi> {
        let mut page = BulkPage::new(api);
        page.set_files(files());
        page
    }

    #[test]
    fn test_set_files_filters_unsupported() {
        let page = ready(FakeApi::default());
        assert_eq!(page.state().file_names, vec!["a.pdf", "b.docx"]);
    }

    #[tokio::test]
    async fn test_no_files_does_nothing() {
        let mut page = BulkPage::new(FakeApi::default());
        page.run().await;
        assert!(page.api().calls().is_empty());
        assert_eq!(page.error(), None);
    }

    #[tokio::test]
    async fn test_parse_then_analytics_with_charts() {
        let api = FakeApi {
            bulk: Some(Ok(parsed())),
            analytics: Some(Ok(analytics())),
            ..Default::default()
        };
        let mut page = ready(api);
        page.set_anonymize(true);
        page.run().await;

        assert_eq!(page.api().calls(), vec!["bulk_parse", "analytics_summary"]);
        assert_eq!(
            page.api().analytics_requests.lock().expect("lock").clone(),
            vec![(2, true)]
        );
        assert_eq!(
            page.state().analytics.as_ref().map(|a| a.summary.total_resumes),
            Some(2)
        );
        assert_eq!(page.error(), None);
    }

    #[tokio::test]
    async fn test_empty_results_message() {
        let api = FakeApi {
            bulk: Some(Ok(BulkParseResponse::default())),
            ..Default::default()
        };
        let mut page = ready(api);
        page.run().await;

        assert_eq!(page.error(), Some(NOTHING_PARSED));
        assert_eq!(page.api().calls(), vec!["bulk_parse"]);
    }

    #[tokio::test]
    async fn test_parse_failure_message() {
        let api = FakeApi {
            bulk: Some(Err("502".into())),
            ..Default::default()
        };
        let mut page = ready(api);
        page.run().await;
        assert_eq!(page.error(), Some(PARSE_FAILED));
    }

    #[tokio::test]
    async fn test_analytics_failure_keeps_results() {
        let api = FakeApi {
            bulk: Some(Ok(parsed())),
            analytics: Some(Err("matplotlib missing".into())),
            ..Default::default()
        };
        let mut page = ready(api);
        page.run().await;

        assert_eq!(page.error(), Some("Analytics failed: matplotlib missing"));
        assert_eq!(page.state().parsed.as_ref().map(|p| p.results.len()), Some(2));
        assert!(page.state().analytics.is_none());
    }

    #[tokio::test]
    async fn test_exports() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let api = FakeApi {
            bulk: Some(Ok(parsed())),
            analytics: Some(Ok(analytics())),
            ..Default::default()
        };
        let mut page = ready(api);

        assert!(page.export(ExportFormat::Csv, tmp.path()).await.is_none());
        assert_eq!(page.error(), Some(NO_EXPORT_DATA_MESSAGE));

        page.run().await;

        let csv = page
            .export(ExportFormat::Csv, tmp.path())
            .await
            .expect("csv");
        assert_eq!(csv, tmp.path().join("bulk_results.csv"));
        assert!(std::fs::read_to_string(&csv)
            .expect("read")
            .contains("a.pdf,Rust"));

        let json = page
            .export(ExportFormat::Json, tmp.path())
            .await
            .expect("json");
        let saved: Vec<BulkResult> =
            serde_json::from_str(&std::fs::read_to_string(json).expect("read")).expect("parse");
        assert_eq!(saved.len(), 2);

        assert!(page.export(ExportFormat::Pdf, tmp.path()).await.is_none());
        assert_eq!(page.error(), Some(UNSUPPORTED_EXPORT));
    }

    #[tokio::test]
    async fn test_empty_csv_export_fails() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let api = FakeApi {
            bulk: Some(Ok(BulkParseResponse {
                csv: String::new(),
                ..parsed()
            })),
            analytics: Some(Ok(analytics())),
            ..Default::default()
        };
        let mut page = ready(api);
        page.run().await;

        assert!(page.export(ExportFormat::Csv, tmp.path()).await.is_none());
        assert_eq!(page.error(), Some(EXPORT_FAILED));
    }
}
