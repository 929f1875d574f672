// src/core/service_client.rs
//! HTTP client for the resume analysis backend. One function per endpoint.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::core::ServiceConfig;
use crate::export::DocumentFormat;
use crate::types::{
    AnalyticsResponse, AnalyzeResponse, BulkParseResponse, ExportRequest, ExtractResponse,
    KeywordMatch, MatchResponse, ResumeRecord, SaliencyResponse, SemanticMatch, Suggestion,
};
use crate::upload::UploadFile;

const ANALYZE_ENDPOINT: &str = "/api/analyze";
const MATCH_FILE_ENDPOINT: &str = "/api/match/file";
const SALIENCY_ENDPOINT: &str = "/api/saliency";
const EXTRACT_ENDPOINT: &str = "/extractor/extract";
const OCR_ENDPOINT: &str = "/ocr/ocr";
const NLP_ENDPOINT: &str = "/nlp/extract";
const MATCH_ENDPOINT: &str = "/match/match";
const SEMANTIC_MATCH_ENDPOINT: &str = "/semantic-match/semantic-match";
const SUGGEST_ENDPOINT: &str = "/suggest/suggest";
const ANALYTICS_ENDPOINT: &str = "/analytics/summary";
const BULK_ENDPOINT: &str = "/bulk/bulk";
const EXPORT_PDF_ENDPOINT: &str = "/export/pdf";
const EXPORT_DOCX_ENDPOINT: &str = "/export/docx";

/// Keys checked, in order, for a human readable message in an error body.
const ERROR_MESSAGE_KEYS: [&str; 3] = ["detail", "message", "error"];

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status. Displays as the backend's message alone.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

/// Backend operations the page controllers depend on.
#[async_trait]
pub trait ResumeApi: Send + Sync {
    async fn analyze(&self, file: &UploadFile) -> Result<AnalyzeResponse, ApiError>;

    async fn match_file(&self, file: &UploadFile, jd_text: &str)
        -> Result<MatchResponse, ApiError>;

    async fn extract(&self, file: &UploadFile) -> Result<ExtractResponse, ApiError>;

    async fn ocr(&self, file: &UploadFile) -> Result<ExtractResponse, ApiError>;

    async fn nlp_extract(&self, text: &str) -> Result<ResumeRecord, ApiError>;

    async fn keyword_match(&self, resume_text: &str, jd_text: &str)
        -> Result<KeywordMatch, ApiError>;

    async fn semantic_match(
        &self,
        resume_text: &str,
        jd_text: &str,
    ) -> Result<SemanticMatch, ApiError>;

    async fn suggest(&self, resume_text: &str, jd_text: &str) -> Result<Suggestion, ApiError>;

    async fn saliency(
        &self,
        file: &UploadFile,
        api_key: Option<&str>,
    ) -> Result<SaliencyResponse, ApiError>;

    async fn analytics_summary(
        &self,
        resumes: &[serde_json::Value],
        charts: bool,
    ) -> Result<AnalyticsResponse, ApiError>;

    async fn bulk_parse(
        &self,
        files: &[UploadFile],
        anonymize: bool,
    ) -> Result<BulkParseResponse, ApiError>;

    async fn export_document(
        &self,
        request: &ExportRequest,
        format: DocumentFormat,
    ) -> Result<Vec<u8>, ApiError>;
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn file_part(file: &UploadFile) -> Result<Part, ApiError> {
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        if file.mime.is_empty() {
            Ok(part)
        } else {
            Ok(part.mime_str(&file.mime)?)
        }
    }

    fn single_file_form(file: &UploadFile) -> Result<Form, ApiError> {
        Ok(Form::new().part("file", Self::file_part(file)?))
    }

    /// Send and decode a JSON response, mapping failures to one message.
    async fn send_json<R>(&self, request: RequestBuilder, fallback: &str) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let response = request.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            let message = error_message(&body, fallback);
            error!("Backend error {}: {}", status, message);
            return Err(ApiError::api(status.as_u16(), message));
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn send_bytes(&self, request: RequestBuilder, fallback: &str) -> Result<Vec<u8>, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body, fallback);
            error!("Backend error {}: {}", status, message);
            return Err(ApiError::api(status.as_u16(), message));
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn post_text_pair<R>(
        &self,
        endpoint: &str,
        resume_text: &str,
        jd_text: &str,
        fallback: &str,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        info!("Calling {}", url);

        let payload = json!({
            "resume_text": resume_text,
            "jd_text": jd_text,
        });
        self.send_json(self.client.post(&url).json(&payload), fallback)
            .await
    }
}

#[async_trait]
impl ResumeApi for ApiClient {
    async fn analyze(&self, file: &UploadFile) -> Result<AnalyzeResponse, ApiError> {
        let url = self.url(ANALYZE_ENDPOINT);
        info!("Calling analyze service: {} ({})", url, file.name);

        let form = Self::single_file_form(file)?;
        self.send_json(self.client.post(&url).multipart(form), "Failed to analyze resume")
            .await
    }

    async fn match_file(
        &self,
        file: &UploadFile,
        jd_text: &str,
    ) -> Result<MatchResponse, ApiError> {
        let url = self.url(MATCH_FILE_ENDPOINT);
        info!("Calling match service: {} ({})", url, file.name);

        let form = Self::single_file_form(file)?.text("jd_text", jd_text.to_string());
        self.send_json(self.client.post(&url).multipart(form), "Failed to match resume")
            .await
    }

    async fn extract(&self, file: &UploadFile) -> Result<ExtractResponse, ApiError> {
        let url = self.url(EXTRACT_ENDPOINT);
        info!("Calling text extraction: {} ({})", url, file.name);

        let form = Self::single_file_form(file)?;
        self.send_json(self.client.post(&url).multipart(form), "Failed to extract text")
            .await
    }

    async fn ocr(&self, file: &UploadFile) -> Result<ExtractResponse, ApiError> {
        let url = self.url(OCR_ENDPOINT);
        info!("Calling OCR: {} ({})", url, file.name);

        let form = Self::single_file_form(file)?;
        self.send_json(self.client.post(&url).multipart(form), "OCR failed")
            .await
    }

    async fn nlp_extract(&self, text: &str) -> Result<ResumeRecord, ApiError> {
        let url = self.url(NLP_ENDPOINT);
        info!("Calling NLP extraction: {} ({} chars)", url, text.len());

        self.send_json(
            self.client.post(&url).json(&json!({ "text": text })),
            "Failed to extract resume fields",
        )
        .await
    }

    async fn keyword_match(
        &self,
        resume_text: &str,
        jd_text: &str,
    ) -> Result<KeywordMatch, ApiError> {
        self.post_text_pair(MATCH_ENDPOINT, resume_text, jd_text, "Failed to match resume")
            .await
    }

    async fn semantic_match(
        &self,
        resume_text: &str,
        jd_text: &str,
    ) -> Result<SemanticMatch, ApiError> {
        self.post_text_pair(
            SEMANTIC_MATCH_ENDPOINT,
            resume_text,
            jd_text,
            "Failed to compute semantic match",
        )
        .await
    }

    async fn suggest(&self, resume_text: &str, jd_text: &str) -> Result<Suggestion, ApiError> {
        self.post_text_pair(
            SUGGEST_ENDPOINT,
            resume_text,
            jd_text,
            "Failed to get AI suggestion",
        )
        .await
    }

    async fn saliency(
        &self,
        file: &UploadFile,
        api_key: Option<&str>,
    ) -> Result<SaliencyResponse, ApiError> {
        let url = self.url(SALIENCY_ENDPOINT);
        info!("Calling saliency analysis: {} ({})", url, file.name);

        let mut form = Self::single_file_form(file)?;
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            form = form.text("api_key", key.to_string());
        }
        self.send_json(
            self.client.post(&url).multipart(form),
            "Failed to analyze saliency",
        )
        .await
    }

    async fn analytics_summary(
        &self,
        resumes: &[serde_json::Value],
        charts: bool,
    ) -> Result<AnalyticsResponse, ApiError> {
        let url = self.url(ANALYTICS_ENDPOINT);
        info!("Calling analytics: {} ({} resumes)", url, resumes.len());

        let payload = json!({ "resumes": resumes, "charts": charts });
        self.send_json(
            self.client.post(&url).json(&payload),
            "Failed to compute analytics",
        )
        .await
    }

    async fn bulk_parse(
        &self,
        files: &[UploadFile],
        anonymize: bool,
    ) -> Result<BulkParseResponse, ApiError> {
        let url = self.url(BULK_ENDPOINT);
        info!("Calling bulk parse: {} ({} files)", url, files.len());

        let mut form = Form::new();
        for file in files {
            form = form.part("files", Self::file_part(file)?);
        }
        form = form.text("anonymize", anonymize.to_string());

        self.send_json(self.client.post(&url).multipart(form), "Bulk parsing failed")
            .await
    }

    async fn export_document(
        &self,
        request: &ExportRequest,
        format: DocumentFormat,
    ) -> Result<Vec<u8>, ApiError> {
        let endpoint = match format {
            DocumentFormat::Pdf => EXPORT_PDF_ENDPOINT,
            DocumentFormat::Docx => EXPORT_DOCX_ENDPOINT,
        };
        let url = self.url(endpoint);
        info!("Calling export: {}", url);

        self.send_bytes(self.client.post(&url).json(request), "Export failed")
            .await
    }
}

/// Pull a message out of an error body, or fall back to `fallback`.
pub fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ERROR_MESSAGE_KEYS
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
