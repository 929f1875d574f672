//! Recording stand-in for the backend used by controller tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::core::{ApiError, ResumeApi};
use crate::export::DocumentFormat;
use crate::types::{
    AnalyticsResponse, AnalyzeResponse, BulkParseResponse, ExportRequest, ExtractResponse,
    KeywordMatch, MatchResponse, ResumeRecord, SaliencyResponse, SemanticMatch, Suggestion,
};
use crate::upload::UploadFile;

type Canned<T> = Option<Result<T, String>>;

#[derive(Default)]
pub struct FakeApi {
    pub calls: Mutex<Vec<&'static str>>,
    pub saliency_keys: Mutex<Vec<Option<String>>>,
    pub analytics_requests: Mutex<Vec<(usize, bool)>>,
    pub analyze: Canned<AnalyzeResponse>,
    pub match_file: Canned<MatchResponse>,
    pub extract: Canned<ExtractResponse>,
    pub ocr: Canned<ExtractResponse>,
    pub nlp: Canned<ResumeRecord>,
    pub keyword: Canned<KeywordMatch>,
    pub semantic: Canned<SemanticMatch>,
    pub suggest: Canned<Suggestion>,
    pub saliency: Canned<SaliencyResponse>,
    pub analytics: Canned<AnalyticsResponse>,
    pub bulk: Canned<BulkParseResponse>,
    pub export: Canned<Vec<u8>>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn reply<T: Clone>(&self, name: &'static str, slot: &Canned<T>) -> Result<T, ApiError> {
        self.calls.lock().expect("calls lock").push(name);
        match slot {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(ApiError::api(500, message.clone())),
            None => Err(ApiError::api(500, format!("no canned response for {name}"))),
        }
    }
}

#[async_trait]
impl ResumeApi for FakeApi {
    async fn analyze(&self, _file: &UploadFile) -> Result<AnalyzeResponse, ApiError> {
        self.reply("analyze", &self.analyze)
    }

    async fn match_file(&self, _file: &UploadFile, _jd: &str) -> Result<MatchResponse, ApiError> {
        self.reply("match_file", &self.match_file)
    }

    async fn extract(&self, _file: &UploadFile) -> Result<ExtractResponse, ApiError> {
        self.reply("extract", &self.extract)
    }

    async fn ocr(&self, _file: &UploadFile) -> Result<ExtractResponse, ApiError> {
        self.reply("ocr", &self.ocr)
    }

    async fn nlp_extract(&self, _text: &str) -> Result<ResumeRecord, ApiError> {
        self.reply("nlp_extract", &self.nlp)
    }

    async fn keyword_match(&self, _resume: &str, _jd: &str) -> Result<KeywordMatch, ApiError> {
        self.reply("keyword_match", &self.keyword)
    }

    async fn semantic_match(&self, _resume: &str, _jd: &str) -> Result<SemanticMatch, ApiError> {
        self.reply("semantic_match", &self.semantic)
    }

    async fn suggest(&self, _resume: &str, _jd: &str) -> Result<Suggestion, ApiError> {
        self.reply("suggest", &self.suggest)
    }

    async fn saliency(
        &self,
        _file: &UploadFile,
        api_key: Option<&str>,
    ) -> Result<SaliencyResponse, ApiError> {
        self.saliency_keys
            .lock()
            .expect("keys lock")
            .push(api_key.map(str::to_string));
        self.reply("saliency", &self.saliency)
    }

    async fn analytics_summary(
        &self,
        resumes: &[serde_json::Value],
        charts: bool,
    ) -> Result<AnalyticsResponse, ApiError> {
        self.analytics_requests
            .lock()
            .expect("analytics lock")
            .push((resumes.len(), charts));
        self.reply("analytics_summary", &self.analytics)
    }

    async fn bulk_parse(
        &self,
        _files: &[UploadFile],
        _anonymize: bool,
    ) -> Result<BulkParseResponse, ApiError> {
        self.reply("bulk_parse", &self.bulk)
    }

    async fn export_document(
        &self,
        _request: &ExportRequest,
        _format: DocumentFormat,
    ) -> Result<Vec<u8>, ApiError> {
        self.reply("export_document", &self.export)
    }
}
