// src/controller/resume_page.rs
//! Single-file page: analyze, match against a job description, or view the
//! attention heatmap.

use serde::Serialize;
use tracing::{error, info, warn};

use super::state::{ActionKind, ActionLog};
use super::MISSING_INPUT_MESSAGE;
use crate::core::ResumeApi;
use crate::heatmap::HeatmapViewer;
use crate::types::{MatchResult, ResumeRecord, SaliencyResponse};
use crate::upload::{AcceptPolicy, UploadControl, UploadEvent, UploadFile};

const MISSING_KEY_MARKER: &str = "GOOGLE_API_KEY";
pub const MISSING_KEY_MESSAGE: &str =
    "Please enter your Google API Key or set GOOGLE_API_KEY environment variable";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[default]
    Analyze,
    Match,
    Saliency,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResumePageState {
    pub mode: Mode,
    pub file_name: Option<String>,
    pub job_description: String,
    pub resume: Option<ResumeRecord>,
    pub match_result: Option<MatchResult>,
    pub saliency: Option<SaliencyResponse>,
    pub actions: ActionLog,
}

pub struct ResumePage<A: ResumeApi> {
    api: A,
    upload: UploadControl,
    file: Option<UploadFile>,
    api_key: String,
    default_api_key: Option<String>,
    heatmap: Option<HeatmapViewer>,
    state: ResumePageState,
}

impl<A: ResumeApi> ResumePage<A> {
    /// `default_api_key` is used for saliency when the user enters none.
    pub fn new(api: A, default_api_key: Option<String>) -> Self {
        Self {
            api,
            upload: UploadControl::new(AcceptPolicy::documents()),
            file: None,
            api_key: String::new(),
            default_api_key,
            heatmap: None,
            state: ResumePageState::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Saliency only takes PDFs; the other modes take any document.
    pub fn set_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
        let policy = match mode {
            Mode::Saliency => AcceptPolicy::pdf_only(),
            Mode::Analyze | Mode::Match => AcceptPolicy::documents(),
        };
        self.upload.set_policy(policy);
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.state.job_description = text.into();
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.api_key = key.into();
    }

    pub fn upload_control(&self) -> &UploadControl {
        &self.upload
    }

    /// Feed a drag/drop or picker event. Files outside the allow-list are
    /// ignored.
    pub async fn handle_upload(&mut self, event: UploadEvent) {
        if let Some(file) = self.upload.handle(event, |_| {}) {
            self.load_file(file).await;
        }
    }

    /// Pick a file as if from the file dialog.
    pub async fn select_file(&mut self, file: UploadFile) {
        self.handle_upload(UploadEvent::Pick(file)).await;
    }

    /// Store a new file and drop every previous result. Analyze and saliency
    /// modes fire their request right away.
    async fn load_file(&mut self, file: UploadFile) {
        info!("Selected {} ({} bytes)", file.name, file.bytes.len());

        self.state.file_name = Some(file.name.clone());
        self.state.resume = None;
        self.state.match_result = None;
        self.state.saliency = None;
        self.state.actions.reset();
        self.heatmap = None;
        self.file = Some(file);

        match self.state.mode {
            Mode::Analyze => self.run_analyze().await,
            Mode::Saliency => self.run_saliency().await,
            Mode::Match => {}
        }
    }

    async fn run_analyze(&mut self) {
        let Some(file) = self.file.as_ref() else {
            return;
        };

        self.state.actions.begin(ActionKind::Upload);
        match self.api.analyze(file).await {
            Ok(response) => {
                self.state.resume = Some(response.data);
                self.state.actions.succeed(ActionKind::Upload);
            }
            Err(e) => {
                error!("Analyze failed: {}", e);
                self.state.actions.fail(ActionKind::Upload, e.to_string());
            }
        }
    }

    pub async fn run_match(&mut self) {
        let jd = self.state.job_description.trim().to_string();
        let Some(file) = self.file.as_ref().filter(|_| !jd.is_empty()) else {
            self.state
                .actions
                .reject(ActionKind::Match, MISSING_INPUT_MESSAGE);
            return;
        };

        self.state.actions.begin(ActionKind::Match);
        match self.api.match_file(file, &jd).await {
            Ok(response) => {
                info!(
                    "Match score for {}: {:.1}",
                    file.name, response.match_result.overall_score
                );
                self.state.resume = Some(response.resume_data);
                self.state.match_result = Some(response.match_result);
                self.state.actions.succeed(ActionKind::Match);
            }
            Err(e) => {
                error!("Match failed: {}", e);
                self.state.actions.fail(ActionKind::Match, e.to_string());
            }
        }
    }

    pub async fn run_saliency(&mut self) {
        let Some(file) = self.file.as_ref() else {
            return;
        };

        let key = Some(self.api_key.trim())
            .filter(|k| !k.is_empty())
            .or(self.default_api_key.as_deref().filter(|k| !k.is_empty()));
        if key.is_none() {
            warn!("No API key configured, relying on the backend environment");
        }

        self.state.actions.begin(ActionKind::Saliency);
        match self.api.saliency(file, key).await {
            Ok(response) => {
                self.heatmap = Some(HeatmapViewer::from_response(&response));
                self.state.saliency = Some(response);
                self.state.actions.succeed(ActionKind::Saliency);
            }
            Err(e) => {
                error!("Saliency failed: {}", e);
                let message = e.to_string();
                let message = if message.contains(MISSING_KEY_MARKER) {
                    MISSING_KEY_MESSAGE.to_string()
                } else {
                    message
                };
                self.state.actions.fail(ActionKind::Saliency, message);
            }
        }
    }

    pub fn resume(&self) -> Option<&ResumeRecord> {
        self.state.resume.as_ref()
    }

    pub fn match_result(&self) -> Option<&MatchResult> {
        self.state.match_result.as_ref()
    }

    pub fn heatmap(&self) -> Option<&HeatmapViewer> {
        self.heatmap.as_ref()
    }

    pub fn heatmap_mut(&mut self) -> Option<&mut HeatmapViewer> {
        self.heatmap.as_mut()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.actions.error()
    }

    pub fn is_loading(&self) -> bool {
        self.state.actions.is_loading()
    }

    pub fn state(&self) -> &ResumePageState {
        &self.state
    }
}
