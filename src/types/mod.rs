// src/types/mod.rs
//! Payloads exchanged with the analysis backend

pub mod analytics;
pub mod resume;
pub mod response;
pub mod saliency;

pub use analytics::{AnalyticsResponse, AnalyticsSummary, BulkParseResponse, BulkResult, Charts};
pub use resume::{ExportRequest, ResumeRecord};
pub use response::{
    AnalyzeResponse, ExtractResponse, KeywordMatch, MatchResponse, MatchResult, SemanticMatch,
    Suggestion,
};
pub use saliency::{AttentionZone, SaliencyResponse};
