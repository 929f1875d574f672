// src/lib.rs
//! Client for the ResumeSense resume analysis backend: resume upload,
//! extraction and match views, the attention heatmap, and bulk analytics.

pub mod cli;
pub mod controller;
pub mod core;
pub mod export;
pub mod heatmap;
pub mod types;
pub mod upload;
pub mod view;

pub use controller::{BulkPage, Mode, ResumePage, WorkbenchPage};
pub use core::{ApiClient, ApiError, ConfigManager, ResumeApi};
pub use heatmap::HeatmapViewer;
