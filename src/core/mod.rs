// src/core/mod.rs
//! Configuration, HTTP access to the analysis backend, and file helpers

pub mod config_manager;
pub mod fs_ops;
pub mod service_client;

pub use config_manager::{ConfigManager, ServiceConfig};
pub use fs_ops::FsOps;
pub use service_client::{ApiClient, ApiError, ResumeApi};
