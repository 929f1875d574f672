// src/controller/mod.rs
//! Page controllers. Each owns its view state and changes it only through
//! named actions; every action awaits its backend calls in sequence.

pub mod bulk;
pub mod resume_page;
pub mod state;
pub mod workbench;

#[cfg(test)]
pub(crate) mod fake;

pub use bulk::BulkPage;
pub use resume_page::{Mode, ResumePage};
pub use state::{ActionKind, ActionLog, Phase};
pub use workbench::WorkbenchPage;

pub const MISSING_INPUT_MESSAGE: &str = "Please upload a resume and enter a job description.";
pub const NO_EXPORT_DATA_MESSAGE: &str = "No data to export.";
