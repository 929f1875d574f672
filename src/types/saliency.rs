use serde::{Deserialize, Serialize};

/// A rectangle over the rendered resume page, in percent of the page size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttentionZone {
    pub x_percent: f64,
    pub y_percent: f64,
    pub width_percent: f64,
    pub height_percent: f64,
    /// Nominally 0-100. Out of range values are kept as received.
    pub attention_level: f64,
    pub reason: String,
}

impl AttentionZone {
    pub fn new(x: f64, y: f64, width: f64, height: f64, level: f64) -> Self {
        Self {
            x_percent: x,
            y_percent: y,
            width_percent: width,
            height_percent: height,
            attention_level: level,
            reason: String::new(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Inclusive containment in percent space.
    pub fn contains(&self, x_percent: f64, y_percent: f64) -> bool {
        x_percent >= self.x_percent
            && x_percent <= self.x_percent + self.width_percent
            && y_percent >= self.y_percent
            && y_percent <= self.y_percent + self.height_percent
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaliencyResponse {
    pub success: bool,
    pub filename: Option<String>,
    pub image_base64: String,
    pub attention_zones: Vec<AttentionZone>,
    pub overall_score: f64,
    pub summary: String,
}
