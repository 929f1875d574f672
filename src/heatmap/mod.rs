// src/heatmap/mod.rs
//! Recruiter attention heatmap: attention zones drawn over the rendered page,
//! with hover lookup of the zone under the pointer.

pub mod geometry;
pub mod render;

use anyhow::{Context, Result};
use image::RgbaImage;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

pub use geometry::{Point, ScoreTier, Size};

use crate::types::{AttentionZone, SaliencyResponse};

pub const LEGEND: [(&str, &str); 3] = [
    ("High Attention", "red to orange"),
    ("Medium", "yellow to green"),
    ("Low Attention", "green to cyan"),
];

/// Details shown for the hovered zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub attention_level: f64,
    pub reason: String,
    pub hue: f64,
}

impl Tooltip {
    pub fn color(&self) -> String {
        format!("hsl({}, 100%, 50%)", self.hue)
    }
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Attention Level: {}%", self.attention_level)?;
        if !self.reason.is_empty() {
            write!(f, "\n{}", self.reason)?;
        }
        Ok(())
    }
}

pub struct HeatmapViewer {
    zones: Vec<AttentionZone>,
    overall_score: f64,
    summary: String,
    /// Decoded page at native resolution; `None` until a valid image arrives.
    base: Option<RgbaImage>,
    surface: Option<RgbaImage>,
    hovered: Option<usize>,
}

impl HeatmapViewer {
    pub fn new(
        image_base64: &str,
        zones: Vec<AttentionZone>,
        overall_score: f64,
        summary: impl Into<String>,
    ) -> Self {
        let mut viewer = Self {
            zones: Vec::new(),
            overall_score,
            summary: summary.into(),
            base: None,
            surface: None,
            hovered: None,
        };
        viewer.set_inputs(image_base64, zones);
        viewer
    }

    pub fn from_response(response: &SaliencyResponse) -> Self {
        Self::new(
            &response.image_base64,
            response.attention_zones.clone(),
            response.overall_score,
            response.summary.clone(),
        )
    }

    /// Replace image and zones, redrawing from scratch.
    pub fn set_inputs(&mut self, image_base64: &str, zones: Vec<AttentionZone>) {
        self.zones = zones;
        self.hovered = None;
        self.base = render::decode_base_image(image_base64);
        self.redraw();
    }

    pub fn set_zones(&mut self, zones: Vec<AttentionZone>) {
        self.zones = zones;
        self.hovered = None;
        self.redraw();
    }

    fn redraw(&mut self) {
        self.surface = self
            .base
            .as_ref()
            .map(|base| render::paint(base, &self.zones));

        match &self.surface {
            Some(surface) => info!(
                "Drew {} attention zones on {}x{} surface",
                self.zones.len(),
                surface.width(),
                surface.height()
            ),
            None => debug!("No valid heatmap image, nothing drawn"),
        }
    }

    /// The painted surface, or `None` when no valid image is loaded.
    pub fn render(&self) -> Option<&RgbaImage> {
        self.surface.as_ref()
    }

    pub fn surface_size(&self) -> Option<Size> {
        self.surface.as_ref().map(render::surface_size)
    }

    pub fn zones(&self) -> &[AttentionZone] {
        &self.zones
    }

    pub fn overall_score(&self) -> f64 {
        self.overall_score
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn score_tier(&self) -> ScoreTier {
        ScoreTier::classify(self.overall_score)
    }

    /// Tooltips are off when there is nothing to hover.
    pub fn tooltip_enabled(&self) -> bool {
        !self.zones.is_empty() && self.surface.is_some()
    }

    /// Resolve the pointer, given in pixels of the displayed surface of
    /// size `display`, to the zone under it.
    pub fn pointer_move(&mut self, pointer: Point, display: Size) -> Option<&AttentionZone> {
        self.hovered = None;
        if !self.tooltip_enabled() {
            return None;
        }

        let surface = self.surface_size()?;
        let point = geometry::pointer_to_percent(pointer, display, surface)?;
        self.hovered = geometry::hit_test(&self.zones, point);
        self.hovered_zone()
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = None;
    }

    pub fn hovered_zone(&self) -> Option<&AttentionZone> {
        self.hovered.and_then(|i| self.zones.get(i))
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        self.hovered_zone().map(|zone| Tooltip {
            attention_level: zone.attention_level,
            reason: zone.reason.clone(),
            hue: geometry::zone_hue(zone.attention_level),
        })
    }

    /// Write the painted surface as PNG.
    pub fn write_png(&self, path: &Path) -> Result<()> {
        let surface = self
            .surface
            .as_ref()
            .context("No heatmap surface to save: the image could not be decoded")?;
        surface
            .save(path)
            .with_context(|| format!("Failed to write heatmap: {}", path.display()))?;
        info!("Heatmap written to {}", path.display());
        Ok(())
    }
}

impl fmt::Display for HeatmapViewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tier = self.score_tier();
        writeln!(f, "Recruiter's 6-Second View")?;
        writeln!(
            f,
            "Scanability Score: {}% ({})",
            self.overall_score,
            tier.label()
        )?;
        if !self.summary.is_empty() {
            writeln!(f, "{}", self.summary)?;
        }
        match self.surface_size() {
            Some(size) => writeln!(f, "Page: {}x{} px", size.width, size.height)?,
            None => writeln!(f, "Page: (no image)")?,
        }
        for (i, zone) in self.zones.iter().enumerate() {
            writeln!(
                f,
                "  #{} [{:.0}%,{:.0}% {:.0}x{:.0}] attention {}% - {}",
                i + 1,
                zone.x_percent,
                zone.y_percent,
                zone.width_percent,
                zone.height_percent,
                zone.attention_level,
                zone.reason
            )?;
        }
        if let Some(tooltip) = self.tooltip() {
            writeln!(f, "Hovered: {}", tooltip)?;
        }
        Ok(())
    }
}
