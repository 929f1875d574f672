//! Rasterizes attention zones over the decoded page image.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use super::geometry::{
    glow_blur, hsl_to_rgb, zone_alpha, zone_hue, PixelRect, Size, CORNER_RADIUS,
    FILL_LIGHTNESS, STROKE_LIGHTNESS, STROKE_WIDTH,
};
use crate::types::AttentionZone;

/// Decode a base64 image payload. A `data:` URL prefix is tolerated.
/// Returns `None` on any decode failure or a zero-sized image.
pub fn decode_base_image(image_base64: &str) -> Option<RgbaImage> {
    let payload = match image_base64.split_once("base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => image_base64,
    };
    let payload = payload.trim();
    if payload.is_empty() {
        return None;
    }

    let bytes = match STANDARD.decode(payload) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Heatmap image is not valid base64: {}", e);
            return None;
        }
    };

    let decoded = match image::load_from_memory(&bytes) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            warn!("Heatmap image could not be decoded: {}", e);
            return None;
        }
    };

    if decoded.width() == 0 || decoded.height() == 0 {
        warn!("Heatmap image has zero dimensions");
        return None;
    }
    Some(decoded)
}

pub fn surface_size(image: &RgbaImage) -> Size {
    Size::new(image.width() as f64, image.height() as f64)
}

/// Draw the base image and then every zone in list order. Later zones are
/// blended over earlier ones.
pub fn paint(base: &RgbaImage, zones: &[AttentionZone]) -> RgbaImage {
    let mut surface = base.clone();
    let size = surface_size(&surface);

    for zone in zones {
        let rect = PixelRect::from_zone(zone, size);
        if !rect.is_drawable() {
            debug!("Skipping degenerate zone: {:?}", zone);
            continue;
        }
        paint_zone(&mut surface, &rect, zone.attention_level);
    }

    surface
}

fn paint_zone(surface: &mut RgbaImage, rect: &PixelRect, attention_level: f64) {
    let hue = zone_hue(attention_level);
    let fill_alpha = zone_alpha(attention_level);
    let blur = glow_blur(attention_level);
    let fill_rgb = hsl_to_rgb(hue, 1.0, FILL_LIGHTNESS);
    let stroke_rgb = hsl_to_rgb(hue, 1.0, STROKE_LIGHTNESS);

    let reach = blur + STROKE_WIDTH;
    let (width, height) = surface.dimensions();
    let x0 = clamp_index(rect.x - reach, width);
    let y0 = clamp_index(rect.y - reach, height);
    let x1 = clamp_index(rect.x + rect.width + reach + 1.0, width);
    let y1 = clamp_index(rect.y + rect.height + reach + 1.0, height);

    for py in y0..y1 {
        for px in x0..x1 {
            let d = rect.rounded_distance(px as f64 + 0.5, py as f64 + 0.5, CORNER_RADIUS);
            let pixel = surface.get_pixel_mut(px, py);

            // Glow fades out over `blur` pixels beyond the edge.
            if d > 0.0 && d < blur {
                let falloff = 1.0 - d / blur;
                blend(pixel, fill_rgb, fill_alpha * falloff * falloff);
            }

            let fill_coverage = (0.5 - d).clamp(0.0, 1.0);
            if fill_coverage > 0.0 {
                blend(pixel, fill_rgb, fill_alpha * fill_coverage);
            }

            let stroke_coverage = (STROKE_WIDTH / 2.0 + 0.5 - d.abs()).clamp(0.0, 1.0);
            if stroke_coverage > 0.0 {
                blend(pixel, stroke_rgb, stroke_coverage);
            }
        }
    }
}

fn clamp_index(v: f64, limit: u32) -> u32 {
    v.floor().clamp(0.0, limit as f64) as u32
}

/// Source-over blend of an RGB color at `alpha` onto `dst`.
fn blend(dst: &mut Rgba<u8>, rgb: [u8; 3], alpha: f64) {
    let a = alpha.clamp(0.0, 1.0);
    for (channel, src) in dst.0.iter_mut().take(3).zip(rgb) {
        let mixed = src as f64 * a + *channel as f64 * (1.0 - a);
        *channel = mixed.round().clamp(0.0, 255.0) as u8;
    }
    let dst_a = dst.0[3] as f64 / 255.0;
    dst.0[3] = ((a + dst_a * (1.0 - a)) * 255.0).round() as u8;
}
