//! Coordinate model for attention zones.
//!
//! Zones arrive in percent of the page. The drawing surface is sized to the
//! decoded image's native pixels, and pointer positions arrive in on-screen
//! pixels of a possibly CSS-scaled display. Everything here converts
//! between those three spaces.

use serde::Serialize;

use crate::types::AttentionZone;

pub const CORNER_RADIUS: f64 = 8.0;
pub const STROKE_WIDTH: f64 = 2.0;
pub const FILL_LIGHTNESS: f64 = 0.5;
pub const STROKE_LIGHTNESS: f64 = 0.6;

/// 120 (green) at level 0 down to 0 (red) at level 100. Not clamped.
pub fn zone_hue(attention_level: f64) -> f64 {
    120.0 - attention_level * 1.2
}

/// Fill opacity, 0.3 at level 0 up to 0.6 at level 100.
pub fn zone_alpha(attention_level: f64) -> f64 {
    0.3 + (attention_level / 100.0) * 0.3
}

/// Outer glow radius in surface pixels.
pub fn glow_blur(attention_level: f64) -> f64 {
    20.0 + attention_level / 5.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn scaled(&self, k: f64) -> Self {
        Self::new(self.width * k, self.height * k)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A zone converted to surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn from_zone(zone: &AttentionZone, surface: Size) -> Self {
        Self {
            x: zone.x_percent / 100.0 * surface.width,
            y: zone.y_percent / 100.0 * surface.height,
            width: zone.width_percent / 100.0 * surface.width,
            height: zone.height_percent / 100.0 * surface.height,
        }
    }

    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Signed distance from `(px, py)` to the edge of this rectangle with
    /// rounded corners. Negative inside.
    pub fn rounded_distance(&self, px: f64, py: f64, radius: f64) -> f64 {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let r = radius.min(half_w).min(half_h).max(0.0);

        let qx = (px - (self.x + half_w)).abs() - (half_w - r);
        let qy = (py - (self.y + half_h)).abs() - (half_h - r);

        let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
        outside + qx.max(qy).min(0.0) - r
    }
}

/// Map an on-screen pointer to percent of the native surface. The display
/// may be scaled relative to the surface; the result does not depend on
/// that scale. `None` when either size is empty.
pub fn pointer_to_percent(pointer: Point, display: Size, surface: Size) -> Option<Point> {
    if display.is_empty() || surface.is_empty() {
        return None;
    }

    let scale_x = surface.width / display.width;
    let scale_y = surface.height / display.height;
    let x = pointer.x * scale_x;
    let y = pointer.y * scale_y;

    Some(Point::new(
        x / surface.width * 100.0,
        y / surface.height * 100.0,
    ))
}

/// First zone in list order that contains the point (percent space,
/// inclusive edges).
///
/// Zones are painted in list order, so where two overlap the later one is
/// on top visually, yet this returns the earlier one. Kept deliberately.
pub fn hit_test(zones: &[AttentionZone], point: Point) -> Option<usize> {
    zones.iter().position(|zone| zone.contains(point.x, point.y))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn classify(score: f64) -> Self {
        if score >= 70.0 {
            Self::High
        } else if score >= 40.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::High => "#22c55e",
            Self::Medium => "#eab308",
            Self::Low => "#ef4444",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "Excellent Match",
            Self::Medium => "Good Potential",
            Self::Low => "Needs Improvement",
        }
    }
}

/// HSL to 8-bit RGB. Hue in degrees (wrapped), saturation and lightness in 0-1.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [u8; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(x: f64, y: f64, w: f64, h: f64, level: f64) -> AttentionZone {
        AttentionZone::new(x, y, w, h, level)
    }

    #[test]
    fn test_hue_decreases_with_attention() {
        assert_eq!(zone_hue(0.0), 120.0);
        assert_eq!(zone_hue(100.0), 0.0);
        let mut previous = f64::INFINITY;
        for level in 0..=100 {
            let hue = zone_hue(level as f64);
            assert!(hue < previous);
            previous = hue;
        }
        // Out of range is passed through, not rejected.
        assert!(zone_hue(150.0) < 0.0);
    }

    #[test]
    fn test_alpha_increases_within_bounds() {
        let mut previous = f64::NEG_INFINITY;
        for level in 0..=100 {
            let alpha = zone_alpha(level as f64);
            assert!(alpha > previous);
            assert!((0.3..=0.6 + 1e-12).contains(&alpha));
            previous = alpha;
        }
        assert!((zone_alpha(100.0) - 0.6).abs() < 1e-12);
        assert_eq!(glow_blur(50.0), 30.0);
    }

    #[test]
    fn test_pixel_rect_from_percent() {
        let rect = PixelRect::from_zone(&zone(10.0, 20.0, 50.0, 25.0, 0.0), Size::new(800.0, 1000.0));
        assert_eq!(
            rect,
            PixelRect {
                x: 80.0,
                y: 200.0,
                width: 400.0,
                height: 250.0
            }
        );
    }

    #[test]
    fn test_rounded_distance_sign() {
        let rect = PixelRect {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 50.0,
        };
        assert!(rect.rounded_distance(50.0, 25.0, CORNER_RADIUS) < 0.0);
        assert!(rect.rounded_distance(120.0, 25.0, CORNER_RADIUS) > 0.0);
        // The exact corner lies outside once rounded.
        assert!(rect.rounded_distance(0.5, 0.5, CORNER_RADIUS) > 0.0);
        assert!((rect.rounded_distance(110.0, 25.0, CORNER_RADIUS) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_inside_outside_and_overlap() {
        let zones = vec![
            zone(0.0, 0.0, 50.0, 50.0, 80.0),
            zone(40.0, 40.0, 50.0, 50.0, 20.0),
        ];
        assert_eq!(hit_test(&zones, Point::new(10.0, 10.0)), Some(0));
        assert_eq!(hit_test(&zones, Point::new(80.0, 80.0)), Some(1));
        assert_eq!(hit_test(&zones, Point::new(95.0, 5.0)), None);
        assert_eq!(hit_test(&zones, Point::new(45.0, 45.0)), Some(0));
        assert_eq!(hit_test(&[], Point::new(45.0, 45.0)), None);
    }

    #[test]
    fn test_pointer_scaling_invariant_under_uniform_scale() {
        let surface = Size::new(1240.0, 1754.0);
        let zones = vec![
            zone(10.0, 5.0, 80.0, 8.0, 95.0),
            zone(5.0, 30.0, 40.0, 20.0, 60.0),
            zone(50.0, 60.0, 45.0, 30.0, 30.0),
        ];
        let display = Size::new(620.0, 877.0);
        let pointers = [
            Point::new(300.0, 60.0),
            Point::new(100.0, 300.0),
            Point::new(500.0, 700.0),
            Point::new(610.0, 10.0),
        ];

        for pointer in pointers {
            let base = pointer_to_percent(pointer, display, surface).expect("percent");
            let expected = hit_test(&zones, base);
            for k in [0.25, 0.5, 1.5, 2.0, 3.3] {
                let scaled_pointer = Point::new(pointer.x * k, pointer.y * k);
                let p = pointer_to_percent(scaled_pointer, display.scaled(k), surface)
                    .expect("percent");
                assert_eq!(hit_test(&zones, p), expected, "k = {k}");
            }
        }
    }

    #[test]
    fn test_pointer_to_percent_values() {
        let p = pointer_to_percent(
            Point::new(225.0, 450.0),
            Size::new(500.0, 1000.0),
            Size::new(1000.0, 2000.0),
        )
        .expect("percent");
        assert!((p.x - 45.0).abs() < 1e-9);
        assert!((p.y - 45.0).abs() < 1e-9);
        assert_eq!(
            pointer_to_percent(Point::new(1.0, 1.0), Size::new(0.0, 10.0), Size::new(10.0, 10.0)),
            None
        );
        assert_eq!(
            pointer_to_percent(Point::new(1.0, 1.0), Size::new(10.0, 10.0), Size::new(0.0, 0.0)),
            None
        );
    }

    #[test]
    fn test_score_tiers() {
        assert_eq!(ScoreTier::classify(70.0), ScoreTier::High);
        assert_eq!(ScoreTier::classify(69.9), ScoreTier::Medium);
        assert_eq!(ScoreTier::classify(40.0), ScoreTier::Medium);
        assert_eq!(ScoreTier::classify(39.0), ScoreTier::Low);
        assert_eq!(ScoreTier::Low.label(), "Needs Improvement");
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), [255, 0, 0]);
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), [0, 255, 0]);
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), [0, 0, 255]);
        assert_eq!(hsl_to_rgb(-60.0, 1.0, 0.5), hsl_to_rgb(300.0, 1.0, 0.5));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), [255, 255, 255]);
    }
}
