// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bloom overlay markers.
//!
//! The overlay is all or nothing: when any active label mentions a mask or
//! heatmap layer the whole bloom catalog is shown, otherwise nothing is.
//! Every marker is drawn as a small opaque core dot inside a large
//! translucent glow whose opacity follows the marker's intensity.

use std::fmt;

use crate::layer::{matches_any, OVERLAY_KEYWORDS};

const CORE_RADIUS: f32 = 4.0;
const CORE_STROKE_WIDTH: f32 = 1.0;
const CORE_STROKE_OPACITY: f32 = 0.8;
const GLOW_RADIUS: f32 = 25.0;
const GLOW_OPACITY_PER_INTENSITY: f32 = 0.15;

/// 24-bit display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::from_hex(0x00FF_FFFF);

    /// Build a color from a `0xRRGGBB` literal.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, reason = "each channel is masked to 8 bits")]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Active bloom
pub const BLOOM_GREEN: Rgb = Rgb::from_hex(0x003D_FF8A);
/// Elevated risk
pub const BLOOM_AMBER: Rgb = Rgb::from_hex(0x00FA_CC15);
/// Critical
pub const BLOOM_RED: Rgb = Rgb::from_hex(0x00F8_7171);

/// One annotated bloom location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayMarker {
    pub name: &'static str,
    /// Latitude in WGS84 degrees
    pub lat: f64,
    /// Longitude in WGS84 degrees
    pub lon: f64,
    pub color: Rgb,
    /// Detection intensity in `[0, 1]`
    pub intensity: f32,
}

/// Fixed bloom catalog, in draw order.
pub const BLOOM_CATALOG: [OverlayMarker; 7] = [
    OverlayMarker { name: "Amazon", lat: -3.4653, lon: -62.2159, color: BLOOM_GREEN, intensity: 0.8 },
    OverlayMarker { name: "Florida", lat: 25.7617, lon: -80.1918, color: BLOOM_GREEN, intensity: 0.6 },
    OverlayMarker { name: "Thailand", lat: 15.87, lon: 100.9925, color: BLOOM_GREEN, intensity: 0.7 },
    OverlayMarker { name: "California", lat: 36.7783, lon: -119.4179, color: BLOOM_AMBER, intensity: 0.5 },
    OverlayMarker { name: "Kyushu", lat: 32.59, lon: 130.8, color: BLOOM_RED, intensity: 0.9 },
    OverlayMarker { name: "Venice", lat: 45.44, lon: 12.33, color: BLOOM_GREEN, intensity: 0.75 },
    OverlayMarker { name: "Sydney", lat: -33.8688, lon: 151.2093, color: BLOOM_GREEN, intensity: 0.4 },
];

/// Which of the two concentric circles a shape is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeRole {
    Core,
    Glow,
}

/// Outline drawn around a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStroke {
    pub color: Rgb,
    /// Width in screen pixels
    pub width: f32,
    pub opacity: f32,
}

/// A circle anchored at a geographic position with a fixed screen radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    pub role: ShapeRole,
    pub lat: f64,
    pub lon: f64,
    /// Radius in screen pixels, independent of zoom
    pub radius: f32,
    pub fill: Rgb,
    pub fill_opacity: f32,
    pub stroke: Option<ShapeStroke>,
}

impl OverlayMarker {
    /// Small opaque dot with a white outline.
    #[must_use]
    pub fn core_shape(&self) -> CircleShape {
        CircleShape {
            role: ShapeRole::Core,
            lat: self.lat,
            lon: self.lon,
            radius: CORE_RADIUS,
            fill: self.color,
            fill_opacity: 1.0,
            stroke: Some(ShapeStroke {
                color: Rgb::WHITE,
                width: CORE_STROKE_WIDTH,
                opacity: CORE_STROKE_OPACITY,
            }),
        }
    }

    /// Large translucent halo, more opaque for stronger detections.
    #[must_use]
    pub fn glow_shape(&self) -> CircleShape {
        CircleShape {
            role: ShapeRole::Glow,
            lat: self.lat,
            lon: self.lon,
            radius: GLOW_RADIUS,
            fill: self.color,
            fill_opacity: GLOW_OPACITY_PER_INTENSITY * self.intensity.clamp(0.0, 1.0),
            stroke: None,
        }
    }

    /// Both shapes, core first.
    #[must_use]
    pub fn shapes(&self) -> [CircleShape; 2] {
        [self.core_shape(), self.glow_shape()]
    }
}

/// Markers to draw for a set of active layer labels.
///
/// Returns the whole catalog if any label contains "Mask", "IA" or
/// "Heatmap", and an empty slice otherwise.
#[must_use]
pub fn resolve_overlay<S: AsRef<str>>(labels: &[S]) -> &'static [OverlayMarker] {
    if matches_any(labels, &OVERLAY_KEYWORDS) {
        &BLOOM_CATALOG
    } else {
        &[]
    }
}

/// Flattened shape list for a set of active layer labels.
#[must_use]
pub fn overlay_shapes<S: AsRef<str>>(labels: &[S]) -> Vec<CircleShape> {
    resolve_overlay(labels)
        .iter()
        .flat_map(OverlayMarker::shapes)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(markers: &[OverlayMarker]) -> Vec<&'static str> {
        markers.iter().map(|m| m.name).collect()
    }

    #[test]
    fn test_overlay_keywords_show_catalog() {
        let expected = vec![
            "Amazon",
            "Florida",
            "Thailand",
            "California",
            "Kyushu",
            "Venice",
            "Sydney",
        ];
        assert_eq!(names(resolve_overlay(&["U-Net Mask (AI)"])), expected);
        assert_eq!(names(resolve_overlay(&["NDVI Heatmap"])), expected);
        assert_eq!(names(resolve_overlay(&["Bloom IA"])), expected);
    }

    #[test]
    fn test_no_overlay_keywords() {
        let empty: [&str; 0] = [];
        assert!(resolve_overlay(&empty).is_empty());
        assert!(resolve_overlay(&["Sentinel-2 RGB", "SAR (Radar)", "Landsat 8"]).is_empty());
        // Case-sensitive: "ia" and "mask" do not count
        assert!(resolve_overlay(&["mask", "media"]).is_empty());
    }

    #[test]
    fn test_overlay_is_pure() {
        let labels = ["U-Net Mask (AI)"];
        assert_eq!(resolve_overlay(&labels), resolve_overlay(&labels));
    }

    #[test]
    fn test_core_shape() {
        let core = BLOOM_CATALOG[4].core_shape();
        assert_eq!(core.role, ShapeRole::Core);
        assert_eq!(core.radius, 4.0);
        assert_eq!(core.fill, BLOOM_RED);
        assert_eq!(core.fill_opacity, 1.0);
        let stroke = core.stroke.unwrap();
        assert_eq!(stroke.color, Rgb::WHITE);
        assert_eq!(stroke.width, 1.0);
    }

    #[test]
    fn test_glow_opacity_scales_with_intensity() {
        let glow = BLOOM_CATALOG[0].glow_shape();
        assert_eq!(glow.role, ShapeRole::Glow);
        assert_eq!(glow.radius, 25.0);
        assert!(glow.stroke.is_none());
        assert!((glow.fill_opacity - 0.12).abs() < 1e-6);

        let sydney = BLOOM_CATALOG[6].glow_shape();
        assert!((sydney.fill_opacity - 0.06).abs() < 1e-6);
    }

    #[test]
    fn test_two_shapes_per_marker() {
        let shapes = overlay_shapes(&["NDVI Heatmap"]);
        assert_eq!(shapes.len(), 14);
        assert_eq!(shapes[0].role, ShapeRole::Core);
        assert_eq!(shapes[1].role, ShapeRole::Glow);
        assert_eq!((shapes[1].lat, shapes[1].lon), (-3.4653, -62.2159));
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(BLOOM_GREEN.to_string(), "#3DFF8A");
        assert_eq!(BLOOM_AMBER.to_string(), "#FACC15");
        assert_eq!(Rgb::WHITE, Rgb { r: 255, g: 255, b: 255 });
    }
}
