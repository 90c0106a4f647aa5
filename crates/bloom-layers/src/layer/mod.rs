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

//! Layer selection and base imagery resolution.
//!
//! A layer selection is a list of free-text labels such as `"Sentinel-2 RGB"`
//! or `"U-Net Mask (AI)"`. Behavior is keyed off case-sensitive substring
//! matches against a handful of keyword fragments, so any label that contains
//! a recognized keyword anywhere in its text activates the matching behavior.
//! Typed callers can go through [`LayerKind`] instead of raw strings.

mod kind;
mod provider;

pub use kind::{LayerKind, EXPLORER_LAYERS};
pub use provider::{TileProvider, CARTO_DARK, ESRI_WORLD_IMAGERY};

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Keywords that switch the base map to true-color satellite imagery.
pub const SATELLITE_KEYWORDS: [&str; 3] = ["Sentinel", "Landsat", "RGB"];

/// Keywords that turn the bloom overlay on.
pub const OVERLAY_KEYWORDS: [&str; 3] = ["Mask", "IA", "Heatmap"];

/// Errors raised when converting text into typed layers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayerError {
    #[error("unknown layer: {0}")]
    UnknownLayer(String),
}

/// Returns true if any label contains any of the keywords (case-sensitive).
pub fn matches_any<S: AsRef<str>>(labels: &[S], keywords: &[&str]) -> bool {
    labels
        .iter()
        .any(|label| keywords.iter().any(|keyword| label.as_ref().contains(keyword)))
}

/// Base imagery drawn underneath every other layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileSource {
    /// True-color satellite imagery.
    Satellite,
    /// Stylized dark reference tiles.
    #[default]
    DarkBasemap,
}

impl TileSource {
    /// Tile endpoint backing this source.
    #[must_use]
    pub fn provider(self) -> &'static TileProvider {
        match self {
            TileSource::Satellite => &ESRI_WORLD_IMAGERY,
            TileSource::DarkBasemap => &CARTO_DARK,
        }
    }

    /// Human-readable name for UI display
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            TileSource::Satellite => "Satellite",
            TileSource::DarkBasemap => "Dark basemap",
        }
    }
}

impl fmt::Display for TileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Pick the base imagery for a set of active layer labels.
///
/// Returns [`TileSource::Satellite`] if any label contains "Sentinel",
/// "Landsat" or "RGB", and [`TileSource::DarkBasemap`] otherwise. The empty
/// selection yields the dark basemap.
#[must_use]
pub fn resolve_tile_source<S: AsRef<str>>(labels: &[S]) -> TileSource {
    if matches_any(labels, &SATELLITE_KEYWORDS) {
        TileSource::Satellite
    } else {
        TileSource::DarkBasemap
    }
}

/// Ordered set of active layer labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerSelection {
    labels: Vec<String>,
}

impl LayerSelection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from typed layers.
    #[must_use]
    pub fn from_kinds(kinds: &[LayerKind]) -> Self {
        kinds.iter().map(|kind| kind.label()).collect()
    }

    /// Selection the layer explorer opens with.
    #[must_use]
    pub fn explorer_default() -> Self {
        Self::from_kinds(&[LayerKind::SentinelRgb])
    }

    /// Fixed selection shown on the dashboard overview map.
    #[must_use]
    pub fn dashboard() -> Self {
        Self::from_kinds(&[LayerKind::SentinelRgb, LayerKind::NdviHeatmap])
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Exact label membership (not keyword matching).
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Remove the label if present, append it otherwise.
    ///
    /// Returns whether the label is active after the call.
    pub fn toggle(&mut self, label: &str) -> bool {
        if self.contains(label) {
            self.labels.retain(|l| l != label);
            false
        } else {
            self.labels.push(label.to_owned());
            true
        }
    }

    /// Returns true if any label contains any of the keywords.
    #[must_use]
    pub fn matches_any(&self, keywords: &[&str]) -> bool {
        matches_any(&self.labels, keywords)
    }

    /// Base imagery for this selection.
    #[must_use]
    pub fn tile_source(&self) -> TileSource {
        resolve_tile_source(&self.labels)
    }

    /// Whether the bloom overlay is on for this selection.
    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.matches_any(&OVERLAY_KEYWORDS)
    }

    /// Labels that name a known typed layer.
    pub fn kinds(&self) -> impl Iterator<Item = LayerKind> + '_ {
        self.labels.iter().filter_map(|label| label.parse().ok())
    }
}

impl<S: Into<String>> FromIterator<S> for LayerSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for LayerSelection {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.labels.extend(iter.into_iter().map(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satellite_keywords() {
        assert_eq!(resolve_tile_source(&["Sentinel-2 RGB"]), TileSource::Satellite);
        assert_eq!(resolve_tile_source(&["Landsat 8"]), TileSource::Satellite);
        assert_eq!(resolve_tile_source(&["False color RGB"]), TileSource::Satellite);
    }

    #[test]
    fn test_empty_selection_is_dark() {
        let empty: [&str; 0] = [];
        assert_eq!(resolve_tile_source(&empty), TileSource::DarkBasemap);
        assert_eq!(LayerSelection::new().tile_source(), TileSource::DarkBasemap);
    }

    #[test]
    fn test_non_matching_labels_are_dark() {
        assert_eq!(
            resolve_tile_source(&["SAR (Radar)", "U-Net Mask (AI)", "NDVI Heatmap"]),
            TileSource::DarkBasemap
        );
    }

    #[test]
    fn test_matching_is_case_sensitive_substring() {
        assert_eq!(resolve_tile_source(&["sentinel-2 rgb"]), TileSource::DarkBasemap);
        assert_eq!(resolve_tile_source(&["xxSentinelxx"]), TileSource::Satellite);
    }

    #[test]
    fn test_any_label_wins() {
        assert_eq!(
            resolve_tile_source(&["SAR (Radar)", "Landsat 8"]),
            TileSource::Satellite
        );
    }

    #[test]
    fn test_resolution_is_pure() {
        let labels = ["Sentinel-2 RGB", "NDVI Heatmap"];
        assert_eq!(resolve_tile_source(&labels), resolve_tile_source(&labels));
    }

    #[test]
    fn test_toggle() {
        let mut selection = LayerSelection::explorer_default();
        assert!(selection.contains("Sentinel-2 RGB"));

        assert!(selection.toggle("U-Net Mask (AI)"));
        assert_eq!(selection.labels(), ["Sentinel-2 RGB", "U-Net Mask (AI)"]);

        assert!(!selection.toggle("Sentinel-2 RGB"));
        assert_eq!(selection.labels(), ["U-Net Mask (AI)"]);
        assert_eq!(selection.tile_source(), TileSource::DarkBasemap);
        assert!(selection.overlay_visible());
    }

    #[test]
    fn test_dashboard_selection() {
        let selection = LayerSelection::dashboard();
        assert_eq!(selection.tile_source(), TileSource::Satellite);
        assert!(selection.overlay_visible());
        assert_eq!(
            selection.kinds().collect::<Vec<_>>(),
            vec![LayerKind::SentinelRgb, LayerKind::NdviHeatmap]
        );
    }

    #[test]
    fn test_kinds_skip_free_text() {
        let selection: LayerSelection = ["Landsat 8", "My custom layer"].into_iter().collect();
        assert_eq!(selection.kinds().collect::<Vec<_>>(), vec![LayerKind::Landsat]);
    }
}
