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

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::LayerError;

/// Known data layers a user can switch on.
///
/// Each kind maps to the free-text label the resolver matches against, so
/// a selection built from kinds resolves exactly like one typed by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    SentinelRgb,
    Landsat,
    Sar,
    UNetMask,
    NdviHeatmap,
}

/// Layers offered by the explorer panel, in display order.
pub const EXPLORER_LAYERS: [LayerKind; 4] = [
    LayerKind::SentinelRgb,
    LayerKind::Landsat,
    LayerKind::Sar,
    LayerKind::UNetMask,
];

impl LayerKind {
    pub const ALL: [LayerKind; 5] = [
        LayerKind::SentinelRgb,
        LayerKind::Landsat,
        LayerKind::Sar,
        LayerKind::UNetMask,
        LayerKind::NdviHeatmap,
    ];

    /// Label as shown in the UI and matched by the resolver
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LayerKind::SentinelRgb => "Sentinel-2 RGB",
            LayerKind::Landsat => "Landsat 8",
            LayerKind::Sar => "SAR (Radar)",
            LayerKind::UNetMask => "U-Net Mask (AI)",
            LayerKind::NdviHeatmap => "NDVI Heatmap",
        }
    }

    /// Short name accepted on the command line
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            LayerKind::SentinelRgb => "sentinel",
            LayerKind::Landsat => "landsat",
            LayerKind::Sar => "sar",
            LayerKind::UNetMask => "mask",
            LayerKind::NdviHeatmap => "ndvi",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LayerKind {
    type Err = LayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == s || kind.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| LayerError::UnknownLayer(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{resolve_tile_source, TileSource};

    #[test]
    fn test_parse_label_and_slug() {
        assert_eq!("U-Net Mask (AI)".parse::<LayerKind>(), Ok(LayerKind::UNetMask));
        assert_eq!("NDVI".parse::<LayerKind>(), Ok(LayerKind::NdviHeatmap));
        assert_eq!(" landsat ".parse::<LayerKind>(), Ok(LayerKind::Landsat));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "thermal".parse::<LayerKind>(),
            Err(LayerError::UnknownLayer("thermal".to_string()))
        );
        // Labels are exact, only slugs ignore case
        assert!("sar (radar)".parse::<LayerKind>().is_err());
    }

    #[test]
    fn test_labels_resolve_like_free_text() {
        assert_eq!(resolve_tile_source(&[LayerKind::SentinelRgb.label()]), TileSource::Satellite);
        assert_eq!(resolve_tile_source(&[LayerKind::Landsat.label()]), TileSource::Satellite);
        assert_eq!(resolve_tile_source(&[LayerKind::Sar.label()]), TileSource::DarkBasemap);
    }
}
