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

//! Heads-up display state drawn on top of the map.
//!
//! The HUD uses its own keyword set: only "Sentinel" and "Landsat" count as
//! satellite view here, so an RGB-only selection gets satellite tiles but
//! keeps the data-mode grid and footer.

use crate::layer::LayerSelection;

/// Keywords that put the HUD into satellite view.
pub const SATELLITE_VIEW_KEYWORDS: [&str; 2] = ["Sentinel", "Landsat"];

/// Keywords that make the live feed indicator pulse.
pub const FEED_PULSE_KEYWORDS: [&str; 1] = ["Sentinel"];

/// Grid spacing in screen pixels.
pub const GRID_CELL_SIZE: f32 = 40.0;

pub const EMPTY_SELECTION_TEXT: &str = "No layer selected";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    SatelliteView,
    DataMode,
}

impl ViewMode {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::SatelliteView => "SATELLITE VIEW",
            ViewMode::DataMode => "DATA MODE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudState {
    pub mode: ViewMode,
    /// Grid overlay shown (data mode only)
    pub grid_visible: bool,
    /// Live feed indicator animates
    pub feed_pulsing: bool,
}

impl HudState {
    #[must_use]
    pub fn from_selection(selection: &LayerSelection) -> Self {
        let mode = if selection.matches_any(&SATELLITE_VIEW_KEYWORDS) {
            ViewMode::SatelliteView
        } else {
            ViewMode::DataMode
        };

        Self {
            mode,
            grid_visible: mode == ViewMode::DataMode,
            feed_pulsing: selection.matches_any(&FEED_PULSE_KEYWORDS),
        }
    }

    /// Footer status line
    #[must_use]
    pub fn footer_text(&self) -> String {
        format!("LIVE FEED | {}", self.mode.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::TileSource;

    fn hud(labels: &[&str]) -> HudState {
        let selection: LayerSelection = labels.iter().copied().collect();
        HudState::from_selection(&selection)
    }

    #[test]
    fn test_sentinel_is_satellite_view_and_pulses() {
        let state = hud(&["Sentinel-2 RGB"]);
        assert_eq!(state.mode, ViewMode::SatelliteView);
        assert!(!state.grid_visible);
        assert!(state.feed_pulsing);
        assert_eq!(state.footer_text(), "LIVE FEED | SATELLITE VIEW");
    }

    #[test]
    fn test_landsat_does_not_pulse() {
        let state = hud(&["Landsat 8"]);
        assert_eq!(state.mode, ViewMode::SatelliteView);
        assert!(!state.feed_pulsing);
    }

    #[test]
    fn test_rgb_only_keeps_data_mode() {
        let selection: LayerSelection = ["False color RGB"].into_iter().collect();
        assert_eq!(selection.tile_source(), TileSource::Satellite);

        let state = HudState::from_selection(&selection);
        assert_eq!(state.mode, ViewMode::DataMode);
        assert!(state.grid_visible);
        assert_eq!(state.footer_text(), "LIVE FEED | DATA MODE");
    }

    #[test]
    fn test_empty_selection() {
        let state = hud(&[]);
        assert_eq!(state.mode, ViewMode::DataMode);
        assert!(state.grid_visible);
        assert!(!state.feed_pulsing);
    }
}
