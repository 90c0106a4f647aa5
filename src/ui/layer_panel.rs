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

//! Layer explorer side panel: layer toggles, spectral filters and the
//! region analysis button.

use bloom_layers::{LayerSelection, EXPLORER_LAYERS};
use eframe::egui;

use crate::analysis::AnalysisRequest;
use crate::config::AppConfig;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(61, 255, 138);
const MUTED: egui::Color32 = egui::Color32::from_rgb(130, 150, 160);

/// Something the user did in the panel that the app must apply
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    /// Add or remove a layer label
    ToggleLayer(&'static str),
    /// A filter slider moved
    FiltersChanged,
    /// Build an analysis request for the selected region
    Analyze,
}

#[derive(Debug, Default)]
pub struct LayerPanel {
    last_request: Option<AnalysisRequest>,
}

impl LayerPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the most recent request for display
    pub fn set_last_request(&mut self, request: AnalysisRequest) {
        self.last_request = Some(request);
    }

    pub fn render(
        &mut self,
        ui: &mut egui::Ui,
        layers: &LayerSelection,
        config: &mut AppConfig,
    ) -> Vec<PanelAction> {
        let mut actions = Vec::new();

        Self::render_layers_section(ui, layers, &mut actions);
        ui.add_space(12.0);
        Self::render_filters_section(ui, config, &mut actions);
        ui.add_space(12.0);
        self.render_region_section(ui, config, &mut actions);

        actions
    }

    fn section_header(ui: &mut egui::Ui, text: &str) {
        ui.label(egui::RichText::new(text).color(ACCENT).size(13.0).strong());
        ui.add_space(4.0);
    }

    fn render_layers_section(
        ui: &mut egui::Ui,
        layers: &LayerSelection,
        actions: &mut Vec<PanelAction>,
    ) {
        Self::section_header(ui, "◈ Satellite Layers");

        for kind in EXPLORER_LAYERS {
            let label = kind.label();
            let mut active = layers.contains(label);
            let text = if active {
                egui::RichText::new(label).color(egui::Color32::WHITE).strong()
            } else {
                egui::RichText::new(label).color(MUTED)
            };
            if ui.checkbox(&mut active, text).changed() {
                actions.push(PanelAction::ToggleLayer(label));
            }
        }
    }

    fn render_filters_section(
        ui: &mut egui::Ui,
        config: &mut AppConfig,
        actions: &mut Vec<PanelAction>,
    ) {
        Self::section_header(ui, "◈ Spectral Filters");

        ui.label(egui::RichText::new("Max cloud cover").color(MUTED).size(11.0));
        let cloud = ui.add(egui::Slider::new(&mut config.max_cloud_cover, 0..=100).suffix("%"));

        ui.add_space(6.0);

        ui.label(egui::RichText::new("NDVI threshold").color(MUTED).size(11.0));
        let ndvi = ui.add(
            egui::Slider::new(&mut config.ndvi_min, 0.0..=1.0)
                .step_by(0.1)
                .fixed_decimals(1),
        );

        if cloud.changed() || ndvi.changed() {
            actions.push(PanelAction::FiltersChanged);
        }
    }

    fn render_region_section(
        &self,
        ui: &mut egui::Ui,
        config: &AppConfig,
        actions: &mut Vec<PanelAction>,
    ) {
        ui.separator();
        ui.label(egui::RichText::new("Selected Region").color(egui::Color32::WHITE).size(12.0));
        ui.label(
            egui::RichText::new(format!(
                "Lat: {:.2}, Lon: {:.2}",
                config.region.latitude, config.region.longitude
            ))
            .color(MUTED)
            .size(10.0)
            .monospace(),
        );

        ui.add_space(6.0);

        let button = egui::Button::new(
            egui::RichText::new("Analyze Region ▶")
                .color(egui::Color32::from_rgb(5, 15, 33))
                .strong(),
        )
        .fill(ACCENT)
        .min_size(egui::vec2(ui.available_width(), 32.0));

        if ui.add(button).clicked() {
            actions.push(PanelAction::Analyze);
        }

        if let Some(request) = &self.last_request {
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(format!(
                    "Request {} sent {}",
                    short_id(request),
                    request.requested_at.format("%H:%M:%S UTC")
                ))
                .color(MUTED)
                .size(9.0)
                .monospace(),
            );
            ui.label(
                egui::RichText::new(request.metrics.to_string())
                    .color(ACCENT)
                    .size(9.0)
                    .monospace(),
            );
        }
    }
}

/// First block of the request UUID
fn short_id(request: &AnalysisRequest) -> String {
    request
        .id
        .simple()
        .to_string()
        .chars()
        .take(8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegionConfig;

    #[test]
    fn test_short_id() {
        let request = AnalysisRequest::from_map(
            &RegionConfig::default(),
            &LayerSelection::new(),
            12,
            0.4,
        );
        let id = short_id(&request);
        assert_eq!(id.len(), 8);
        assert!(request.id.simple().to_string().starts_with(&id));
    }
}
