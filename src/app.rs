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

use std::path::PathBuf;
use std::time::Instant;

use bloom_layers::{HudState, LayerEngine, SurfaceOptions};
use eframe::egui;
use log::{info, warn};

use crate::analysis::AnalysisRequest;
use crate::config::{AppConfig, SessionOverrides};
use crate::map::EguiSurface;
use crate::tiles::BasemapTiles;
use crate::ui::{map_controls, LayerPanel, MapAction, MapChrome, PanelAction};

const MAP_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(5, 15, 33);

pub struct BloomWatchApp {
    /// Saved settings; session overrides never land here
    config: AppConfig,
    /// Where to save `config`, `None` when saving is off
    config_path: Option<PathBuf>,
    config_dirty: bool,
    layers_changed: bool,
    engine: LayerEngine<EguiSurface>,
    tiles: BasemapTiles,
    layer_panel: LayerPanel,
}

impl std::fmt::Debug for BloomWatchApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloomWatchApp")
            .field("engine", &self.engine)
            .field("config_path", &self.config_path)
            .finish_non_exhaustive()
    }
}

impl BloomWatchApp {
    pub fn new(
        ctx: &egui::Context,
        config: AppConfig,
        overrides: SessionOverrides,
        config_path: Option<PathBuf>,
    ) -> Self {
        let mut engine = LayerEngine::new(overrides.engine_config(&config));
        engine.mount(
            EguiSurface::new(ctx.clone(), SurfaceOptions::default()),
            Instant::now(),
        );

        Self {
            tiles: BasemapTiles::new(config.tile_cache),
            config,
            config_path,
            config_dirty: false,
            layers_changed: false,
            engine,
            layer_panel: LayerPanel::new(),
        }
    }

    fn save_config(&mut self) {
        self.config_dirty = false;
        // A command line selection is saved only once the user edits it
        if self.layers_changed {
            self.config.layers = self.engine.layers().clone();
        }
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            warn!("Failed to save configuration to {}: {e}", path.display());
        }
    }

    fn apply_panel_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::ToggleLayer(label) => {
                let active = self.engine.toggle_layer(label);
                info!("Layer '{label}' {}", if active { "enabled" } else { "disabled" });
                self.layers_changed = true;
                self.config_dirty = true;
            }
            PanelAction::FiltersChanged => {
                self.config_dirty = true;
            }
            PanelAction::Analyze => {
                let request = AnalysisRequest::from_map(
                    &self.config.region,
                    self.engine.layers(),
                    self.config.max_cloud_cover,
                    self.config.ndvi_min,
                );
                match request.to_json() {
                    Ok(json) => info!("Analysis requested:\n{json}"),
                    Err(e) => warn!("Failed to serialize analysis request {}: {e}", request.id),
                }
                self.layer_panel.set_last_request(request);
            }
        }
    }

    fn apply_map_action(&mut self, action: MapAction) {
        match action {
            MapAction::ZoomIn => self.engine.zoom_in(),
            MapAction::ZoomOut => self.engine.zoom_out(),
            MapAction::OpenAttribution(url) => {
                if let Err(e) = webbrowser::open(url) {
                    warn!("Failed to open {url}: {e}");
                }
            }
        }
    }
}

impl eframe::App for BloomWatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.engine.poll(now);
        if let Some(deadline) = self.engine.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }

        // Explorer panel on the right
        let mut panel_actions = Vec::new();
        egui::SidePanel::right("layer_panel")
            .resizable(false)
            .exact_width(300.0)
            .show(ctx, |ui| {
                panel_actions = self
                    .layer_panel
                    .render(ui, self.engine.layers(), &mut self.config);
            });

        // Map takes the remaining space
        let mut map_action = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(MAP_BACKGROUND))
            .show(ctx, |ui| {
                let Some(surface) = self.engine.surface_mut() else {
                    return;
                };
                let response = surface.show(ui, &mut self.tiles);
                let provider = surface.provider();

                let hud = HudState::from_selection(self.engine.layers());
                let chrome = MapChrome {
                    hud: &hud,
                    layers: self.engine.layers(),
                    interactive: self.engine.is_interactive(),
                    provider,
                    acquisition_time: self.config.acquisition_time,
                };
                map_action = map_controls::render(ui, response.rect, &chrome);
            });

        for action in panel_actions {
            self.apply_panel_action(action);
        }
        if let Some(action) = map_action {
            self.apply_map_action(action);
        }

        // Wait for slider drags to finish before writing to disk
        if self.config_dirty && !ctx.input(|i| i.pointer.any_down()) {
            self.save_config();
        }
    }
}
