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

use bloom_layers::surface::step_zoom;
use bloom_layers::{
    wrap_longitude, CircleShape, Interaction, MapSurface, SurfaceError, SurfaceOptions,
    TileProvider,
};
use eframe::egui;
use walkers::{lat_lon, Map, MapMemory, Tiles};

use super::BloomOverlay;
use crate::tiles::BasemapTiles;

/// walkers-backed map surface driven by the layer engine.
///
/// walkers is immediate mode, so this type keeps what the engine asked for
/// (tile provider, shapes, pointer handlers) and replays it every frame in
/// [`EguiSurface::show`].
pub struct EguiSurface {
    ctx: egui::Context,
    options: SurfaceOptions,
    memory: MapMemory,
    provider: Option<&'static TileProvider>,
    shapes: Vec<CircleShape>,
    interaction: Interaction,
}

impl std::fmt::Debug for EguiSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EguiSurface")
            .field("options", &self.options)
            .field("zoom", &self.zoom())
            .field("provider", &self.provider.map(|p| p.id))
            .field("shapes", &self.shapes.len())
            .field("interaction", &self.interaction)
            .finish_non_exhaustive()
    }
}

impl EguiSurface {
    pub fn new(ctx: egui::Context, options: SurfaceOptions) -> Self {
        let mut memory = MapMemory::default();
        if memory.set_zoom(options.zoom).is_err() {
            log::warn!("Initial zoom {} rejected by map widget", options.zoom);
        }

        Self {
            ctx,
            options,
            memory,
            provider: None,
            shapes: Vec::new(),
            interaction: Interaction::default(),
        }
    }

    /// Tile provider currently shown
    pub fn provider(&self) -> Option<&'static TileProvider> {
        self.provider
    }

    pub fn zoom(&self) -> f64 {
        self.memory.zoom()
    }

    /// Draw the map with its overlay into the remaining space of `ui`.
    ///
    /// Tiles come from the provider last set through
    /// [`MapSurface::set_tile_layer`]; before that only the overlay is drawn.
    pub fn show(&mut self, ui: &mut egui::Ui, basemaps: &mut BasemapTiles) -> egui::Response {
        let ctx = ui.ctx().clone();
        let tiles: Option<&mut dyn Tiles> = match self.provider {
            Some(provider) => Some(basemaps.get_or_create(provider, &ctx)),
            None => None,
        };

        let center = lat_lon(self.options.center_lat, self.options.center_lon);
        let map = Map::new(tiles, &mut self.memory, center)
            .with_plugin(BloomOverlay::new(&self.shapes))
            .panning(self.interaction.dragging)
            .zoom_gesture(self.interaction.scroll_zoom)
            .double_click_to_zoom(self.interaction.double_click_zoom);
        let response = ui.add(map);

        self.enforce_bounds();
        response
    }

    /// Keep zoom above the minimum and the center within ±180°
    fn enforce_bounds(&mut self) {
        if self.memory.zoom() < self.options.min_zoom
            && self.memory.set_zoom(self.options.min_zoom).is_err()
        {
            log::warn!("Failed to clamp zoom to {}", self.options.min_zoom);
        }

        if !self.options.world_copy_jump {
            return;
        }
        if let Some(position) = self.memory.detached() {
            let lon = position.x();
            if !(-180.0..180.0).contains(&lon) {
                self.memory
                    .center_at(lat_lon(position.y(), wrap_longitude(lon)));
            }
        }
    }

    fn set_zoom_level(&mut self, delta: f64) -> Result<(), SurfaceError> {
        let next = step_zoom(
            self.memory.zoom(),
            delta,
            self.options.min_zoom,
            self.options.max_zoom,
        )?;
        if self.memory.set_zoom(next).is_err() {
            return Err(SurfaceError::ZoomOutOfRange {
                requested: next,
                min: self.options.min_zoom,
                max: self.options.max_zoom,
            });
        }
        self.ctx.request_repaint();
        Ok(())
    }
}

impl MapSurface for EguiSurface {
    fn set_tile_layer(&mut self, provider: &'static TileProvider) {
        if self.provider.map(|p| p.id) != Some(provider.id) {
            log::info!("Switching basemap to {}", provider.id);
        }
        self.provider = Some(provider);
        self.ctx.request_repaint();
    }

    fn clear_shapes(&mut self) {
        self.shapes.clear();
        self.ctx.request_repaint();
    }

    fn add_shape(&mut self, shape: CircleShape) {
        self.shapes.push(shape);
    }

    fn set_interaction(&mut self, interaction: Interaction) {
        self.interaction = interaction;
    }

    fn zoom_in(&mut self) -> Result<(), SurfaceError> {
        self.set_zoom_level(1.0)
    }

    fn zoom_out(&mut self) -> Result<(), SurfaceError> {
        self.set_zoom_level(-1.0)
    }

    fn invalidate_size(&mut self) {
        // The map widget measures its rect on every frame
        self.ctx.request_repaint();
    }
}
