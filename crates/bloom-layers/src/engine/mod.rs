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

//! Layer engine and viewport controller.
//!
//! The engine owns the map surface for the lifetime of a screen and reacts to
//! its two inputs independently: a new layer selection swaps the tile layer
//! and rebuilds the overlay, a new interactivity flag toggles the pointer
//! handlers. Updates that arrive while the surface is missing or not ready
//! are remembered and applied on the next call once it is.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::layer::{LayerSelection, TileSource};
use crate::overlay::{resolve_overlay, OverlayMarker};
use crate::surface::{Interaction, MapSurface};

/// Delay before the one-shot re-layout pass after mounting.
pub const DEFAULT_RELAYOUT_DELAY: Duration = Duration::from_millis(100);

/// Inputs supplied by the hosting screen.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Active layer labels.
    pub layers: LayerSelection,
    /// Enable pan, scroll zoom and double-click zoom.
    pub interactive: bool,
    /// Delay before the post-mount re-layout.
    pub relayout_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layers: LayerSelection::new(),
            interactive: false,
            relayout_delay: DEFAULT_RELAYOUT_DELAY,
        }
    }
}

/// Visual state derived from the engine inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub tile_source: TileSource,
    pub overlay: &'static [OverlayMarker],
    pub interaction: Interaction,
}

/// Drives a [`MapSurface`] from a layer selection and an interactivity flag.
#[derive(Debug)]
pub struct LayerEngine<S> {
    surface: Option<S>,
    layers: LayerSelection,
    interactive: bool,
    relayout_delay: Duration,
    relayout_at: Option<Instant>,
    layers_pending: bool,
    interaction_pending: bool,
}

impl<S: MapSurface> LayerEngine<S> {
    /// Create an engine with no surface mounted yet.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            surface: None,
            layers: config.layers,
            interactive: config.interactive,
            relayout_delay: config.relayout_delay,
            relayout_at: None,
            layers_pending: true,
            interaction_pending: true,
        }
    }

    /// Hand the engine its surface.
    ///
    /// A surface is mounted once per screen; later calls are ignored and
    /// return `false`. The current state is applied right away if the surface
    /// is ready, and a single re-layout is scheduled after the configured
    /// delay.
    pub fn mount(&mut self, surface: S, now: Instant) -> bool {
        if self.surface.is_some() {
            debug!("Map surface already mounted, ignoring");
            return false;
        }

        self.surface = Some(surface);
        self.layers_pending = true;
        self.interaction_pending = true;
        self.relayout_at = Some(now + self.relayout_delay);
        self.flush();

        info!(
            "Map surface mounted ({} layer(s), interactive: {})",
            self.layers.len(),
            self.interactive
        );
        true
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    #[must_use]
    pub fn layers(&self) -> &LayerSelection {
        &self.layers
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    #[must_use]
    pub fn tile_source(&self) -> TileSource {
        self.layers.tile_source()
    }

    #[must_use]
    pub fn overlay(&self) -> &'static [OverlayMarker] {
        resolve_overlay(self.layers.labels())
    }

    /// Everything the surface should currently show.
    #[must_use]
    pub fn render_state(&self) -> RenderState {
        RenderState {
            tile_source: self.tile_source(),
            overlay: self.overlay(),
            interaction: Interaction::from_enabled(self.interactive),
        }
    }

    /// Replace the layer selection and re-derive tiles and overlay.
    pub fn set_layers(&mut self, layers: LayerSelection) {
        self.layers = layers;
        self.layers_pending = true;
        self.flush();
    }

    /// Toggle a single label and re-derive tiles and overlay.
    ///
    /// Returns whether the label is active afterwards.
    pub fn toggle_layer(&mut self, label: &str) -> bool {
        let active = self.layers.toggle(label);
        self.layers_pending = true;
        self.flush();
        active
    }

    /// Enable or disable pan, scroll zoom and double-click zoom together.
    pub fn set_interactive(&mut self, enabled: bool) {
        self.interactive = enabled;
        self.interaction_pending = true;
        self.flush();
    }

    pub fn zoom_in(&mut self) {
        self.flush();
        let Some(surface) = self.ready_surface() else {
            debug!("Zoom in ignored: map surface unavailable");
            return;
        };
        if let Err(e) = surface.zoom_in() {
            debug!("Zoom in ignored: {e}");
        }
    }

    pub fn zoom_out(&mut self) {
        self.flush();
        let Some(surface) = self.ready_surface() else {
            debug!("Zoom out ignored: map surface unavailable");
            return;
        };
        if let Err(e) = surface.zoom_out() {
            debug!("Zoom out ignored: {e}");
        }
    }

    /// Run deferred work that is due: pending updates and the one-shot
    /// re-layout.
    pub fn poll(&mut self, now: Instant) {
        self.flush();

        let Some(due) = self.relayout_at else {
            return;
        };
        if now < due {
            return;
        }

        self.relayout_at = None;
        if let Some(surface) = self.ready_surface() {
            surface.invalidate_size();
            debug!("Deferred map re-layout done");
        }
    }

    /// When the host should call [`poll`](Self::poll) next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.relayout_at
    }

    fn ready_surface(&mut self) -> Option<&mut S> {
        self.surface.as_mut().filter(|surface| surface.is_ready())
    }

    fn flush(&mut self) {
        if !self.layers_pending && !self.interaction_pending {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if !surface.is_ready() {
            return;
        }

        if self.layers_pending {
            apply_layers(surface, &self.layers);
            self.layers_pending = false;
        }
        if self.interaction_pending {
            surface.set_interaction(Interaction::from_enabled(self.interactive));
            self.interaction_pending = false;
        }
    }
}

/// Swap the tile layer and replace (never append to) the overlay.
fn apply_layers<S: MapSurface>(surface: &mut S, layers: &LayerSelection) {
    let tile_source = layers.tile_source();
    surface.set_tile_layer(tile_source.provider());

    surface.clear_shapes();
    let markers = resolve_overlay(layers.labels());
    for marker in markers {
        for shape in marker.shapes() {
            surface.add_shape(shape);
        }
    }

    debug!(
        "Applied layers {:?}: {} tiles, {} overlay marker(s)",
        layers.labels(),
        tile_source,
        markers.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{CARTO_DARK, ESRI_WORLD_IMAGERY};
    use crate::surface::{HeadlessSurface, SurfaceOptions};

    fn engine(labels: &[&str], interactive: bool) -> LayerEngine<HeadlessSurface> {
        LayerEngine::new(EngineConfig {
            layers: labels.iter().copied().collect(),
            interactive,
            ..Default::default()
        })
    }

    fn mounted(labels: &[&str], interactive: bool) -> (LayerEngine<HeadlessSurface>, Instant) {
        let mut engine = engine(labels, interactive);
        let now = Instant::now();
        assert!(engine.mount(HeadlessSurface::new(SurfaceOptions::default()), now));
        (engine, now)
    }

    fn surface(engine: &LayerEngine<HeadlessSurface>) -> &HeadlessSurface {
        engine.surface().unwrap()
    }

    #[test]
    fn test_dashboard_scenario() {
        let (engine, _) = mounted(&["Sentinel-2 RGB", "NDVI Heatmap"], true);

        assert_eq!(engine.tile_source(), TileSource::Satellite);
        assert_eq!(engine.overlay().len(), 7);

        let surface = surface(&engine);
        assert_eq!(surface.tile_layer(), Some(&ESRI_WORLD_IMAGERY));
        assert_eq!(surface.shapes().len(), 14);
        assert_eq!(surface.interaction(), Interaction::ENABLED);
    }

    #[test]
    fn test_radar_scenario() {
        let (engine, _) = mounted(&["SAR (Radar)"], false);

        assert_eq!(engine.tile_source(), TileSource::DarkBasemap);
        assert!(engine.overlay().is_empty());

        let surface = surface(&engine);
        assert_eq!(surface.tile_layer(), Some(&CARTO_DARK));
        assert!(surface.shapes().is_empty());
        assert_eq!(surface.interaction(), Interaction::LOCKED);
    }

    #[test]
    fn test_overlay_is_replaced_not_appended() {
        let (mut engine, _) = mounted(&["Mask"], false);
        assert_eq!(surface(&engine).shapes().len(), 14);

        engine.set_layers(LayerSelection::new());
        assert!(surface(&engine).shapes().is_empty());

        // Re-applying the same selection never accumulates shapes
        engine.set_layers(["U-Net Mask (AI)"].into_iter().collect());
        engine.set_layers(["U-Net Mask (AI)"].into_iter().collect());
        assert_eq!(surface(&engine).shapes().len(), 14);
    }

    #[test]
    fn test_interactive_toggle_ends_locked() {
        let (mut engine, _) = mounted(&[], false);

        engine.set_interactive(true);
        assert_eq!(surface(&engine).interaction(), Interaction::ENABLED);
        engine.set_interactive(true);
        engine.set_interactive(false);
        assert_eq!(surface(&engine).interaction(), Interaction::LOCKED);
    }

    #[test]
    fn test_dimensions_are_orthogonal() {
        let (mut engine, _) = mounted(&["Landsat 8"], true);

        engine.set_layers(["SAR (Radar)"].into_iter().collect());
        assert_eq!(surface(&engine).interaction(), Interaction::ENABLED);

        engine.set_interactive(false);
        assert_eq!(surface(&engine).tile_layer(), Some(&CARTO_DARK));
        assert!(surface(&engine).shapes().is_empty());
    }

    #[test]
    fn test_toggle_layer() {
        let (mut engine, _) = mounted(&["Sentinel-2 RGB"], true);

        assert!(engine.toggle_layer("U-Net Mask (AI)"));
        assert_eq!(surface(&engine).shapes().len(), 14);

        assert!(!engine.toggle_layer("Sentinel-2 RGB"));
        assert_eq!(surface(&engine).tile_layer(), Some(&CARTO_DARK));
    }

    #[test]
    fn test_deferred_relayout_fires_once() {
        let (mut engine, now) = mounted(&[], false);
        assert_eq!(engine.next_deadline(), Some(now + DEFAULT_RELAYOUT_DELAY));

        engine.poll(now + Duration::from_millis(50));
        assert_eq!(surface(&engine).invalidations(), 0);

        engine.poll(now + Duration::from_millis(100));
        assert_eq!(surface(&engine).invalidations(), 1);
        assert_eq!(engine.next_deadline(), None);

        engine.poll(now + Duration::from_secs(5));
        assert_eq!(surface(&engine).invalidations(), 1);
    }

    #[test]
    fn test_mount_only_once() {
        let (mut engine, now) = mounted(&["Sentinel-2 RGB"], false);
        let mut other = HeadlessSurface::new(SurfaceOptions::default());
        other.set_ready(false);

        assert!(!engine.mount(other, now));
        assert!(surface(&engine).is_ready());
    }

    #[test]
    fn test_unmounted_operations_are_noops() {
        let mut engine = engine(&["Sentinel-2 RGB"], true);

        engine.zoom_in();
        engine.zoom_out();
        engine.set_interactive(false);
        engine.set_layers(["NDVI Heatmap"].into_iter().collect());
        engine.poll(Instant::now());

        assert!(!engine.is_mounted());
        assert_eq!(engine.tile_source(), TileSource::DarkBasemap);
        assert_eq!(engine.overlay().len(), 7);
    }

    #[test]
    fn test_updates_flush_once_surface_is_ready() {
        let mut engine = engine(&["Sentinel-2 RGB"], false);
        let now = Instant::now();
        engine.mount(HeadlessSurface::not_ready(SurfaceOptions::default()), now);

        engine.set_layers(["NDVI Heatmap"].into_iter().collect());
        engine.set_interactive(true);
        assert_eq!(surface(&engine).tile_layer(), None);
        assert!(surface(&engine).shapes().is_empty());

        engine.surface_mut().unwrap().set_ready(true);
        engine.poll(now);

        let surface = surface(&engine);
        assert_eq!(surface.tile_layer(), Some(&CARTO_DARK));
        assert_eq!(surface.shapes().len(), 14);
        assert_eq!(surface.interaction(), Interaction::ENABLED);
    }

    #[test]
    fn test_zoom_steps_and_bounds() {
        let (mut engine, _) = mounted(&[], true);
        assert_eq!(surface(&engine).zoom(), 3.0);

        engine.zoom_in();
        assert_eq!(surface(&engine).zoom(), 4.0);

        engine.zoom_out();
        engine.zoom_out();
        assert_eq!(surface(&engine).zoom(), 2.0);

        // Minimum zoom is 2, further steps are swallowed
        engine.zoom_out();
        assert_eq!(surface(&engine).zoom(), 2.0);
    }

    #[test]
    fn test_render_state() {
        let engine = engine(&["Sentinel-2 RGB", "NDVI Heatmap"], true);
        let state = engine.render_state();
        assert_eq!(state.tile_source, TileSource::Satellite);
        assert_eq!(state.overlay.len(), 7);
        assert_eq!(state.interaction, Interaction::ENABLED);
    }
}
