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

use super::{step_zoom, Interaction, MapSurface, SurfaceError, SurfaceOptions};
use crate::layer::TileProvider;
use crate::overlay::CircleShape;

/// Surface that records what it was told to draw without rendering anything.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    options: SurfaceOptions,
    ready: bool,
    tile_layer: Option<&'static TileProvider>,
    shapes: Vec<CircleShape>,
    interaction: Interaction,
    zoom: f64,
    invalidations: usize,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new(options: SurfaceOptions) -> Self {
        Self {
            options,
            ready: true,
            tile_layer: None,
            shapes: Vec::new(),
            interaction: Interaction::default(),
            zoom: options.zoom,
            invalidations: 0,
        }
    }

    /// A surface whose container has not been laid out yet.
    #[must_use]
    pub fn not_ready(options: SurfaceOptions) -> Self {
        Self {
            ready: false,
            ..Self::new(options)
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    #[must_use]
    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    #[must_use]
    pub fn tile_layer(&self) -> Option<&'static TileProvider> {
        self.tile_layer
    }

    #[must_use]
    pub fn shapes(&self) -> &[CircleShape] {
        &self.shapes
    }

    #[must_use]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Number of re-layout passes performed
    #[must_use]
    pub fn invalidations(&self) -> usize {
        self.invalidations
    }
}

impl MapSurface for HeadlessSurface {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn set_tile_layer(&mut self, provider: &'static TileProvider) {
        self.tile_layer = Some(provider);
    }

    fn clear_shapes(&mut self) {
        self.shapes.clear();
    }

    fn add_shape(&mut self, shape: CircleShape) {
        self.shapes.push(shape);
    }

    fn set_interaction(&mut self, interaction: Interaction) {
        self.interaction = interaction;
    }

    fn zoom_in(&mut self) -> Result<(), SurfaceError> {
        self.zoom = step_zoom(self.zoom, 1.0, self.options.min_zoom, self.options.max_zoom)?;
        Ok(())
    }

    fn zoom_out(&mut self) -> Result<(), SurfaceError> {
        self.zoom = step_zoom(self.zoom, -1.0, self.options.min_zoom, self.options.max_zoom)?;
        Ok(())
    }

    fn invalidate_size(&mut self) {
        self.invalidations += 1;
    }
}
