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

//! Map surface abstraction.
//!
//! The engine never talks to a rendering library directly. Whatever draws
//! the map (an egui widget, a browser map, a headless recorder in tests)
//! implements [`MapSurface`] and is handed to the engine when it mounts.

mod headless;

pub use headless::HeadlessSurface;

use thiserror::Error;

use crate::layer::TileProvider;
use crate::overlay::CircleShape;

/// Errors a surface can report for operations it refuses.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("map surface is not ready")]
    NotReady,

    #[error("zoom level {requested} outside {min}..={max}")]
    ZoomOutOfRange { requested: f64, min: f64, max: f64 },
}

/// Construction-time configuration of a map surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceOptions {
    /// Initial center latitude in degrees
    pub center_lat: f64,
    /// Initial center longitude in degrees
    pub center_lon: f64,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Wrap the center back into ±180° when panning past the antimeridian
    pub world_copy_jump: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            center_lat: 20.0,
            center_lon: 0.0,
            zoom: 3.0,
            min_zoom: 2.0,
            max_zoom: 19.0,
            world_copy_jump: true,
        }
    }
}

/// Pointer interactions the surface responds to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    pub dragging: bool,
    pub scroll_zoom: bool,
    pub double_click_zoom: bool,
}

impl Interaction {
    pub const ENABLED: Interaction = Interaction {
        dragging: true,
        scroll_zoom: true,
        double_click_zoom: true,
    };

    pub const LOCKED: Interaction = Interaction {
        dragging: false,
        scroll_zoom: false,
        double_click_zoom: false,
    };

    /// All three handlers on, or all three off.
    #[must_use]
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Self::ENABLED
        } else {
            Self::LOCKED
        }
    }
}

/// Capabilities the layer engine needs from a map widget.
pub trait MapSurface {
    /// Whether the surface can accept updates yet.
    fn is_ready(&self) -> bool {
        true
    }

    /// Replace the base tile layer.
    fn set_tile_layer(&mut self, provider: &'static TileProvider);

    /// Remove every overlay shape.
    fn clear_shapes(&mut self);

    fn add_shape(&mut self, shape: CircleShape);

    fn set_interaction(&mut self, interaction: Interaction);

    /// Step one zoom level in.
    fn zoom_in(&mut self) -> Result<(), SurfaceError>;

    /// Step one zoom level out.
    fn zoom_out(&mut self) -> Result<(), SurfaceError>;

    /// Re-measure the container and redraw.
    fn invalidate_size(&mut self);
}

/// Apply a discrete zoom step within bounds.
pub fn step_zoom(current: f64, delta: f64, min: f64, max: f64) -> Result<f64, SurfaceError> {
    let requested = (current + delta).round();
    if requested < min || requested > max {
        return Err(SurfaceError::ZoomOutOfRange { requested, min, max });
    }
    Ok(requested)
}

/// Bring a longitude back into `[-180, 180)`.
#[must_use]
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}
