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

//! Layer presentation engine for BloomWatch map views.
//!
//! This library turns a declarative list of active layer labels and an
//! interactivity flag into what a map widget should show. It has no GUI
//! dependency; the widget is injected through the [`MapSurface`] trait.
//!
//! - **Layer resolution**: label matching and base imagery selection
//!   ([`resolve_tile_source`])
//! - **Overlay layer**: the bloom marker catalog and its circle shapes
//!   ([`resolve_overlay`])
//! - **Engine**: owns the surface, applies updates, zoom steps and the
//!   deferred re-layout ([`LayerEngine`])
//! - **HUD**: footer text and grid visibility ([`HudState`])
//!
//! # Quick Start
//!
//! ```
//! use bloom_layers::{EngineConfig, HeadlessSurface, LayerEngine, LayerSelection, SurfaceOptions, TileSource};
//! use std::time::Instant;
//!
//! let mut engine = LayerEngine::new(EngineConfig {
//!     layers: LayerSelection::dashboard(),
//!     interactive: true,
//!     ..Default::default()
//! });
//! engine.mount(HeadlessSurface::new(SurfaceOptions::default()), Instant::now());
//!
//! assert_eq!(engine.tile_source(), TileSource::Satellite);
//! assert_eq!(engine.surface().unwrap().shapes().len(), 14);
//! ```
//!
//! # Resolving Without an Engine
//!
//! The resolvers are pure functions over label slices:
//!
//! ```
//! use bloom_layers::{resolve_overlay, resolve_tile_source, TileSource};
//!
//! assert_eq!(resolve_tile_source(&["SAR (Radar)"]), TileSource::DarkBasemap);
//! assert!(resolve_overlay(&["SAR (Radar)"]).is_empty());
//! assert_eq!(resolve_overlay(&["U-Net Mask (AI)"]).len(), 7);
//! ```

pub mod engine;
pub mod hud;
pub mod layer;
pub mod overlay;
pub mod surface;

pub use engine::{EngineConfig, LayerEngine, RenderState, DEFAULT_RELAYOUT_DELAY};
pub use hud::{HudState, ViewMode};
pub use layer::{
    resolve_tile_source, LayerError, LayerKind, LayerSelection, TileProvider, TileSource,
    EXPLORER_LAYERS,
};
pub use overlay::{resolve_overlay, CircleShape, OverlayMarker, Rgb, ShapeRole, BLOOM_CATALOG};
pub use surface::{
    wrap_longitude, HeadlessSurface, Interaction, MapSurface, SurfaceError, SurfaceOptions,
};
