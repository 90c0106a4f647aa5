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

//! Basemap tile sources and HTTP tile managers.

use std::collections::HashMap;
use std::path::PathBuf;

use bloom_layers::TileProvider;
use eframe::egui;
use walkers::sources::{Attribution, TileSource};
use walkers::{HttpOptions, HttpTiles, TileId};

/// walkers tile source backed by one of the engine's tile providers
#[derive(Debug, Clone, Copy)]
pub struct ProviderTiles {
    provider: &'static TileProvider,
}

impl ProviderTiles {
    pub fn new(provider: &'static TileProvider) -> Self {
        Self { provider }
    }
}

impl TileSource for ProviderTiles {
    fn tile_url(&self, tile_id: TileId) -> String {
        self.provider.tile_url(tile_id.zoom, tile_id.x, tile_id.y)
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: self.provider.attribution,
            url: self.provider.attribution_url,
            logo_light: None,
            logo_dark: None,
        }
    }

    fn max_zoom(&self) -> u8 {
        self.provider.max_zoom
    }

    // tile_size() keeps the 256px default
}

/// Lazily created tile managers, one per tile provider
pub struct BasemapTiles {
    tiles: HashMap<&'static str, HttpTiles>,
    disk_cache: bool,
}

impl std::fmt::Debug for BasemapTiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasemapTiles")
            .field("loaded", &self.tiles.keys().collect::<Vec<_>>())
            .field("disk_cache", &self.disk_cache)
            .finish()
    }
}

impl BasemapTiles {
    pub fn new(disk_cache: bool) -> Self {
        Self {
            tiles: HashMap::new(),
            disk_cache,
        }
    }

    /// Whether a tile manager exists for `provider`
    pub fn is_loaded(&self, provider: &TileProvider) -> bool {
        self.tiles.contains_key(provider.id)
    }

    /// Get or create the tile manager for a provider
    pub fn get_or_create(
        &mut self,
        provider: &'static TileProvider,
        ctx: &egui::Context,
    ) -> &mut HttpTiles {
        let disk_cache = self.disk_cache;
        self.tiles.entry(provider.id).or_insert_with(|| {
            let http_options = HttpOptions {
                cache: disk_cache.then(|| cache_dir(provider)),
                ..Default::default()
            };
            log::info!("Creating tile manager for {}", provider.id);
            HttpTiles::with_options(ProviderTiles::new(provider), http_options, ctx.clone())
        })
    }
}

/// On-disk cache directory for a provider
pub fn cache_dir(provider: &TileProvider) -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("bloomwatch-desktop")
        .join("tiles")
        .join(provider.id)
}
