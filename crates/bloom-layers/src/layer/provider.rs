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

/// Description of an external XYZ tile endpoint.
///
/// The engine only selects which provider to show; fetching and caching
/// are up to the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileProvider {
    /// Stable identifier, used for cache directories
    pub id: &'static str,
    /// URL template with `{s}`, `{z}`, `{x}`, `{y}` and `{r}` placeholders
    pub url_template: &'static str,
    /// Subdomains substituted for `{s}`
    pub subdomains: &'static [char],
    pub attribution: &'static str,
    pub attribution_url: &'static str,
    pub max_zoom: u8,
}

/// Carto CDN dark basemap
pub const CARTO_DARK: TileProvider = TileProvider {
    id: "carto-dark",
    url_template: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
    subdomains: &['a', 'b', 'c', 'd'],
    attribution: "© OpenStreetMap © CartoDB",
    attribution_url: "https://carto.com/attributions",
    max_zoom: 19,
};

/// Esri World Imagery (note the `{y}/{x}` order)
pub const ESRI_WORLD_IMAGERY: TileProvider = TileProvider {
    id: "esri-world-imagery",
    url_template:
        "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
    subdomains: &[],
    attribution: "Tiles © Esri",
    attribution_url: "https://www.esri.com",
    max_zoom: 19,
};

impl TileProvider {
    /// Expand the template for a single tile.
    #[must_use]
    pub fn tile_url(&self, zoom: u8, x: u32, y: u32) -> String {
        let mut url = self
            .url_template
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
            // Standard-resolution tiles only
            .replace("{r}", "");

        if let Some(subdomain) = self.subdomain(x, y) {
            url = url.replace("{s}", subdomain.encode_utf8(&mut [0; 4]));
        }

        url
    }

    /// Subdomain load balancing based on tile coordinates
    fn subdomain(&self, x: u32, y: u32) -> Option<char> {
        if self.subdomains.is_empty() {
            return None;
        }
        let index = (u64::from(x) + u64::from(y)) % self.subdomains.len() as u64;
        usize::try_from(index).ok().map(|i| self.subdomains[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carto_url() {
        assert_eq!(
            CARTO_DARK.tile_url(3, 4, 2),
            "https://c.basemaps.cartocdn.com/dark_all/3/4/2.png"
        );
        assert_eq!(
            CARTO_DARK.tile_url(0, 0, 0),
            "https://a.basemaps.cartocdn.com/dark_all/0/0/0.png"
        );
    }

    #[test]
    fn test_esri_url_swaps_x_and_y() {
        assert_eq!(
            ESRI_WORLD_IMAGERY.tile_url(5, 10, 12),
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/5/12/10"
        );
    }
}
