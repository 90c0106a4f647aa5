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

//! Application configuration management.
//!
//! This module handles persistent configuration storage using TOML format.
//! It stores the explorer's layer selection, viewport interactivity, the
//! spectral filter thresholds and the region handed to analysis.

use std::path::Path;
use std::time::Duration;

use bloom_layers::{EngineConfig, LayerSelection};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "bloomwatch-desktop";
const CONFIG_NAME: &str = "config";

/// Region of interest handed to analysis
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RegionConfig {
    /// Display name
    pub name: String,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            name: "Po Delta".to_string(),
            latitude: 45.44,
            longitude: 12.33,
        }
    }
}

impl RegionConfig {
    /// Name with coordinates, for labels and analysis requests
    pub fn describe(&self) -> String {
        format!(
            "{} (Lat: {:.2}, Lon: {:.2})",
            self.name, self.latitude, self.longitude
        )
    }
}

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Configuration schema version for migrations
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// Active map layer labels
    #[serde(default = "LayerSelection::explorer_default")]
    pub layers: LayerSelection,

    /// Enable pan and zoom on the map
    #[serde(default = "default_true")]
    pub interactive: bool,

    /// Maximum cloud cover filter in percent (0 - 100)
    #[serde(default = "default_max_cloud_cover")]
    pub max_cloud_cover: u8,

    /// Minimum NDVI threshold (0.0 - 1.0)
    #[serde(default = "default_ndvi_min")]
    pub ndvi_min: f32,

    /// Delay before the map re-measures its container after startup
    #[serde(default = "default_relayout_delay_ms")]
    pub relayout_delay_ms: u64,

    /// Keep downloaded tiles on disk
    #[serde(default = "default_true")]
    pub tile_cache: bool,

    /// Selected region of interest
    #[serde(default)]
    pub region: RegionConfig,

    /// Acquisition time shown on the map
    #[serde(default = "default_acquisition_time")]
    pub acquisition_time: DateTime<Utc>,
}

// Default value functions for serde
fn default_config_version() -> u32 {
    1 // Current schema version
}

fn default_true() -> bool {
    true
}

fn default_max_cloud_cover() -> u8 {
    12
}

fn default_ndvi_min() -> f32 {
    0.4
}

fn default_relayout_delay_ms() -> u64 {
    100
}

fn default_acquisition_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 10, 24, 10, 0, 0)
        .single()
        .unwrap_or_default()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            layers: LayerSelection::explorer_default(),
            interactive: true,
            max_cloud_cover: default_max_cloud_cover(),
            ndvi_min: default_ndvi_min(),
            relayout_delay_ms: default_relayout_delay_ms(),
            tile_cache: true,
            region: RegionConfig::default(),
            acquisition_time: default_acquisition_time(),
        }
    }
}

impl AppConfig {
    /// Load configuration from disk, clamping out-of-range values
    pub fn load() -> Result<Self, confy::ConfyError> {
        let config: AppConfig = confy::load(APP_NAME, CONFIG_NAME)?;
        Ok(config.sanitized())
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, confy::ConfyError> {
        let config: AppConfig = confy::load_path(path)?;
        Ok(config.sanitized())
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<(), confy::ConfyError> {
        confy::store_path(path, self)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<std::path::PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    /// Clamp filter values into their slider ranges
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.max_cloud_cover > 100 {
            log::warn!(
                "max_cloud_cover {} out of range, clamping to 100",
                self.max_cloud_cover
            );
            self.max_cloud_cover = 100;
        }
        if !(0.0..=1.0).contains(&self.ndvi_min) {
            log::warn!("ndvi_min {} out of range, clamping", self.ndvi_min);
            self.ndvi_min = if self.ndvi_min.is_nan() {
                default_ndvi_min()
            } else {
                self.ndvi_min.clamp(0.0, 1.0)
            };
        }
        self
    }

    /// Engine inputs for the map view
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            layers: self.layers.clone(),
            interactive: self.interactive,
            relayout_delay: Duration::from_millis(self.relayout_delay_ms),
        }
    }
}

/// Command line settings that apply to one run and are never saved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionOverrides {
    /// Replaces the saved layer selection for this run
    pub layers: Option<LayerSelection>,

    /// Disables pan and zoom for this run
    pub locked: bool,
}

impl SessionOverrides {
    /// Engine inputs with the overrides applied on top of `config`
    pub fn engine_config(&self, config: &AppConfig) -> EngineConfig {
        let mut engine = config.engine_config();
        if let Some(layers) = &self.layers {
            engine.layers = layers.clone();
        }
        if self.locked {
            engine.interactive = false;
        }
        engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.layers.labels(), ["Sentinel-2 RGB"]);
        assert!(config.interactive);
        assert_eq!(config.max_cloud_cover, 12);
    }

    #[test]
    fn test_layers_serialize_as_plain_list() {
        let config = AppConfig {
            layers: LayerSelection::dashboard(),
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value["layers"],
            serde_json::json!(["Sentinel-2 RGB", "NDVI Heatmap"])
        );
    }

    #[test]
    fn test_sanitized_clamps_filters() {
        let config = AppConfig {
            max_cloud_cover: 250,
            ndvi_min: 1.7,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.max_cloud_cover, 100);
        assert_eq!(config.ndvi_min, 1.0);
    }

    #[test]
    fn test_engine_config() {
        let config = AppConfig {
            interactive: false,
            relayout_delay_ms: 250,
            ..Default::default()
        };
        let engine = config.engine_config();
        assert!(!engine.interactive);
        assert_eq!(engine.relayout_delay, Duration::from_millis(250));
        assert_eq!(engine.layers, config.layers);
    }

    #[test]
    fn test_session_overrides() {
        let config = AppConfig::default();
        let overrides = SessionOverrides {
            layers: Some(LayerSelection::dashboard()),
            locked: true,
        };
        let engine = overrides.engine_config(&config);
        assert_eq!(engine.layers, LayerSelection::dashboard());
        assert!(!engine.interactive);

        // Saved values are untouched
        assert_eq!(config.layers, LayerSelection::explorer_default());
        assert!(config.interactive);
    }

    #[test]
    fn test_no_overrides_match_config() {
        let config = AppConfig {
            interactive: false,
            ..Default::default()
        };
        let engine = SessionOverrides::default().engine_config(&config);
        assert_eq!(engine.layers, config.layers);
        assert!(!engine.interactive);
    }

    #[test]
    fn test_save_and_load_path() {
        let dir = std::env::temp_dir().join(format!("bloomwatch-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let config = AppConfig {
            layers: LayerSelection::dashboard(),
            max_cloud_cover: 40,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_region_describe() {
        assert_eq!(
            RegionConfig::default().describe(),
            "Po Delta (Lat: 45.44, Lon: 12.33)"
        );
    }
}
