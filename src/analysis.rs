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

//! Region analysis requests built from the map explorer.

use bloom_layers::LayerSelection;
use std::fmt;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::RegionConfig;

/// Where an analysis request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Map,
}

/// Preview image attached to map region requests
pub const MAP_PREVIEW_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1559827291-72ee739d0d9a?auto=format&fit=crop&q=80&w=1200";

/// How far a detection can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Detection summary for the analysed region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetrics {
    /// Model accuracy in percent
    pub accuracy: f32,
    /// Affected area, with unit
    pub area: String,
    pub confidence: Confidence,
}

impl AnalysisMetrics {
    /// Estimate reported for a region picked on the map
    pub fn map_estimate() -> Self {
        Self {
            accuracy: 89.4,
            area: "38.2 km²".to_string(),
            confidence: Confidence::High,
        }
    }
}

impl fmt::Display for AnalysisMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Accuracy {:.1}% | {} | {} confidence",
            self.accuracy, self.area, self.confidence
        )
    }
}

/// Snapshot of the explorer state handed off for analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub id: Uuid,
    pub source: AnalysisSource,
    pub image_url: String,
    pub region_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub layers: LayerSelection,
    pub max_cloud_cover: u8,
    pub ndvi_min: f32,
    pub metrics: AnalysisMetrics,
    /// Local calendar date of the request
    pub date: NaiveDate,
    pub requested_at: DateTime<Utc>,
}

impl AnalysisRequest {
    /// Build a request for the selected map region
    pub fn from_map(
        region: &RegionConfig,
        layers: &LayerSelection,
        max_cloud_cover: u8,
        ndvi_min: f32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: AnalysisSource::Map,
            image_url: MAP_PREVIEW_IMAGE_URL.to_string(),
            region_name: region.describe(),
            latitude: region.latitude,
            longitude: region.longitude,
            layers: layers.clone(),
            max_cloud_cover,
            ndvi_min,
            metrics: AnalysisMetrics::map_estimate(),
            date: Local::now().date_naive(),
            requested_at: Utc::now(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_map() {
        let region = RegionConfig::default();
        let layers = LayerSelection::explorer_default();
        let request = AnalysisRequest::from_map(&region, &layers, 12, 0.4);

        assert_eq!(request.source, AnalysisSource::Map);
        assert_eq!(request.region_name, "Po Delta (Lat: 45.44, Lon: 12.33)");
        assert_eq!((request.latitude, request.longitude), (45.44, 12.33));
        assert_eq!(request.layers, layers);
        assert_eq!(request.metrics, AnalysisMetrics::map_estimate());
        assert_eq!(request.image_url, MAP_PREVIEW_IMAGE_URL);
    }

    #[test]
    fn test_each_request_gets_new_id() {
        let region = RegionConfig::default();
        let layers = LayerSelection::new();
        let a = AnalysisRequest::from_map(&region, &layers, 0, 0.0);
        let b = AnalysisRequest::from_map(&region, &layers, 0, 0.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_json_shape() {
        let request = AnalysisRequest::from_map(
            &RegionConfig::default(),
            &LayerSelection::dashboard(),
            30,
            0.5,
        );
        let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(value["source"], "map");
        assert_eq!(value["layers"][1], "NDVI Heatmap");
        assert_eq!(value["max_cloud_cover"], 30);
        assert_eq!(value["metrics"]["area"], "38.2 km²");
        assert_eq!(value["metrics"]["confidence"], "High");
        assert!((value["metrics"]["accuracy"].as_f64().unwrap() - 89.4).abs() < 1e-4);
        assert!(value["image_url"].as_str().unwrap().starts_with("https://"));
        assert_eq!(value["date"], request.date.format("%Y-%m-%d").to_string());
    }

    #[test]
    fn test_metrics_display() {
        assert_eq!(
            AnalysisMetrics::map_estimate().to_string(),
            "Accuracy 89.4% | 38.2 km² | High confidence"
        );
    }
}
