//! UI components for BloomWatch Desktop.
//!
//! This module contains the explorer side panel and the chrome drawn over the map.

pub mod layer_panel;
pub mod map_controls;

pub use layer_panel::{LayerPanel, PanelAction};
pub use map_controls::{MapAction, MapChrome};
