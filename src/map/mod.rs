//! Map widget and bloom overlay rendering.
//!
//! This module adapts the walkers slippy map to the layer engine's
//! `MapSurface` trait and draws overlay shapes on top of the tiles.

pub mod overlay;
pub mod surface;

pub use overlay::BloomOverlay;
pub use surface::EguiSurface;
