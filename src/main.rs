mod analysis;
mod app;
mod config;
mod map;
mod tiles;
mod ui;

use std::time::Instant;

use bloom_layers::{
    HeadlessSurface, HudState, LayerEngine, LayerKind, LayerSelection, SurfaceOptions,
};
use clap::{Parser, ValueEnum};
use eframe::egui;
use log::{error, info, warn};
use serde_json::json;

use app::BloomWatchApp;
use config::{AppConfig, SessionOverrides};

/// Starting layer selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// Sentinel-2 RGB only, as shown in the explorer
    Explorer,
    /// Sentinel-2 RGB with the NDVI heatmap, as shown on the dashboard
    Dashboard,
}

impl Preset {
    fn layers(self) -> LayerSelection {
        match self {
            Self::Explorer => LayerSelection::explorer_default(),
            Self::Dashboard => LayerSelection::dashboard(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bloomwatch-desktop", version, about = "Satellite bloom monitoring map")]
struct Args {
    /// Start from a preset layer selection
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Layer to enable (sentinel, landsat, sar, mask, ndvi); repeatable
    #[arg(long = "layer", value_name = "LAYER")]
    layers: Vec<LayerKind>,

    /// Free-text layer label; repeatable
    #[arg(long = "label", value_name = "TEXT")]
    labels: Vec<String>,

    /// Disable panning and zooming
    #[arg(long)]
    locked: bool,

    /// Do not write changes back to the config file
    #[arg(long)]
    no_save: bool,

    /// Print the resolved map state as JSON and exit
    #[arg(long)]
    headless: bool,
}

impl Args {
    /// Session-only overrides; the saved config is left alone
    fn overrides(&self) -> SessionOverrides {
        let mut layers = self.preset.map(Preset::layers);
        if !self.layers.is_empty() || !self.labels.is_empty() {
            let mut selection = LayerSelection::from_kinds(&self.layers);
            selection.extend(self.labels.iter().cloned());
            layers = Some(selection);
        }

        SessionOverrides {
            layers,
            locked: self.locked,
        }
    }
}

/// Map state a mounted engine would render for `config` with `overrides`
fn headless_snapshot(config: &AppConfig, overrides: &SessionOverrides) -> serde_json::Value {
    let engine_config = overrides.engine_config(config);
    let relayout_delay = engine_config.relayout_delay;
    let mut engine = LayerEngine::new(engine_config);
    let now = Instant::now();
    engine.mount(HeadlessSurface::new(SurfaceOptions::default()), now);
    engine.poll(now + relayout_delay);

    let overlay: Vec<_> = engine
        .overlay()
        .iter()
        .map(|marker| {
            json!({
                "name": marker.name,
                "lat": marker.lat,
                "lon": marker.lon,
                "color": marker.color.to_string(),
                "intensity": marker.intensity,
            })
        })
        .collect();

    let mut snapshot = json!({
        "layers": engine.layers(),
        "tile_source": engine.tile_source(),
        "overlay": overlay,
        "hud": HudState::from_selection(engine.layers()).footer_text(),
    });

    if let Some(surface) = engine.surface() {
        let interaction = surface.interaction();
        snapshot["tile_url"] = json!(surface.tile_layer().map(|p| p.url_template));
        snapshot["shapes"] = json!(surface.shapes().len());
        snapshot["zoom"] = json!(surface.zoom());
        snapshot["interaction"] = json!({
            "dragging": interaction.dragging,
            "scroll_zoom": interaction.scroll_zoom,
            "double_click_zoom": interaction.double_click_zoom,
        });
    }
    snapshot
}

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load configuration, using defaults: {e}");
        AppConfig::default()
    });
    let overrides = args.overrides();

    if args.headless {
        match serde_json::to_string_pretty(&headless_snapshot(&config, &overrides)) {
            Ok(json) => println!("{json}"),
            Err(e) => error!("Failed to serialize map state: {e}"),
        }
        return Ok(());
    }

    let config_path = if args.no_save {
        None
    } else {
        match AppConfig::get_config_path() {
            Ok(path) => {
                info!("Using config file {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("Config path unavailable, changes will not be saved: {e}");
                None
            }
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([900.0, 500.0])
            .with_title("BloomWatch Desktop"),
        ..Default::default()
    };

    eframe::run_native(
        "BloomWatch Desktop",
        options,
        Box::new(move |cc| Ok(Box::new(BloomWatchApp::new(&cc.egui_ctx, config, overrides, config_path)))),
    )
}
