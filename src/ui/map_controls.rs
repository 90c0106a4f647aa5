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

//! Chrome drawn over the map: grid, zoom buttons, active layer list,
//! live feed footer, acquisition badge and tile attribution.

use bloom_layers::hud::{EMPTY_SELECTION_TEXT, GRID_CELL_SIZE};
use bloom_layers::{HudState, LayerSelection, TileProvider};
use chrono::{DateTime, Utc};
use eframe::egui;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(61, 255, 138);

/// Something the user clicked on the map chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapAction {
    ZoomIn,
    ZoomOut,
    OpenAttribution(&'static str),
}

/// Everything the chrome needs for one frame
#[derive(Debug)]
pub struct MapChrome<'a> {
    pub hud: &'a HudState,
    pub layers: &'a LayerSelection,
    pub interactive: bool,
    pub provider: Option<&'static TileProvider>,
    pub acquisition_time: DateTime<Utc>,
}

/// Frame used for every floating panel
fn glass_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(10, 20, 35, 210))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_white_alpha(25)))
        .corner_radius(6.0)
        .inner_margin(egui::Margin::same(8))
}

/// Vertical and horizontal grid line segments covering `rect`
pub fn grid_lines(rect: egui::Rect, cell: f32) -> Vec<[egui::Pos2; 2]> {
    let mut lines = Vec::new();
    if cell <= 0.0 {
        return lines;
    }

    let mut x = rect.left();
    while x <= rect.right() {
        lines.push([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())]);
        x += cell;
    }
    let mut y = rect.top();
    while y <= rect.bottom() {
        lines.push([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)]);
        y += cell;
    }
    lines
}

/// Date and time halves of the acquisition badge
pub fn format_acquisition(time: DateTime<Utc>) -> (String, String) {
    (
        time.format("%Y-%m-%d").to_string(),
        time.format("%H:%M UTC").to_string(),
    )
}

/// Draw the chrome over `rect` and report what was clicked
pub fn render(ui: &egui::Ui, rect: egui::Rect, chrome: &MapChrome<'_>) -> Option<MapAction> {
    let mut action = None;

    if chrome.hud.grid_visible {
        let painter = ui.painter().with_clip_rect(rect);
        let stroke = egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(61, 255, 138, 6));
        for line in grid_lines(rect, GRID_CELL_SIZE) {
            painter.line_segment(line, stroke);
        }
    }

    let ctx = ui.ctx().clone();

    if chrome.interactive {
        egui::Area::new(egui::Id::new("map_zoom_controls"))
            .fixed_pos(rect.right_top() + egui::vec2(-176.0, 16.0))
            .order(egui::Order::Foreground)
            .show(&ctx, |ui| {
                glass_frame().show(ui, |ui| {
                    ui.set_width(160.0);
                    ui.horizontal(|ui| {
                        if ui.button(egui::RichText::new("+").size(16.0)).on_hover_text("Zoom in").clicked() {
                            action = Some(MapAction::ZoomIn);
                        }
                        if ui.button(egui::RichText::new("-").size(16.0)).on_hover_text("Zoom out").clicked() {
                            action = Some(MapAction::ZoomOut);
                        }
                    });

                    ui.add_space(6.0);
                    ui.label(
                        egui::RichText::new("ACTIVE LAYERS")
                            .color(egui::Color32::from_rgb(150, 150, 150))
                            .size(9.0)
                            .strong(),
                    );

                    if chrome.layers.is_empty() {
                        ui.label(
                            egui::RichText::new(EMPTY_SELECTION_TEXT)
                                .color(egui::Color32::GRAY)
                                .size(10.0)
                                .italics(),
                        );
                    } else {
                        for label in chrome.layers.labels() {
                            ui.label(egui::RichText::new(format!("● {label}")).color(ACCENT).size(10.0));
                        }
                    }
                });
            });
    }

    // Live feed footer
    egui::Area::new(egui::Id::new("map_feed_footer"))
        .fixed_pos(rect.left_bottom() + egui::vec2(16.0, -44.0))
        .order(egui::Order::Foreground)
        .show(&ctx, |ui| {
            glass_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    let icon_color = if chrome.hud.feed_pulsing {
                        let t = ui.input(|i| i.time);
                        ctx.request_repaint();
                        pulse(ACCENT, t)
                    } else {
                        ACCENT
                    };
                    ui.label(egui::RichText::new("◉").color(icon_color).size(11.0));
                    ui.label(
                        egui::RichText::new(chrome.hud.footer_text())
                            .color(ACCENT)
                            .size(10.0)
                            .monospace(),
                    );
                });
            });
        });

    // Acquisition badge and attribution
    egui::Area::new(egui::Id::new("map_acquisition_badge"))
        .fixed_pos(rect.right_bottom() + egui::vec2(-236.0, -70.0))
        .order(egui::Order::Foreground)
        .show(&ctx, |ui| {
            glass_frame().show(ui, |ui| {
                let (date, time) = format_acquisition(chrome.acquisition_time);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("📅").color(ACCENT));
                    ui.label(egui::RichText::new(date).color(egui::Color32::WHITE).monospace());
                    ui.separator();
                    ui.label(egui::RichText::new(time).color(egui::Color32::GRAY).monospace());
                });
            });

            if let Some(provider) = chrome.provider {
                let link = ui.add(
                    egui::Label::new(
                        egui::RichText::new(provider.attribution)
                            .color(egui::Color32::from_white_alpha(160))
                            .size(9.0),
                    )
                    .sense(egui::Sense::click()),
                );
                if link.on_hover_text(provider.attribution_url).clicked() {
                    action = Some(MapAction::OpenAttribution(provider.attribution_url));
                }
            }
        });

    action
}

/// Fade a color in and out over time
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "value is in 0..=255")]
fn pulse(color: egui::Color32, time: f64) -> egui::Color32 {
    let level = 0.55 + 0.45 * (time * 3.0).sin();
    let alpha = (level.clamp(0.0, 1.0) * 255.0) as u8;
    egui::Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_grid_lines() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(80.0, 40.0));
        let lines = grid_lines(rect, 40.0);
        // x = 0, 40, 80 and y = 0, 40
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], [egui::pos2(40.0, 0.0), egui::pos2(40.0, 40.0)]);
    }

    #[test]
    fn test_grid_lines_zero_cell() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(80.0, 40.0));
        assert!(grid_lines(rect, 0.0).is_empty());
    }

    #[test]
    fn test_format_acquisition() {
        let time = Utc.with_ymd_and_hms(2023, 10, 24, 10, 0, 0).unwrap();
        assert_eq!(
            format_acquisition(time),
            ("2023-10-24".to_string(), "10:00 UTC".to_string())
        );
    }

    #[test]
    fn test_pulse_keeps_rgb() {
        let color = pulse(egui::Color32::from_rgb(61, 255, 138), 0.0);
        assert!(color.a() > 0);
    }
}
