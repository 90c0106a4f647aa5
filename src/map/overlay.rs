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

use bloom_layers::{CircleShape, Rgb};
use eframe::egui;
use walkers::{lat_lon, MapMemory, Plugin, Projector};

/// Convert an engine color and opacity to an egui color
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "opacity is clamped to 0..=1 first")]
pub fn to_color32(color: Rgb, opacity: f32) -> egui::Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}

/// Plugin that draws the bloom overlay shapes in insertion order
pub struct BloomOverlay<'a> {
    shapes: &'a [CircleShape],
}

impl<'a> BloomOverlay<'a> {
    pub fn new(shapes: &'a [CircleShape]) -> Self {
        Self { shapes }
    }
}

impl std::fmt::Debug for BloomOverlay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloomOverlay")
            .field("shapes", &self.shapes.len())
            .finish()
    }
}

impl Plugin for BloomOverlay<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        let painter = ui.painter().with_clip_rect(response.rect);

        for shape in self.shapes {
            let screen = projector.project(lat_lon(shape.lat, shape.lon)).to_pos2();

            // Skip circles that cannot touch the visible area
            if !response.rect.expand(shape.radius).contains(screen) {
                continue;
            }

            painter.circle_filled(screen, shape.radius, to_color32(shape.fill, shape.fill_opacity));

            if let Some(stroke) = shape.stroke {
                painter.circle_stroke(
                    screen,
                    shape.radius,
                    egui::Stroke::new(stroke.width, to_color32(stroke.color, stroke.opacity)),
                );
            }
        }
    }
}
