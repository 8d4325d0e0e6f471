use egui::{Color32, Sense, Ui, vec2};

use crate::model::Model;

const MARKER_RADIUS: f32 = 12.0;
const DISPLAY_SCALE: f32 = 2.0;

pub fn render_video(model: &mut Model, ui: &mut Ui) {
    ui.checkbox(&mut model.show_raw_video, "Show raw colour video");

    let texture = if model.show_raw_video {
        &model.colour_texture
    } else {
        &model.depth_texture
    };

    match texture {
        Some(texture) => {
            ui.image(texture, texture.size_vec2() * DISPLAY_SCALE);
        }
        None => {
            ui.label("No frames received (yet)");
        }
    }

    // Hand indicators: lit while the matching key (or both, for a drag) is active
    let markers = model.report.as_ref().map(|r| r.markers).unwrap_or_default();
    ui.horizontal(|ui| {
        for (name, lit) in [("Left", markers.left), ("Right", markers.right)] {
            let (rect, _) = ui.allocate_exact_size(vec2(MARKER_RADIUS * 2., MARKER_RADIUS * 2.), Sense::hover());
            let colour = if lit {
                Color32::from_rgb(255, 69, 0)
            } else {
                Color32::DARK_GRAY
            };
            ui.painter().circle_filled(rect.center(), MARKER_RADIUS, colour);
            ui.label(name);
        }
    });
}
