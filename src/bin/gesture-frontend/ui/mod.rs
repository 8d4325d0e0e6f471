mod gesture_settings;
mod info;
mod readout_graph;
mod video;

use gesture_settings::render_gesture_settings;
use info::render_info;
use readout_graph::render_readout_graph;
use video::render_video;

use crate::model::Model;

pub const SPACING_AMOUNT: f32 = 16.0;

pub fn render_ui(ctx: &egui::Context, model: &mut Model) {
    egui::SidePanel::left("config").show(ctx, |ui| {
        ui.add_space(SPACING_AMOUNT);
        render_gesture_settings(model, ui);
    });

    egui::SidePanel::right("stats").show(ctx, |ui| {
        render_info(model, ui);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(if model.show_raw_video {
            "Colour Video"
        } else {
            "Depth"
        });
        render_video(model, ui);

        ui.heading("Depth Readout");
        render_readout_graph(model, ui);
    });
}
