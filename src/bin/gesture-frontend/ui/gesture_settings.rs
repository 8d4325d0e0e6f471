use egui::{Color32, RichText, Slider, Ui};
use log::{info, warn};

use crate::model::Model;

pub fn render_gesture_settings(model: &mut Model, ui: &mut Ui) {
    ui.heading("Camera");
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label("Elevation");
            for (text, direction) in [("▲", 1i8), ("▼", -1i8)] {
                if ui.button(text).clicked() {
                    if let Err(e) = model
                        .tether_agent
                        .encode_and_publish(&model.outputs.adjust_elevation, direction)
                    {
                        warn!("Failed to request elevation change: {}", e);
                    }
                }
            }
        });

        let mut drag_lock = model.report.as_ref().is_some_and(|r| r.drag_lock);
        if ui.checkbox(&mut drag_lock, "Drag-lock").clicked() {
            info!("Set drag-lock {}", drag_lock);
            if let Err(e) = model
                .tether_agent
                .encode_and_publish(&model.outputs.drag_lock, drag_lock)
            {
                warn!("Failed to publish drag-lock: {}", e);
            }
        }
    });

    ui.heading("Gesture Configuration");
    ui.group(|ui| match &mut model.backend_config {
        None => {
            ui.label("No config received (yet)");
        }
        Some(config) => {
            ui.horizontal(|ui| {
                ui.label("One-hand threshold");
                if ui
                    .add(Slider::new(&mut config.depth_thresh_one, 500..=10000))
                    .changed()
                {
                    model.is_editing = true;
                };
            });
            ui.horizontal(|ui| {
                ui.label("Two-hand threshold");
                if ui
                    .add(Slider::new(&mut config.depth_thresh_two, 1000..=20000))
                    .changed()
                {
                    model.is_editing = true;
                };
            });
            ui.horizontal(|ui| {
                ui.label("Drag scale");
                if ui
                    .add(Slider::new(&mut config.drag_scale, 1..=32))
                    .changed()
                {
                    model.is_editing = true;
                };
            });
            ui.horizontal(|ui| {
                ui.label("Settle delay offset (ms)");
                if ui
                    .add(Slider::new(&mut config.settle_delay_offset_ms, 0..=500))
                    .changed()
                {
                    model.is_editing = true;
                };
            });

            if let Err(e) = config.validate() {
                ui.label(RichText::new(e.to_string()).color(Color32::LIGHT_RED));
            }

            ui.separator();

            // The backend re-saves the config file and republishes it on "provideGestureConfig"
            if model.is_editing
                && ui
                    .button(
                        RichText::new("Save 🖴")
                            .color(Color32::LIGHT_GREEN)
                            .size(16.0),
                    )
                    .clicked()
            {
                model.is_editing = false;
                if let Err(e) = model
                    .tether_agent
                    .encode_and_publish(&model.outputs.save_config, &*config)
                {
                    warn!("Failed to publish config: {}", e);
                }
            }
        }
    });
}
