use egui::{Grid, RichText, Ui};

use crate::model::Model;

pub fn render_info(model: &mut Model, ui: &mut Ui) {
    let Some(report) = &model.report else {
        ui.label("No gesture state received (yet)");
        return;
    };

    ui.heading(RichText::new(&report.label).size(24.0));
    ui.separator();

    Grid::new("readout_grid").show(ui, |ui| {
        ui.label("Left delta:");
        ui.label(format!("{}", report.readout.delta_left));
        ui.end_row();

        ui.label("Right delta:");
        ui.label(format!("{}", report.readout.delta_right));
        ui.end_row();

        ui.label("Sum:");
        ui.label(format!("{}", report.readout.sum));
        ui.end_row();

        ui.label("Drag-lock:");
        ui.label(if report.drag_lock { "on" } else { "off" });
        ui.end_row();
    });

    ui.separator();

    Grid::new("joints_grid").show(ui, |ui| {
        let joints = &report.joints;
        for (name, p) in [
            ("Head", &joints.head),
            ("Right hand", &joints.hand_right),
            ("Left hand", &joints.hand_left),
        ] {
            ui.label(name);
            ui.label(format!("{:.0},{:.0}", p.x, p.y));
            ui.label(format!("{}", p.depth));
            ui.label(if p.is_valid { "" } else { "lost" });
            ui.end_row();
        }
    });
}
