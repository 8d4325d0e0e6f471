use egui::{
    Color32, Ui,
    plot::{HLine, Legend, Line, Plot, PlotPoints},
};
use tether_gesture_control::systems::gesture::GestureReadout;

use crate::model::Model;

pub fn render_readout_graph(model: &mut Model, ui: &mut Ui) {
    let plot = Plot::new("readout")
        .height(240.)
        .legend(Legend::default())
        .include_y(0.)
        .include_y(10000.);

    let line_of = |f: fn(&GestureReadout) -> i32| {
        PlotPoints::new(
            model
                .readout_history
                .iter()
                .enumerate()
                .map(|(i, r)| [i as f64, f(r) as f64])
                .collect(),
        )
    };

    plot.show(ui, |plot_ui| {
        plot_ui.line(Line::new(line_of(|r| r.delta_left)).name("Left hand"));
        plot_ui.line(Line::new(line_of(|r| r.delta_right)).name("Right hand"));
        plot_ui.line(Line::new(line_of(|r| r.sum)).name("Sum"));

        if let Some(config) = &model.backend_config {
            plot_ui.hline(
                HLine::new(config.depth_thresh_one)
                    .color(Color32::LIGHT_GREEN)
                    .name("One hand"),
            );
            plot_ui.hline(
                HLine::new(config.depth_thresh_two)
                    .color(Color32::LIGHT_RED)
                    .name("Two hands"),
            );
        }
    });
}
