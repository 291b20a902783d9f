use egui::Color32;
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::plot::{marker_radius, Figure, Series, DEFAULT_DPI};

const SERIES_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
const LINE_WIDTH: f32 = 1.5;

/// Lays out `figure` as an interactive plot filling the remaining space of `ui`
pub fn show_figure(ui: &mut egui::Ui, figure: &Figure) {
    let name = figure.title.as_str();

    Plot::new(name)
        .x_axis_label(figure.x_label.as_str())
        .y_axis_label(figure.y_label.as_str())
        .show(ui, |plot_ui| {
            let points = PlotPoints::new(figure.series.plot_points());
            match &figure.series {
                Series::Scatter { marker_size, .. } => plot_ui.points(
                    Points::new(name, points)
                        .radius(marker_radius(*marker_size, DEFAULT_DPI))
                        .color(SERIES_COLOR),
                ),
                Series::Line { .. } => plot_ui.line(
                    Line::new(name, points)
                        .width(LINE_WIDTH)
                        .color(SERIES_COLOR),
                ),
            }
        });
}
