//! Chart Plotter Module
//! Draws the interactive grouped bar chart using egui_plot.

use crate::charts::builder::{ChartSpec, BAR_WIDTH, LABEL_GAP};
use crate::data::Sex;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Corner, GridMark, Legend, Line, Plot, PlotBounds, PlotPoint, PlotPoints, Text};

/// Series colors
pub const BOYS_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
pub const GIRLS_COLOR: Color32 = Color32::from_rgb(255, 127, 14);
const ERROR_BAR_COLOR: Color32 = Color32::from_rgb(90, 90, 90);

/// Half-width of an error-bar cap in category-axis units.
const ERROR_CAP: f64 = 0.06;

/// Draws the grouped bar chart described by a [`ChartSpec`].
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn series_color(sex: Sex) -> Color32 {
        match sex {
            Sex::Boys => BOYS_COLOR,
            Sex::Girls => GIRLS_COLOR,
        }
    }

    /// Draw the chart, filling the available height.
    pub fn draw_bar_chart(ui: &mut egui::Ui, spec: &ChartSpec) {
        let x_labels = spec.age_groups.clone();
        let group_count = spec.age_groups.len();

        Plot::new("height_bars")
            .height(ui.available_height())
            .legend(Legend::default().position(Corner::LeftTop))
            .x_axis_label("Age group")
            .y_axis_label("Mean height (cm)")
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            // One grid mark per age group
            .x_grid_spacer(move |_input| {
                (0..group_count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [-0.6, spec.y_min],
                    [group_count as f64 - 0.4, spec.y_max],
                ));

                for series in &spec.series {
                    let color = Self::series_color(series.sex);
                    let bars: Vec<Bar> = series
                        .bars
                        .iter()
                        .map(|bar| Bar::new(bar.x, bar.mean_height).width(BAR_WIDTH))
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).color(color).name(series.sex.label()));

                    for bar in &series.bars {
                        if let Some(se) = bar.standard_error {
                            Self::draw_error_bar(plot_ui, bar.x, bar.mean_height, se);
                        }
                        plot_ui.text(Text::new(
                            PlotPoint::new(bar.x, bar.mean_height + LABEL_GAP),
                            RichText::new(&bar.label).size(10.0),
                        ));
                    }
                }
            });
    }

    /// Vertical whisker plus caps at mean +/- standard error.
    fn draw_error_bar(plot_ui: &mut egui_plot::PlotUi, x: f64, mean: f64, se: f64) {
        let lo = mean - se;
        let hi = mean + se;

        plot_ui.line(
            Line::new(PlotPoints::from(vec![[x, lo], [x, hi]]))
                .color(ERROR_BAR_COLOR)
                .width(1.5),
        );
        for y in [lo, hi] {
            plot_ui.line(
                Line::new(PlotPoints::from(vec![[x - ERROR_CAP, y], [x + ERROR_CAP, y]]))
                    .color(ERROR_BAR_COLOR)
                    .width(1.5),
            );
        }
    }
}
