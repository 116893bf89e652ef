//! Static Chart Renderer
//! Renders the chart description to an in-memory PNG for export.
//!
//! Layout matches the on-screen chart: title, grouped bars per sex with
//! error bars and value labels, legend upper-left, y grid only.

use crate::charts::builder::{ChartSpec, BAR_WIDTH, LABEL_GAP};
use crate::data::Sex;
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use std::error::Error;
use std::io::Cursor;

const BOYS_COLOR: RGBColor = RGBColor(31, 119, 180);
const GIRLS_COLOR: RGBColor = RGBColor(255, 127, 14);

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart to PNG bytes at the given pixel size.
    pub fn render_png_bytes(
        spec: &ChartSpec,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, Box<dyn Error>> {
        let mut buffer = vec![0u8; (width * height * 3) as usize];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;

            let group_count = spec.age_groups.len();
            let labels = spec.age_groups.clone();

            let mut chart = ChartBuilder::on(&root)
                .caption(&spec.title, ("sans-serif", 22))
                .margin(14)
                .x_label_area_size(42)
                .y_label_area_size(54)
                .build_cartesian_2d(-0.6f64..(group_count as f64 - 0.4), spec.y_min..spec.y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(group_count)
                .x_label_formatter(&|x| {
                    let idx = x.round();
                    if (x - idx).abs() < 0.3 && idx >= 0.0 && (idx as usize) < labels.len() {
                        labels[idx as usize].clone()
                    } else {
                        String::new()
                    }
                })
                .x_desc("Age group")
                .y_desc("Mean height (cm)")
                .draw()?;

            for series in &spec.series {
                let color = match series.sex {
                    Sex::Boys => BOYS_COLOR,
                    Sex::Girls => GIRLS_COLOR,
                };
                let half = BAR_WIDTH / 2.0;
                let floor = spec.y_min;

                chart
                    .draw_series(series.bars.iter().map(|bar| {
                        Rectangle::new(
                            [(bar.x - half, floor), (bar.x + half, bar.mean_height)],
                            color.mix(0.85).filled(),
                        )
                    }))?
                    .label(series.sex.label())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                    });

                chart.draw_series(series.bars.iter().filter_map(|bar| {
                    bar.standard_error.map(|se| {
                        ErrorBar::new_vertical(
                            bar.x,
                            bar.mean_height - se,
                            bar.mean_height,
                            bar.mean_height + se,
                            BLACK.filled(),
                            6,
                        )
                    })
                }))?;

                chart.draw_series(series.bars.iter().map(|bar| {
                    Text::new(
                        bar.label.clone(),
                        (bar.x, bar.mean_height + LABEL_GAP),
                        ("sans-serif", 13),
                    )
                }))?;
            }

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .border_style(BLACK)
                .background_style(WHITE.mix(0.8))
                .draw()?;

            root.present()?;
        }

        let img = RgbImage::from_raw(width, height, buffer)
            .ok_or("chart buffer did not match the requested image size")?;
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }
}
