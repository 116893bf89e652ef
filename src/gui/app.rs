//! Height Viewer Main Application
//! Main window with control panel and chart view.

use crate::charts::{build_chart, ChartOutcome, StaticChartRenderer};
use crate::data::HeightDataset;
use crate::gui::{ChartView, ControlAction, ControlPanel};
use egui::SidePanel;

/// Input file, read once at startup from the working directory.
const DATA_FILE: &str = "height.csv";

/// Pixel size of exported chart images.
const EXPORT_WIDTH: u32 = 1200;
const EXPORT_HEIGHT: u32 = 800;

/// Main application window.
pub struct HeightChartApp {
    dataset: HeightDataset,
    control_panel: ControlPanel,
    chart_view: ChartView,
}

impl HeightChartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let dataset = HeightDataset::load_or_empty(DATA_FILE);

        let mut control_panel = ControlPanel::with_years(dataset.years());
        if dataset.is_empty() {
            control_panel.set_status("No dataset loaded, charts will be empty");
        } else {
            if !dataset.has_standard_error() {
                tracing::info!("standard error column absent, error bars disabled");
            }
            control_panel.set_status(&format!(
                "Loaded {} rows from {}",
                dataset.row_count(),
                DATA_FILE
            ));
        }

        let mut app = Self {
            dataset,
            control_panel,
            chart_view: ChartView::new(),
        };
        app.refresh_chart();
        app
    }

    /// Recompute the chart for the current selection. On failure the
    /// previous chart stays visible.
    fn refresh_chart(&mut self) {
        match build_chart(&self.dataset, self.control_panel.selection) {
            Ok(outcome) => {
                self.control_panel.export_enabled = matches!(outcome, ChartOutcome::Chart(_));
                self.chart_view.set_outcome(outcome);
            }
            Err(e) => {
                tracing::error!("chart update failed: {e}");
            }
        }
    }

    /// Render the current chart to PNG, save it, and open it with the
    /// system default viewer.
    fn handle_export_chart(&mut self) {
        let Some(spec) = self.chart_view.spec() else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        // Ask user for output location
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("height_chart.png")
            .save_file()
        else {
            return; // User cancelled
        };

        let result = StaticChartRenderer::render_png_bytes(spec, EXPORT_WIDTH, EXPORT_HEIGHT)
            .and_then(|png| std::fs::write(&path, png).map_err(Into::into));

        match result {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Chart exported to {}", path.display()));
                if let Err(e) = open::that(&path) {
                    tracing::warn!("failed to open exported chart: {e}");
                }
            }
            Err(e) => {
                tracing::error!("chart export failed: {e}");
                self.control_panel.set_status(&format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for HeightChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(230.0)
            .max_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlAction::FilterChanged => self.refresh_chart(),
                        ControlAction::ExportChart => self.handle_export_chart(),
                        ControlAction::None => {}
                    }
                });
            });

        // Central panel - Chart View
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_view.show(ui);
        });
    }
}
