//! Height Viewer - Child Height Statistics CSV Viewer
//!
//! A Rust application that loads a CSV of historical child-height statistics
//! and displays a grouped bar chart of mean height by age group, filterable
//! by sex and year.

mod charts;
mod data;
mod gui;

use eframe::egui;
use gui::HeightChartApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    // Log sink; filter via RUST_LOG, "info" otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([760.0, 560.0])
            .with_title("Height Viewer"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Height Viewer",
        options,
        Box::new(|cc| Ok(Box::new(HeightChartApp::new(cc)))),
    )
}
