//! Chart View Widget
//! Central panel displaying the current chart or the no-data placeholder.

use crate::charts::{ChartOutcome, ChartPlotter, ChartSpec};
use egui::RichText;

/// Central chart display area. Holds the outcome of the latest successful
/// chart update; a failed update leaves the previous one visible.
pub struct ChartView {
    outcome: Option<ChartOutcome>,
}

impl Default for ChartView {
    fn default() -> Self {
        Self { outcome: None }
    }
}

impl ChartView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_outcome(&mut self, outcome: ChartOutcome) {
        self.outcome = Some(outcome);
    }

    /// The currently displayed chart, if any.
    pub fn spec(&self) -> Option<&ChartSpec> {
        match &self.outcome {
            Some(ChartOutcome::Chart(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        match &self.outcome {
            None => {}
            Some(ChartOutcome::NoData) => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No data available").size(20.0));
                });
            }
            Some(ChartOutcome::Chart(spec)) => {
                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(&spec.title).size(16.0).strong());
                    });
                    ui.add_space(6.0);
                    ChartPlotter::draw_bar_chart(ui, spec);
                });
            }
        }
    }
}
