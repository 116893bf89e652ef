//! Control Panel Widget
//! Left side panel with the sex radios, year dropdown, export button, and
//! status line.

use crate::charts::{FilterSelection, SexFilter};
use egui::{Color32, ComboBox, RichText};
use std::ops::RangeInclusive;

/// Shown when the dataset carries no years at all.
const FALLBACK_YEARS: RangeInclusive<i32> = 1985..=2019;

/// Actions triggered by the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    None,
    FilterChanged,
    ExportChart,
}

/// Left side control panel with the (sex, year) selection.
pub struct ControlPanel {
    pub selection: FilterSelection,
    pub years: Vec<i32>,
    pub status: String,
    pub export_enabled: bool,
}

impl ControlPanel {
    /// Build the panel from the dataset's distinct years, falling back to a
    /// fixed range when the dataset is empty.
    pub fn with_years(years: Vec<i32>) -> Self {
        let years = if years.is_empty() {
            FALLBACK_YEARS.collect()
        } else {
            years
        };
        let selection = FilterSelection {
            sex: SexFilter::All,
            year: years[0],
        };
        Self {
            selection,
            years,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlAction {
        let mut action = ControlAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Height Viewer")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("China child height statistics")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Filters =====
        ui.label(RichText::new("🔧 Filters").size(14.0).strong());
        ui.add_space(8.0);

        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label("Sex:");
            changed |= ui
                .radio_value(&mut self.selection.sex, SexFilter::All, "All")
                .changed();
            changed |= ui
                .radio_value(&mut self.selection.sex, SexFilter::Boys, "Boys")
                .changed();
            changed |= ui
                .radio_value(&mut self.selection.sex, SexFilter::Girls, "Girls")
                .changed();
        });

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Year:");
            ComboBox::from_id_salt("year")
                .width(100.0)
                .selected_text(self.selection.year.to_string())
                .show_ui(ui, |ui| {
                    for year in &self.years {
                        if ui
                            .selectable_label(self.selection.year == *year, year.to_string())
                            .clicked()
                            && self.selection.year != *year
                        {
                            self.selection.year = *year;
                            changed = true;
                        }
                    }
                });
        });

        if changed {
            action = ControlAction::FilterChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("📄 Export Chart").size(14.0))
                    .min_size(egui::vec2(160.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlAction::ExportChart;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        ui.add_space(10.0);
        ui.label(
            RichText::new("Mean heights of Chinese children aged 5 to 19, 1985 to 2019.\nSource: height.csv")
                .size(10.0)
                .color(Color32::DARK_GRAY),
        );

        action
    }

    /// Set the status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_years_selects_the_first_year() {
        let panel = ControlPanel::with_years(vec![1985, 2000, 2019]);
        assert_eq!(panel.selection.year, 1985);
        assert_eq!(panel.selection.sex, SexFilter::All);
    }

    #[test]
    fn with_years_falls_back_to_fixed_range_when_empty() {
        let panel = ControlPanel::with_years(Vec::new());
        assert_eq!(panel.years.first(), Some(&1985));
        assert_eq!(panel.years.last(), Some(&2019));
        assert_eq!(panel.years.len(), 35);
    }
}
