//! Control Panel Widget
//! Left side panel with the three categorical filters and a status line.

use egui::{Color32, ComboBox, RichText};

use crate::data::FilterSelection;

/// Sentinel shown for an unconstrained dimension.
const ALL_LABEL: &str = "All";

/// Left side panel holding the current filter selection and the
/// selectable values derived from the loaded dataset.
pub struct ControlPanel {
    pub selection: FilterSelection,
    industries: Vec<String>,
    countries: Vec<String>,
    company_sizes: Vec<String>,
    status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selection: FilterSelection::default(),
            industries: Vec::new(),
            countries: Vec::new(),
            company_sizes: Vec::new(),
            status: "Fetching dataset...".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the selectable values after the dataset is loaded.
    pub fn update_options(
        &mut self,
        industries: Vec<String>,
        countries: Vec<String>,
        company_sizes: Vec<String>,
    ) {
        self.industries = industries;
        self.countries = countries;
        self.company_sizes = company_sizes;
    }

    /// Set the status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Draw the control panel.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Solvency Dashboard")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Financial ratio analysis")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(RichText::new("🔍 Filters").size(14.0).strong());
        ui.add_space(8.0);

        let mut changed = false;
        changed |= Self::category_combo(
            ui,
            "industry",
            "Industry:",
            &self.industries,
            &mut self.selection.industry,
        );
        ui.add_space(5.0);
        changed |= Self::category_combo(
            ui,
            "country",
            "Country:",
            &self.countries,
            &mut self.selection.country,
        );
        ui.add_space(5.0);
        changed |= Self::category_combo(
            ui,
            "company_size",
            "Company Size:",
            &self.company_sizes,
            &mut self.selection.company_size,
        );

        if changed {
            action = ControlPanelAction::FilterChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// One combo box for a filter dimension; returns true when the
    /// selection changed this frame.
    fn category_combo(
        ui: &mut egui::Ui,
        id: &str,
        label: &str,
        options: &[String],
        selection: &mut Option<String>,
    ) -> bool {
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.add_sized([100.0, 20.0], egui::Label::new(label));
            ComboBox::from_id_salt(id)
                .width(150.0)
                .selected_text(selection.as_deref().unwrap_or(ALL_LABEL).to_string())
                .show_ui(ui, |ui| {
                    if ui.selectable_label(selection.is_none(), ALL_LABEL).clicked()
                        && selection.is_some()
                    {
                        *selection = None;
                        changed = true;
                    }
                    for value in options {
                        let selected = selection.as_deref() == Some(value.as_str());
                        if ui.selectable_label(selected, value).clicked() && !selected {
                            *selection = Some(value.clone());
                            changed = true;
                        }
                    }
                });
        });

        changed
    }
}

/// Actions triggered by the control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    FilterChanged,
}
