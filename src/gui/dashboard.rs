//! Dashboard Widget
//! Central scrollable panel with metrics, charts, the top-10 table and
//! the correlation matrix.

use egui::{Color32, RichText, ScrollArea};

use crate::charts::{ChartPlotter, DashboardData};
use crate::data::columns;

/// Central dashboard area. Renders nothing but a blocking warning when the
/// dataset could not be loaded.
#[derive(Default)]
pub struct DashboardView {
    pub data: Option<DashboardData>,
    pub load_error: Option<String>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the dashboard.
    pub fn show(&self, ui: &mut egui::Ui) {
        if let Some(error) = &self.load_error {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new(format!("⚠ Could not load the dataset: {error}"))
                        .size(16.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            });
            return;
        }

        let Some(data) = &self.data else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Loading dataset...").size(16.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(5.0);
                ui.heading("Financial Analysis Dashboard");
                ui.add_space(10.0);

                Self::draw_metrics(ui, data);

                ui.add_space(15.0);
                Self::section(ui, "Financial Ratio Analysis");

                Self::chart_title(ui, "Current Assets vs Current Liabilities");
                ChartPlotter::draw_scatter_chart(
                    ui,
                    "assets_vs_liabilities",
                    "Current Assets",
                    "Current Liabilities",
                    &data.assets_vs_liabilities,
                );

                Self::chart_title(ui, "Current Ratio vs Debt-to-Equity Ratio");
                ChartPlotter::draw_scatter_chart(
                    ui,
                    "ratio_vs_leverage",
                    "Current Ratio",
                    "Debt-to-Equity Ratio",
                    &data.ratio_vs_leverage,
                );

                Self::chart_title(ui, "Average Interest Coverage Ratio by Industry");
                ChartPlotter::draw_bar_chart(
                    ui,
                    "coverage_by_industry",
                    "Interest Coverage Ratio",
                    &data.coverage_by_industry,
                );

                Self::chart_title(ui, "Average Interest Coverage Ratio by Country");
                ChartPlotter::draw_bar_chart(
                    ui,
                    "coverage_by_country",
                    "Interest Coverage Ratio",
                    &data.coverage_by_country,
                );

                Self::chart_title(ui, "Current Ratio Distribution by Company Size");
                ChartPlotter::draw_box_chart(
                    ui,
                    "current_ratio_by_size",
                    "Current Ratio",
                    &data.current_ratio_by_size,
                );

                Self::chart_title(ui, "Current Ratio Distribution by Country");
                ChartPlotter::draw_box_chart(
                    ui,
                    "current_ratio_by_country",
                    "Current Ratio",
                    &data.current_ratio_by_country,
                );

                ui.add_space(15.0);
                Self::section(ui, "Top 10 Companies by Interest Coverage Ratio");
                ChartPlotter::draw_ranking_table(
                    ui,
                    &ChartPlotter::short_column_name(columns::INTEREST_COVERAGE),
                    &data.top_by_coverage,
                );

                ui.add_space(15.0);
                Self::section(ui, "Correlation Matrix");
                ChartPlotter::draw_correlation_table(ui, &data.correlations);

                ui.add_space(20.0);
            });
    }

    fn draw_metrics(ui: &mut egui::Ui, data: &DashboardData) {
        Self::section(ui, "General Metrics");

        ui.horizontal(|ui| {
            Self::metric_card(ui, "Companies", data.company_count.to_string());
            ui.add_space(15.0);
            let revenue = data
                .mean_revenue
                .map(format_currency)
                .unwrap_or_else(|| "no data".to_string());
            Self::metric_card(ui, "Average Total Revenue", revenue);
        });
    }

    fn metric_card(ui: &mut egui::Ui, title: &str, value: String) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(12.0).color(Color32::GRAY));
                    ui.label(RichText::new(value).size(20.0).strong());
                });
            });
    }

    fn section(ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(16.0).strong());
        ui.add_space(5.0);
    }

    fn chart_title(ui: &mut egui::Ui, title: &str) {
        ui.add_space(12.0);
        ui.label(RichText::new(title).size(13.0).strong());
    }
}

/// Format a value as whole dollars with thousands separators.
fn format_currency(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::format_currency;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(950.4), "$950");
        assert_eq!(format_currency(1234567.8), "$1,234,568");
        assert_eq!(format_currency(-20500.0), "-$20,500");
    }
}
