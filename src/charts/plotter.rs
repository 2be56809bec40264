//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};

use crate::stats::{CorrelationMatrix, GroupMean, RankedCompany};

const CHART_HEIGHT: f32 = 300.0;

/// Color palette for categories
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(255, 87, 34),   // Deep Orange
    Color32::from_rgb(121, 85, 72),   // Brown
];

/// Everything the dashboard renders for one filter selection.
#[derive(Clone)]
pub struct DashboardData {
    pub company_count: usize,
    pub mean_revenue: Option<f64>,
    pub assets_vs_liabilities: Vec<(String, Vec<[f64; 2]>)>,
    pub ratio_vs_leverage: Vec<(String, Vec<[f64; 2]>)>,
    pub coverage_by_industry: Vec<GroupMean>,
    pub coverage_by_country: Vec<GroupMean>,
    pub current_ratio_by_size: Vec<(String, Vec<f64>)>,
    pub current_ratio_by_country: Vec<(String, Vec<f64>)>,
    pub top_by_coverage: Vec<RankedCompany>,
    pub correlations: CorrelationMatrix,
}

/// Creates the dashboard charts and tables using egui_plot and egui grids.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for a category by index.
    pub fn category_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Scatter chart with one colored point series per category.
    pub fn draw_scatter_chart(
        ui: &mut egui::Ui,
        id: &str,
        x_label: &str,
        y_label: &str,
        series: &[(String, Vec<[f64; 2]>)],
    ) {
        if series.iter().all(|(_, points)| points.is_empty()) {
            Self::draw_no_data(ui);
            return;
        }

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .legend(Legend::default())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (idx, (label, points)) in series.iter().enumerate() {
                    let plot_points: PlotPoints = points.iter().copied().collect();
                    plot_ui.points(
                        Points::new(plot_points)
                            .radius(2.5)
                            .color(Self::category_color(idx))
                            .name(label),
                    );
                }
            });
    }

    /// Bar chart of one value per category, labeled on the x-axis.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, y_label: &str, groups: &[GroupMean]) {
        if groups.is_empty() {
            Self::draw_no_data(ui);
            return;
        }

        let x_labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();
        let bars: Vec<Bar> = groups
            .iter()
            .enumerate()
            .map(|(i, g)| {
                Bar::new(i as f64, g.mean)
                    .width(0.6)
                    .fill(Self::category_color(i))
                    .name(&g.label)
            })
            .collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .y_axis_label(y_label)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Box plot of a value distribution per category.
    pub fn draw_box_chart(
        ui: &mut egui::Ui,
        id: &str,
        y_label: &str,
        groups: &[(String, Vec<f64>)],
    ) {
        if groups.iter().all(|(_, values)| values.is_empty()) {
            Self::draw_no_data(ui);
            return;
        }

        let x_labels: Vec<String> = groups.iter().map(|(label, _)| label.clone()).collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .y_axis_label(y_label)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (i, (label, values)) in groups.iter().enumerate() {
                    if values.is_empty() {
                        continue;
                    }
                    let color = Self::category_color(i);

                    let mut sorted = values.clone();
                    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

                    let n = sorted.len();
                    let q1 = sorted[n / 4];
                    let median = sorted[n / 2];
                    let q3 = sorted[(3 * n / 4).min(n - 1)];
                    let iqr = q3 - q1;
                    let whisker_low = sorted
                        .iter()
                        .copied()
                        .find(|&v| v >= q1 - 1.5 * iqr)
                        .unwrap_or(q1);
                    let whisker_high = sorted
                        .iter()
                        .rev()
                        .copied()
                        .find(|&v| v <= q3 + 1.5 * iqr)
                        .unwrap_or(q3);

                    let box_elem = BoxElem::new(
                        i as f64,
                        BoxSpread::new(whisker_low, q1, median, q3, whisker_high),
                    )
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(egui::Stroke::new(1.5, color));

                    plot_ui.box_plot(BoxPlot::new(vec![box_elem]).name(label));
                }
            });
    }

    /// Top-N ranking table.
    pub fn draw_ranking_table(ui: &mut egui::Ui, value_label: &str, rows: &[RankedCompany]) {
        if rows.is_empty() {
            Self::draw_no_data(ui);
            return;
        }

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id("ranking_table"))
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Company").strong().size(12.0));
                        ui.label(RichText::new("Industry").strong().size(12.0));
                        ui.label(RichText::new("Country").strong().size(12.0));
                        ui.label(RichText::new(value_label).strong().size(12.0));
                        ui.end_row();

                        for row in rows {
                            ui.label(RichText::new(&row.company_id).size(12.0));
                            ui.label(RichText::new(&row.industry).size(12.0));
                            ui.label(RichText::new(&row.country).size(12.0));
                            ui.label(RichText::new(format!("{:.2}", row.value)).size(12.0));
                            ui.end_row();
                        }
                    });
            });
    }

    /// Correlation matrix as a color-coded grid; undefined cells show "-".
    pub fn draw_correlation_table(ui: &mut egui::Ui, matrix: &CorrelationMatrix) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id("correlation_table"))
                    .striped(true)
                    .min_col_width(110.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("");
                        for name in &matrix.columns {
                            ui.label(
                                RichText::new(Self::short_column_name(name))
                                    .strong()
                                    .size(12.0),
                            );
                        }
                        ui.end_row();

                        for (i, name) in matrix.columns.iter().enumerate() {
                            ui.label(
                                RichText::new(Self::short_column_name(name))
                                    .strong()
                                    .size(12.0),
                            );
                            for cell in &matrix.cells[i] {
                                match cell {
                                    Some(r) => {
                                        ui.label(
                                            RichText::new(format!("{r:.3}"))
                                                .size(12.0)
                                                .color(Self::correlation_color(*r)),
                                        );
                                    }
                                    None => {
                                        ui.label(RichText::new("-").size(12.0));
                                    }
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    /// Display name for a ratio column.
    pub fn short_column_name(column: &str) -> String {
        column.replace('_', " ")
    }

    /// Blue for negative correlations, red for positive, washed out near zero.
    fn correlation_color(r: f64) -> Color32 {
        let t = (r.clamp(-1.0, 1.0).abs()) as f32;
        let base = Color32::GRAY;
        let target = if r >= 0.0 {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::from_rgb(52, 152, 219)
        };
        Color32::from_rgb(
            Self::lerp(base.r(), target.r(), t),
            Self::lerp(base.g(), target.g(), t),
            Self::lerp(base.b(), target.b(), t),
        )
    }

    fn lerp(a: u8, b: u8, t: f32) -> u8 {
        (a as f32 + (b as f32 - a as f32) * t).round() as u8
    }

    fn draw_no_data(ui: &mut egui::Ui) {
        ui.label(
            RichText::new("No data for the current filters")
                .size(14.0)
                .color(Color32::GRAY),
        );
    }
}
