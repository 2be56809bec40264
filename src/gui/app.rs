//! Solvency Dashboard Main Application
//! Main window with the filter sidebar and the dashboard area. The dataset
//! is fetched once on a background thread at startup; every filter change
//! recomputes the derived aggregates synchronously.

use std::sync::mpsc::{channel, Receiver};
use std::thread;

use egui::SidePanel;
use log::{info, warn};
use polars::prelude::*;

use crate::charts::DashboardData;
use crate::data::{
    apply_filters, columns, filter_options, DatasetLoader, FilterSelection,
};
use crate::gui::{ControlPanel, ControlPanelAction, DashboardView};
use crate::stats;

/// Dataset fetch result from the background thread
enum LoadResult {
    Complete(DataFrame),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    loader: DatasetLoader,
    control_panel: ControlPanel,
    dashboard: DashboardView,

    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            loader: DatasetLoader::default(),
            control_panel: ControlPanel::new(),
            dashboard: DashboardView::new(),
            load_rx: None,
            is_loading: false,
        };
        app.start_load();
        app
    }

    /// Fetch the dataset on a background thread; the result is delivered
    /// through a channel and cached for the rest of the process.
    fn start_load(&mut self) {
        if self.is_loading {
            return;
        }
        self.is_loading = true;
        self.control_panel.set_status("Fetching dataset...");

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let url = self.loader.url().to_string();

        thread::spawn(move || {
            let mut loader = DatasetLoader::new(url);
            let result = match loader.load() {
                Ok(df) => LoadResult::Complete(df.clone()),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Complete(df) => {
                        info!("dataset ready: {} companies", df.height());
                        self.control_panel.update_options(
                            filter_options(&df, columns::INDUSTRY),
                            filter_options(&df, columns::COUNTRY),
                            filter_options(&df, columns::COMPANY_SIZE),
                        );
                        self.control_panel
                            .set_status(format!("Loaded {} companies", df.height()));
                        self.loader.set_dataframe(df);
                        self.is_loading = false;
                        should_keep_receiver = false;
                        self.rebuild_dashboard();
                    }
                    LoadResult::Error(error) => {
                        warn!("dataset load failed: {error}");
                        self.control_panel.set_status(format!("Error: {error}"));
                        self.dashboard.load_error = Some(error);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Recompute all derived aggregates for the current selection.
    fn rebuild_dashboard(&mut self) {
        let Some(df) = self.loader.dataframe() else {
            return;
        };

        match build_dashboard_data(df, &self.control_panel.selection) {
            Ok(data) => {
                self.dashboard.data = Some(data);
            }
            Err(e) => {
                self.control_panel.set_status(format!("Error: {e}"));
            }
        }
    }
}

/// Pure transform from (Dataset, FilterSelection) to everything the
/// dashboard renders.
fn build_dashboard_data(
    df: &DataFrame,
    selection: &FilterSelection,
) -> anyhow::Result<DashboardData> {
    let view = apply_filters(df, selection)?;

    Ok(DashboardData {
        company_count: stats::record_count(&view),
        mean_revenue: stats::column_mean(&view, columns::TOTAL_REVENUE)?,
        assets_vs_liabilities: stats::points_by_category(
            &view,
            columns::INDUSTRY,
            columns::CURRENT_ASSETS,
            columns::CURRENT_LIABILITIES,
        )?,
        ratio_vs_leverage: stats::points_by_category(
            &view,
            columns::INDUSTRY,
            columns::CURRENT_RATIO,
            columns::DEBT_TO_EQUITY,
        )?,
        coverage_by_industry: stats::grouped_mean(
            &view,
            columns::INDUSTRY,
            columns::INTEREST_COVERAGE,
        )?,
        coverage_by_country: stats::grouped_mean(
            &view,
            columns::COUNTRY,
            columns::INTEREST_COVERAGE,
        )?,
        current_ratio_by_size: stats::values_by_category(
            &view,
            columns::COMPANY_SIZE,
            columns::CURRENT_RATIO,
        )?,
        current_ratio_by_country: stats::values_by_category(
            &view,
            columns::COUNTRY,
            columns::CURRENT_RATIO,
        )?,
        top_by_coverage: stats::top_companies(&view, columns::INTEREST_COVERAGE, stats::TOP_N)?,
        correlations: stats::correlation_matrix(&view, &columns::RATIOS)?,
    })
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    if action == ControlPanelAction::FilterChanged {
                        self.rebuild_dashboard();
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn sample_df() -> DataFrame {
        df!(
            columns::COMPANY_ID => ["C1", "C2", "C3"],
            columns::INDUSTRY => ["A", "A", "B"],
            columns::COUNTRY => ["USA", "Mexico", "USA"],
            columns::COMPANY_SIZE => ["Large", "Small", "Medium"],
            columns::TOTAL_REVENUE => [1000.0, 200.0, 400.0],
            columns::CURRENT_ASSETS => [500.0, 100.0, 150.0],
            columns::CURRENT_LIABILITIES => [250.0, 100.0, 300.0],
            columns::CURRENT_RATIO => [2.0, 1.0, 0.5],
            columns::DEBT_TO_EQUITY => [0.5, 1.2, 2.0],
            columns::INTEREST_COVERAGE => [8.0, 3.0, 1.5],
        )
        .unwrap()
    }

    #[test]
    fn unconstrained_build_covers_the_whole_dataset() {
        let df = sample_df();
        let data = build_dashboard_data(&df, &FilterSelection::default()).unwrap();

        assert_eq!(data.company_count, 3);
        assert!((data.mean_revenue.unwrap() - 1600.0 / 3.0).abs() < 1e-9);
        assert_eq!(data.top_by_coverage.len(), 3);
        assert_eq!(data.correlations.cells[0][0], Some(1.0));
    }

    #[test]
    fn empty_view_degrades_gracefully() {
        let df = sample_df();
        let selection = FilterSelection {
            industry: Some("C".to_string()),
            ..Default::default()
        };
        let data = build_dashboard_data(&df, &selection).unwrap();

        assert_eq!(data.company_count, 0);
        assert!(data.mean_revenue.is_none());
        assert!(data.coverage_by_industry.is_empty());
        assert!(data.top_by_coverage.is_empty());
        assert!(data.correlations.cells.iter().flatten().all(Option::is_none));
    }

    #[test]
    fn filtered_build_only_sees_matching_records() {
        let df = sample_df();
        let selection = FilterSelection {
            industry: Some("A".to_string()),
            ..Default::default()
        };
        let data = build_dashboard_data(&df, &selection).unwrap();

        assert_eq!(data.company_count, 2);
        assert!(data
            .top_by_coverage
            .iter()
            .all(|row| row.industry == "A"));
        assert_eq!(data.coverage_by_industry.len(), 1);
    }
}
