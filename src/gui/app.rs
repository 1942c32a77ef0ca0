//! Catalog Insights Main Application
//! Main window with the filter panel and the dashboard view.

use crate::cli::AppConfig;
use crate::data::{Catalog, CatalogFilter, CatalogLoader};
use crate::gui::{DashboardView, DataTable, FilterPanel, FilterPanelAction};
use crate::stats::DashboardSummary;
use egui::{Color32, RichText, SidePanel};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(Catalog),
    Error(String),
}

/// Next pending loader message. A loader that hung up without a final
/// message is reported as an error.
fn next_load_result(rx: &Receiver<LoadResult>) -> Option<LoadResult> {
    match rx.try_recv() {
        Ok(result) => Some(result),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => Some(LoadResult::Error(
            "The CSV loader stopped before finishing".to_string(),
        )),
    }
}

/// Main application window.
pub struct CatalogApp {
    config: AppConfig,
    catalog: Option<Catalog>,
    load_error: Option<String>,
    filter_panel: FilterPanel,
    dashboard: DashboardView,
    /// Filter the dashboard currently reflects.
    applied_filter: Option<CatalogFilter>,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl CatalogApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            config: config.clone(),
            catalog: None,
            load_error: None,
            filter_panel: FilterPanel::new(),
            dashboard: DashboardView::new(),
            applied_filter: None,
            load_rx: None,
            is_loading: false,
        };
        app.start_loading(config.csv_path);
        app
    }

    fn start_loading(&mut self, path: PathBuf) {
        if self.is_loading {
            return;
        }

        self.dashboard.clear();
        self.catalog = None;
        self.applied_filter = None;
        self.load_error = None;
        self.filter_panel.dataset_label = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        self.filter_panel.set_status("Loading CSV file...");
        self.config.csv_path = path.clone();
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));
            let result = match CatalogLoader::load(&path) {
                Ok(catalog) => LoadResult::Complete(catalog),
                Err(e) => {
                    tracing::error!("{}", e);
                    LoadResult::Error(e.to_string())
                }
            };
            let _ = tx.send(result);
        });
    }

    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Some(result) = next_load_result(&rx) {
                match result {
                    LoadResult::Progress(status) => {
                        self.filter_panel.set_status(&status);
                    }
                    LoadResult::Complete(catalog) => {
                        self.filter_panel.set_status(&format!(
                            "Loaded {} titles from {}",
                            catalog.row_count(),
                            catalog.source().display()
                        ));
                        self.install_catalog(catalog);
                        self.is_loading = false;
                        should_keep_receiver = false;
                        break;
                    }
                    LoadResult::Error(error) => {
                        self.filter_panel.set_status(&format!("Error: {}", error));
                        self.load_error = Some(error);
                        self.is_loading = false;
                        should_keep_receiver = false;
                        break;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn install_catalog(&mut self, catalog: Catalog) {
        self.reset_filters(&catalog);
        self.catalog = Some(catalog);
    }

    fn reset_filters(&mut self, catalog: &Catalog) {
        let initial = CatalogFilter::defaults_for(catalog, self.config.year_range);
        self.filter_panel.set_options(
            catalog.content_types(),
            catalog.main_countries(),
            catalog.year_bounds(),
            &initial,
        );
    }

    /// Re-filter and recompute the summary when the controls changed.
    fn refresh_dashboard(&mut self) {
        let Some(catalog) = self.catalog.as_ref() else {
            return;
        };

        let filter = self.filter_panel.current_filter();
        if self.applied_filter.as_ref() == Some(&filter) {
            return;
        }

        let computed = filter
            .apply(catalog.dataframe())
            .map_err(|e| e.to_string())
            .and_then(|view| {
                let summary = DashboardSummary::compute(&view).map_err(|e| e.to_string())?;
                let table = DataTable::from_dataframe(&view).map_err(|e| e.to_string())?;
                Ok((summary, table))
            });

        match computed {
            Ok((summary, table)) => {
                self.filter_panel
                    .set_status(&format!("{} titles match", summary.metrics.total));
                self.dashboard.set_summary(summary, table);
            }
            Err(e) => {
                tracing::error!("Failed to refresh dashboard: {}", e);
                self.filter_panel.set_status(&format!("Error: {}", e));
            }
        }
        self.applied_filter = Some(filter);
    }

    fn show_load_error(ui: &mut egui::Ui, error: &str) -> bool {
        let mut browse = false;
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            egui::Frame::none()
                .fill(Color32::from_rgb(248, 215, 218))
                .rounding(6.0)
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(error)
                            .size(16.0)
                            .color(Color32::from_rgb(114, 28, 36)),
                    );
                });
            ui.add_space(15.0);
            if ui.button("📂 Open another file").clicked() {
                browse = true;
            }
        });
        browse
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // A failed load replaces the whole dashboard with the message.
        if let Some(error) = self.load_error.clone() {
            let mut browse = false;
            egui::CentralPanel::default().show(ctx, |ui| {
                browse = Self::show_load_error(ui, &error);
            });
            if browse {
                self.handle_browse_csv();
            }
            return;
        }

        // Left panel - Filter Panel
        SidePanel::left("filter_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.filter_panel.show(ui) {
                        FilterPanelAction::BrowseCsv => self.handle_browse_csv(),
                        FilterPanelAction::ResetFilters => {
                            if let Some(catalog) = self.catalog.take() {
                                self.reset_filters(&catalog);
                                self.catalog = Some(catalog);
                            }
                        }
                        FilterPanelAction::None => {}
                    }
                });
            });

        self.refresh_dashboard();

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.is_loading {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                return;
            }
            self.dashboard.show(ui);
        });
    }
}
