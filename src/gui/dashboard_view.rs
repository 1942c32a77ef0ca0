//! Dashboard View Widget
//! Central scrollable panel: metrics, every chart section and the raw data.

use super::data_table::DataTable;
use crate::charts::palette;
use crate::charts::word_cloud::{layout_words, PlacedWord};
use crate::charts::{ChartPlotter, WORD_CLOUD_HEIGHT};
use crate::stats::DashboardSummary;
use egui::{Color32, RichText, ScrollArea, Vec2};

const SECTION_SPACING: f32 = 20.0;
const ACCENT: Color32 = Color32::from_rgb(229, 9, 20);

/// Word cloud layout for the width it was computed at.
struct CloudCache {
    width: f32,
    words: Vec<PlacedWord>,
}

pub struct DashboardView {
    summary: Option<DashboardSummary>,
    table: DataTable,
    cloud: Option<CloudCache>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            summary: None,
            table: DataTable::default(),
            cloud: None,
        }
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_summary(&mut self, summary: DashboardSummary, table: DataTable) {
        self.summary = Some(summary);
        self.table = table;
        self.cloud = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(summary) = self.summary.as_ref() else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let cloud = &mut self.cloud;
        let table = &self.table;

        ScrollArea::vertical()
            .id_salt("dashboard_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(10.0);
                ui.label(
                    RichText::new("Netflix Data Analysis Dashboard")
                        .size(28.0)
                        .strong()
                        .color(ACCENT),
                );
                ui.label("Explore the Netflix catalog: movies, TV shows, genres and more.");
                ui.add_space(15.0);

                Self::draw_metrics(ui, summary);

                Self::section(ui, "Movies vs TV Shows", |ui| {
                    ChartPlotter::draw_pie(ui, &summary.type_counts);
                });

                Self::section(ui, "Titles added per year", |ui| {
                    ChartPlotter::draw_yearly_lines(ui, &summary.yearly_by_type);
                });

                Self::section(ui, "Top 10 Genres", |ui| {
                    ChartPlotter::draw_horizontal_bars(
                        ui,
                        "top_genres",
                        &summary.top_genres,
                        &palette::VIRIDIS,
                        "Count",
                    );
                });

                Self::section(ui, "Top 10 Producing Countries", |ui| {
                    ChartPlotter::draw_vertical_bars(
                        ui,
                        "top_countries",
                        &summary.top_countries,
                        &palette::PLASMA,
                        "Country",
                        "Titles",
                    );
                });

                Self::section(ui, "Rating Distribution", |ui| {
                    ChartPlotter::draw_vertical_bars(
                        ui,
                        "ratings",
                        &summary.ratings,
                        &palette::PLASMA,
                        "Rating",
                        "Count",
                    );
                });

                // Sections with nothing to show keep their heading only.
                Self::section(ui, "Heatmap: Genres vs Top 10 Countries", |ui| {
                    if let Some(tab) = &summary.heatmap {
                        ChartPlotter::draw_heatmap(ui, tab);
                    }
                });

                Self::section(ui, "Movie Duration Distribution", |ui| {
                    if let Some(durations) = &summary.durations {
                        ChartPlotter::draw_duration_histogram(ui, durations);
                    }
                });

                Self::section(ui, "Word Cloud: Cast and Directors", |ui| {
                    if summary.words.is_empty() {
                        ui.label(
                            RichText::new("Not enough data to build the word cloud.")
                                .color(Color32::from_rgb(23, 162, 184)),
                        );
                        return;
                    }

                    let width = ui.available_width();
                    let stale = cloud
                        .as_ref()
                        .map_or(true, |c| (c.width - width).abs() > 1.0);
                    if stale {
                        *cloud = Some(CloudCache {
                            width,
                            words: layout_words(&summary.words, width, WORD_CLOUD_HEIGHT),
                        });
                    }
                    if let Some(c) = cloud.as_ref() {
                        ChartPlotter::draw_word_cloud(
                            ui,
                            &c.words,
                            Vec2::new(width, WORD_CLOUD_HEIGHT),
                        );
                    }
                });

                Self::section(ui, "Raw Data", |ui| {
                    if table.is_empty() {
                        ui.label(RichText::new("No rows match the filters").color(Color32::GRAY));
                    } else {
                        table.show(ui);
                    }
                });

                ui.add_space(SECTION_SPACING);
                ui.separator();
                ui.label(
                    RichText::new("Built with egui, egui_plot and Polars")
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(10.0);
            });
    }

    fn draw_metrics(ui: &mut egui::Ui, summary: &DashboardSummary) {
        let metrics = [
            ("Total Titles", summary.metrics.total),
            ("Movies", summary.metrics.movies),
            ("TV Shows", summary.metrics.tv_shows),
        ];

        ui.columns(metrics.len(), |columns| {
            for (ui, (label, value)) in columns.iter_mut().zip(metrics) {
                egui::Frame::none()
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .rounding(8.0)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(label).size(13.0).color(Color32::GRAY));
                        ui.label(RichText::new(value.to_string()).size(30.0).strong());
                    });
            }
        });
    }

    fn section(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
        ui.add_space(SECTION_SPACING);
        ui.label(RichText::new(title).size(18.0).strong());
        ui.add_space(6.0);
        add_contents(ui);
    }
}
