//! Catalog Insights - Media Catalog Analysis Dashboard
//!
//! Loads a streaming-catalog CSV and shows filterable descriptive charts,
//! either in a native window or exported as PNG files.

mod charts;
mod cli;
mod data;
mod gui;
mod stats;

use anyhow::Context;
use clap::Parser;
use cli::{AppConfig, Cli};
use data::{CatalogFilter, CatalogLoader};
use eframe::egui;
use gui::CatalogApp;
use stats::DashboardSummary;
use std::path::Path;
use std::str::FromStr;
use tracing::Level;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = cli.app_config();
    match &cli.export {
        Some(dir) => export(&config, dir),
        None => run_window(config),
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_max_level(Level::from_str(level).unwrap_or(Level::INFO))
        .init();
}

/// Headless mode: default filters, every panel written to `dir`.
fn export(config: &AppConfig, dir: &Path) -> anyhow::Result<()> {
    let catalog = CatalogLoader::load(&config.csv_path)?;
    let filter = CatalogFilter::defaults_for(&catalog, config.year_range);
    let view = filter
        .apply(catalog.dataframe())
        .context("Failed to filter catalog")?;
    let summary = DashboardSummary::compute(&view)?;

    let written = charts::StaticChartRenderer::export_all(&summary, dir)?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_window(config: AppConfig) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Catalog Insights"),
        ..Default::default()
    };

    eframe::run_native(
        "Catalog Insights",
        options,
        Box::new(move |cc| Ok(Box::new(CatalogApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start window: {}", e))
}
