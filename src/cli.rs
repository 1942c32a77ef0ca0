//! Command line arguments.

use crate::data::DEFAULT_YEAR_RANGE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog CSV to load
    #[arg(long, env = "CATALOG_CSV", default_value = "netflix_titles.csv")]
    pub csv: PathBuf,
    /// First year of the initial year-added range
    #[arg(long, default_value_t = DEFAULT_YEAR_RANGE.0)]
    pub year_from: i32,
    /// Last year of the initial year-added range
    #[arg(long, default_value_t = DEFAULT_YEAR_RANGE.1)]
    pub year_to: i32,
    /// Write every chart as PNG plus summary.json into DIR and exit
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CATALOG_LOG", default_value = "info")]
    pub log_level: String,
}

/// Startup settings shared by the window and the headless export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub csv_path: PathBuf,
    pub year_range: (i32, i32),
}

impl Cli {
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            csv_path: self.csv.clone(),
            year_range: (
                self.year_from.min(self.year_to),
                self.year_from.max(self.year_to),
            ),
        }
    }
}
