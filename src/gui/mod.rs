//! GUI module - User interface components

mod app;
mod dashboard_view;
mod data_table;
mod filter_panel;

pub use app::CatalogApp;
pub use dashboard_view::DashboardView;
pub use data_table::DataTable;
pub use filter_panel::{FilterPanel, FilterPanelAction};
