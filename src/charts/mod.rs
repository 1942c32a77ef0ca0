//! Charts module - Interactive plots and static PNG export

pub mod palette;
mod plotter;
mod renderer;
pub mod word_cloud;

pub use plotter::{ChartPlotter, WORD_CLOUD_HEIGHT};
pub use renderer::StaticChartRenderer;
