//! Stats module - frequency tables and dashboard panels

mod counts;
mod summary;

pub use counts::{CategoryCount, CrossTab, WordFrequency};
pub use summary::{DashboardSummary, DurationSummary, YearlySeries};
