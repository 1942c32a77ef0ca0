//! Data module - CSV loading, column derivation and filtering

pub mod derive;
mod filter;
mod loader;

pub use filter::{clamp_range, CatalogFilter, DEFAULT_YEAR_RANGE};
pub use loader::{Catalog, CatalogLoader};

#[cfg(test)]
pub(crate) use loader::tests as fixtures;
