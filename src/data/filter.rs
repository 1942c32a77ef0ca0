//! Filter predicates over the catalog frame.

use super::derive::{MAIN_COUNTRY, YEAR_ADDED};
use super::loader::Catalog;
use polars::prelude::*;

/// Year range preselected when nothing else is configured.
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (2010, 2021);

/// User-selected filters. Each field is one sidebar control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Content types to keep. Empty keeps nothing.
    pub content_types: Vec<String>,
    /// Main countries to keep. Empty disables the country predicate.
    pub countries: Vec<String>,
    /// Inclusive `year_added` bounds.
    pub year_range: (i32, i32),
}

impl CatalogFilter {
    /// All types, no country restriction, `preferred` years clamped to the
    /// catalog's own bounds.
    pub fn defaults_for(catalog: &Catalog, preferred: (i32, i32)) -> Self {
        Self {
            content_types: catalog.content_types(),
            countries: Vec::new(),
            year_range: clamp_range(preferred, catalog.year_bounds()),
        }
    }

    /// Build the predicate expression for this filter.
    pub fn predicate(&self) -> Expr {
        let type_pred = self
            .content_types
            .iter()
            .map(|t| col("type").eq(lit(t.as_str())))
            .reduce(|acc, e| acc.or(e))
            .unwrap_or_else(|| lit(false));

        let (from, to) = self.year_range;
        let year_pred = col(YEAR_ADDED)
            .gt_eq(lit(from))
            .and(col(YEAR_ADDED).lt_eq(lit(to)));

        let pred = type_pred.and(year_pred);

        match self
            .countries
            .iter()
            .map(|c| col(MAIN_COUNTRY).eq(lit(c.as_str())))
            .reduce(|acc, e| acc.or(e))
        {
            Some(country_pred) => pred.and(country_pred),
            None => pred,
        }
    }

    /// Produce the filtered view. The source frame is left untouched.
    pub fn apply(&self, df: &DataFrame) -> PolarsResult<DataFrame> {
        let filtered = df.clone().lazy().filter(self.predicate()).collect()?;
        tracing::debug!(
            "Filter kept {} of {} rows (types={:?}, countries={}, years={:?})",
            filtered.height(),
            df.height(),
            self.content_types,
            self.countries.len(),
            self.year_range
        );
        Ok(filtered)
    }
}

/// Clamp a requested range into `bounds`, keeping `from <= to`.
pub fn clamp_range(requested: (i32, i32), bounds: Option<(i32, i32)>) -> (i32, i32) {
    let Some((min, max)) = bounds else {
        return requested;
    };
    let from = requested.0.clamp(min, max);
    let to = requested.1.clamp(min, max).max(from);
    (from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::derive::string_values;
    use crate::data::loader::tests::sample_catalog;
    use pretty_assertions::assert_eq;

    fn titles(df: &DataFrame) -> Vec<String> {
        string_values(df, "title")
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn type_and_year_must_both_hold() {
        let catalog = sample_catalog();
        let filter = CatalogFilter {
            content_types: vec!["Movie".to_string()],
            countries: Vec::new(),
            year_range: (2019, 2021),
        };

        let out = filter.apply(catalog.dataframe()).unwrap();
        assert_eq!(
            titles(&out),
            vec!["Dick Johnson Is Dead", "Sankofa", "The Starling"]
        );
    }

    #[test]
    fn unparseable_year_never_matches() {
        let catalog = sample_catalog();
        let filter = CatalogFilter {
            content_types: catalog.content_types(),
            countries: Vec::new(),
            year_range: (i32::MIN, i32::MAX),
        };

        let out = filter.apply(catalog.dataframe()).unwrap();
        assert_eq!(out.height(), 7);
        assert!(!titles(&out).contains(&"Undated".to_string()));
    }

    #[test]
    fn empty_type_selection_keeps_nothing() {
        let catalog = sample_catalog();
        let filter = CatalogFilter {
            content_types: Vec::new(),
            countries: Vec::new(),
            year_range: (2000, 2030),
        };
        assert_eq!(filter.apply(catalog.dataframe()).unwrap().height(), 0);
    }

    #[test]
    fn countries_restrict_when_selected() {
        let catalog = sample_catalog();
        let filter = CatalogFilter {
            content_types: catalog.content_types(),
            countries: vec!["India".to_string(), "South Africa".to_string()],
            year_range: (2000, 2030),
        };

        let out = filter.apply(catalog.dataframe()).unwrap();
        assert_eq!(titles(&out), vec!["Blood & Water", "Jeans"]);
        assert_eq!(catalog.row_count(), 8);
    }

    #[test]
    fn defaults_clamp_to_data() {
        let catalog = sample_catalog();
        let filter = CatalogFilter::defaults_for(&catalog, DEFAULT_YEAR_RANGE);
        assert_eq!(filter.year_range, (2010, 2021));
        assert_eq!(filter.content_types, vec!["Movie", "TV Show"]);

        assert_eq!(clamp_range((2010, 2021), Some((2015, 2019))), (2015, 2019));
        assert_eq!(clamp_range((2030, 2040), Some((2015, 2019))), (2019, 2019));
        assert_eq!(clamp_range((2010, 2021), None), (2010, 2021));
    }
}
