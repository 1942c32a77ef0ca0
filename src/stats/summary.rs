//! Dashboard Summary Module
//! Computes every panel of the dashboard from a filtered catalog view.

use super::counts::{
    cross_tab, histogram, top_n, value_counts, word_frequencies, CategoryCount, CrossTab,
    HistogramBin, WordFrequency, MAX_WORDS,
};
use crate::data::derive::{split_list, string_values, DURATION_MIN, MAIN_COUNTRY, YEAR_ADDED};
use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::{Data, Distribution, Median};
use std::collections::BTreeMap;
use thiserror::Error;

pub const MOVIE: &str = "Movie";
pub const TV_SHOW: &str = "TV Show";

/// Entries shown in the top-N bar charts and heatmap axes.
pub const TOP_N: usize = 10;
/// Histogram bins for the movie duration chart.
pub const DURATION_BINS: usize = 30;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Headline counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TitleMetrics {
    pub total: usize,
    pub movies: usize,
    pub tv_shows: usize,
}

/// Titles added per year for one content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlySeries {
    pub content_type: String,
    pub points: Vec<(i32, usize)>,
}

/// Movie duration distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationSummary {
    #[serde(skip)]
    pub values: Vec<f64>,
    pub bins: Vec<HistogramBin>,
    pub mean: f64,
    pub median: f64,
}

/// Everything the dashboard draws, for one filter state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub metrics: TitleMetrics,
    pub type_counts: Vec<CategoryCount>,
    pub yearly_by_type: Vec<YearlySeries>,
    pub top_genres: Vec<CategoryCount>,
    pub top_countries: Vec<CategoryCount>,
    pub ratings: Vec<CategoryCount>,
    pub heatmap: Option<CrossTab>,
    pub durations: Option<DurationSummary>,
    pub words: Vec<WordFrequency>,
}

/// Column values pulled out of the frame once per computation.
struct Columns {
    types: Vec<Option<String>>,
    years: Vec<Option<i32>>,
    countries: Vec<Option<String>>,
    genres: Vec<Option<String>>,
    ratings: Vec<Option<String>>,
    directors: Vec<Option<String>>,
    cast: Vec<Option<String>>,
    durations: Vec<Option<f64>>,
}

impl Columns {
    fn extract(df: &DataFrame) -> Result<Self, SummaryError> {
        let years = df
            .column(YEAR_ADDED)?
            .as_materialized_series()
            .i32()?
            .into_iter()
            .collect();
        let durations = df
            .column(DURATION_MIN)?
            .as_materialized_series()
            .f64()?
            .into_iter()
            .collect();

        Ok(Self {
            types: string_values(df, "type")?,
            years,
            countries: string_values(df, MAIN_COUNTRY)?,
            genres: string_values(df, "listed_in")?,
            ratings: string_values(df, "rating")?,
            directors: string_values(df, "director")?,
            cast: string_values(df, "cast")?,
            durations,
        })
    }
}

impl DashboardSummary {
    /// Compute all panels. Independent panels run in parallel.
    pub fn compute(df: &DataFrame) -> Result<Self, SummaryError> {
        let cols = Columns::extract(df)?;

        let (counts, (rankings, (heatmap, (durations, words)))) = rayon::join(
            || {
                (
                    Self::metrics(&cols),
                    value_counts(cols.types.iter().flatten()),
                    Self::yearly_by_type(&cols),
                )
            },
            || {
                rayon::join(
                    || {
                        (
                            Self::top_genres(&cols),
                            top_n(cols.countries.iter().flatten(), TOP_N),
                            value_counts(cols.ratings.iter().flatten()),
                        )
                    },
                    || {
                        rayon::join(
                            || Self::heatmap(&cols),
                            || (Self::durations(&cols), Self::words(&cols)),
                        )
                    },
                )
            },
        );
        let (metrics, type_counts, yearly_by_type) = counts;
        let (top_genres, top_countries, ratings) = rankings;

        let summary = Self {
            metrics,
            type_counts,
            yearly_by_type,
            top_genres,
            top_countries,
            ratings,
            heatmap,
            durations,
            words,
        };

        tracing::debug!(
            "Summary computed: {} titles, {} genres, {} words",
            summary.metrics.total,
            summary.top_genres.len(),
            summary.words.len()
        );
        Ok(summary)
    }

    fn metrics(cols: &Columns) -> TitleMetrics {
        let count_type = |name: &str| {
            cols.types
                .iter()
                .filter(|t| t.as_deref() == Some(name))
                .count()
        };
        TitleMetrics {
            total: cols.types.len(),
            movies: count_type(MOVIE),
            tv_shows: count_type(TV_SHOW),
        }
    }

    fn yearly_by_type(cols: &Columns) -> Vec<YearlySeries> {
        let mut grouped: BTreeMap<&str, BTreeMap<i32, usize>> = BTreeMap::new();
        for (t, y) in cols.types.iter().zip(cols.years.iter()) {
            if let (Some(t), Some(y)) = (t, y) {
                *grouped.entry(t.as_str()).or_default().entry(*y).or_default() += 1;
            }
        }

        grouped
            .into_iter()
            .map(|(content_type, by_year)| YearlySeries {
                content_type: content_type.to_string(),
                points: by_year.into_iter().collect(),
            })
            .collect()
    }

    fn top_genres(cols: &Columns) -> Vec<CategoryCount> {
        top_n(
            cols.genres.iter().flatten().flat_map(|g| split_list(g)),
            TOP_N,
        )
    }

    /// Genre x country counts over the ten most common of each, using only
    /// rows that carry both fields.
    fn heatmap(cols: &Columns) -> Option<CrossTab> {
        let pairs: Vec<(String, String)> = cols
            .genres
            .iter()
            .zip(cols.countries.iter())
            .filter_map(|(g, c)| Some((g.as_ref()?, c.as_ref()?)))
            .flat_map(|(genres, country)| {
                split_list(genres)
                    .into_iter()
                    .map(move |g| (g, country.clone()))
            })
            .collect();

        if pairs.is_empty() {
            return None;
        }

        let top_countries: Vec<String> = top_n(pairs.iter().map(|(_, c)| c), TOP_N)
            .into_iter()
            .map(|c| c.label)
            .collect();
        let top_genres: Vec<String> = top_n(pairs.iter().map(|(g, _)| g), TOP_N)
            .into_iter()
            .map(|c| c.label)
            .collect();

        let tab = cross_tab(&pairs, &top_genres, &top_countries);
        (tab.max_count() > 0).then_some(tab)
    }

    fn durations(cols: &Columns) -> Option<DurationSummary> {
        let has_movies = cols.types.iter().any(|t| t.as_deref() == Some(MOVIE));
        if !has_movies {
            return None;
        }

        let values: Vec<f64> = cols
            .types
            .iter()
            .zip(cols.durations.iter())
            .filter(|(t, _)| t.as_deref() == Some(MOVIE))
            .filter_map(|(_, d)| *d)
            .collect();

        let bins: Vec<HistogramBin> = histogram(&values, DURATION_BINS);
        let (mean, median) = if values.is_empty() {
            (f64::NAN, f64::NAN)
        } else {
            let data = Data::new(values.clone());
            (data.mean().unwrap_or(f64::NAN), data.median())
        };

        Some(DurationSummary {
            values,
            bins,
            mean,
            median,
        })
    }

    fn words(cols: &Columns) -> Vec<WordFrequency> {
        let text = cols
            .directors
            .iter()
            .chain(cols.cast.iter())
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        word_frequencies(&text, MAX_WORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_catalog;
    use crate::data::CatalogFilter;
    use pretty_assertions::assert_eq;

    fn full_summary() -> DashboardSummary {
        let catalog = sample_catalog();
        let filter = CatalogFilter {
            content_types: catalog.content_types(),
            countries: Vec::new(),
            year_range: (2000, 2030),
        };
        let df = filter.apply(catalog.dataframe()).unwrap();
        DashboardSummary::compute(&df).unwrap()
    }

    #[test]
    fn metrics_split_by_type() {
        let summary = full_summary();
        assert_eq!(
            summary.metrics,
            TitleMetrics {
                total: 7,
                movies: 4,
                tv_shows: 3
            }
        );
        assert_eq!(summary.type_counts[0].label, "Movie");
        assert_eq!(summary.type_counts[0].count, 4);
    }

    #[test]
    fn yearly_series_per_type() {
        let summary = full_summary();
        assert_eq!(
            summary.yearly_by_type,
            vec![
                YearlySeries {
                    content_type: "Movie".to_string(),
                    points: vec![(2018, 1), (2021, 3)],
                },
                YearlySeries {
                    content_type: "TV Show".to_string(),
                    points: vec![(2008, 1), (2021, 2)],
                },
            ]
        );
    }

    #[test]
    fn genres_are_exploded() {
        let summary = full_summary();
        // Four genres tie at two titles; ties are ordered by name.
        let top = &summary.top_genres[0];
        assert_eq!(top.label, "Comedies");
        assert_eq!(top.count, 2);
        assert_eq!(summary.top_genres[3].label, "International TV Shows");
        assert!(summary.top_genres.len() <= TOP_N);
    }

    #[test]
    fn heatmap_uses_rows_with_country_and_genre() {
        let summary = full_summary();
        let tab = summary.heatmap.expect("heatmap");
        // Ganglands has no country and is left out.
        assert!(!tab.rows.contains(&"Crime TV Shows".to_string()));
        assert!(tab.columns.contains(&"United States".to_string()));
        assert_eq!(tab.counts.len(), tab.rows.len());
    }

    #[test]
    fn durations_only_for_movies() {
        let summary = full_summary();
        let durations = summary.durations.expect("durations");
        let mut values = durations.values.clone();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(values, vec![90.0, 104.0, 125.0, 166.0]);
        assert!((durations.median - 114.5).abs() < 1e-9);
        assert_eq!(
            durations.bins.iter().map(|b| b.count).sum::<usize>(),
            4
        );
    }

    #[test]
    fn empty_view_has_no_optional_panels() {
        let catalog = sample_catalog();
        let filter = CatalogFilter {
            content_types: Vec::new(),
            countries: Vec::new(),
            year_range: (2000, 2030),
        };
        let df = filter.apply(catalog.dataframe()).unwrap();
        let summary = DashboardSummary::compute(&df).unwrap();

        assert_eq!(summary.metrics.total, 0);
        assert!(summary.heatmap.is_none());
        assert!(summary.durations.is_none());
        assert!(summary.words.is_empty());
    }
}
