//! CSV Data Loader Module
//! Loads the catalog CSV with Polars and derives the typed columns once.

use super::derive::{self, MAIN_COUNTRY, YEAR_ADDED};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns the dashboard reads; anything else is carried through untouched.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "type",
    "country",
    "duration",
    "listed_in",
    "rating",
    "director",
    "cast",
    "date_added",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("The file '{}' could not be found. Please download it.", .0.display())]
    FileNotFound(PathBuf),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// The loaded, derived record set. Never mutated after construction;
/// filters produce new frames.
#[derive(Clone, Debug)]
pub struct Catalog {
    df: DataFrame,
    source: PathBuf,
}

impl Catalog {
    /// Wrap a raw frame, validating the schema and deriving columns.
    pub fn from_dataframe(df: DataFrame, source: PathBuf) -> Result<Self, LoaderError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|c| !names.iter().any(|n| n == *c))
        {
            return Err(LoaderError::MissingColumn(missing.to_string()));
        }

        let df = derive::derive_columns(df)?;
        Ok(Self { df, source })
    }

    /// Get a reference to the derived DataFrame.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Path the catalog was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// Distinct content types ("Movie", "TV Show", ...), sorted.
    pub fn content_types(&self) -> Vec<String> {
        self.distinct_values("type")
    }

    /// Distinct main countries, sorted.
    pub fn main_countries(&self) -> Vec<String> {
        self.distinct_values(MAIN_COUNTRY)
    }

    /// Smallest and largest `year_added`, if any date parsed.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let series = self.df.column(YEAR_ADDED).ok()?.as_materialized_series();
        let ca = series.i32().ok()?;
        Some((ca.min()?, ca.max()?))
    }

    fn distinct_values(&self, column: &str) -> Vec<String> {
        let mut values: Vec<String> = derive::string_values(&self.df, column)
            .map(|vals| vals.into_iter().flatten().collect())
            .unwrap_or_default();
        values.sort();
        values.dedup();
        values
    }
}

/// Handles CSV file loading with Polars.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Read the CSV with every column as a string, then derive columns.
    pub fn load(path: &Path) -> Result<Catalog, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }

        // A zero-length inference window keeps every column as String so
        // derivation controls all coercion.
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        tracing::info!(
            "Read {} rows, {} columns from '{}'",
            df.height(),
            df.width(),
            path.display()
        );

        Catalog::from_dataframe(df, path.to_path_buf())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    pub(crate) const SAMPLE_CSV: &str = "\
show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in
s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,,United States,\"September 25, 2021\",2020,PG-13,90 min,Documentaries
s2,TV Show,Blood & Water,,\"Ama Qamata, Khosi Ngema\",South Africa,\"September 24, 2021\",2021,TV-MA,2 Seasons,\"International TV Shows, TV Dramas, TV Mysteries\"
s3,TV Show,Ganglands,Julien Leclercq,\"Sami Bouajila, Tracy Gotoas\",,\"September 24, 2021\",2021,TV-MA,1 Season,\"Crime TV Shows, International TV Shows\"
s4,Movie,Sankofa,Haile Gerima,\"Kofi Ghanaba, Oyafunmike Ogunlano\",\"United States, Ghana, Burkina Faso\",\"September 24, 2021\",1993,TV-MA,125 min,\"Dramas, Independent Movies, International Movies\"
s5,Movie,The Starling,Theodore Melfi,\"Melissa McCarthy, Chris O'Dowd\",United States,\"September 24, 2021\",2021,PG-13,104 min,\"Comedies, Dramas\"
s6,Movie,Jeans,S. Shankar,\"Prashanth, Aishwarya Rai Bachchan\",\"India, USA\",\"September 21, 2018\",1998,TV-14,166 min,\"Comedies, International Movies, Romantic Movies\"
s7,Movie,Undated,Nobody,,France,not a date,2001,R,80 min,Dramas
s8,TV Show,Old Show,,,Japan,\"January 1, 2008\",2007,TV-PG,3 Seasons,Anime Series
";

    pub(crate) fn write_sample() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub(crate) fn sample_catalog() -> Catalog {
        let file = write_sample();
        CatalogLoader::load(file.path()).unwrap()
    }

    #[test]
    fn load_derives_columns() {
        let catalog = sample_catalog();
        assert_eq!(catalog.row_count(), 8);
        assert_eq!(catalog.content_types(), vec!["Movie", "TV Show"]);
        assert_eq!(
            catalog.main_countries(),
            vec!["France", "India", "Japan", "South Africa", "United States"]
        );
        assert_eq!(catalog.year_bounds(), Some((2008, 2021)));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = CatalogLoader::load(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
        assert!(err.to_string().contains("could not be found"));
    }

    #[test]
    fn missing_column_is_reported() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"type,country\nMovie,France\n").unwrap();
        file.flush().unwrap();

        let err = CatalogLoader::load(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "duration"));
    }
}
