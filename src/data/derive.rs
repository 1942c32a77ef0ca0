//! Column Derivation Module
//! Turns raw catalog strings into typed, filterable columns.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// Derived column: calendar year the title was added.
pub const YEAR_ADDED: &str = "year_added";
/// Derived column: first entry of the comma-separated country list.
pub const MAIN_COUNTRY: &str = "main_country";
/// Derived column: numeric duration in minutes (movies only).
pub const DURATION_MIN: &str = "duration_min";

/// Date layouts seen in catalog exports, tried in order.
const DATE_FORMATS: [&str; 4] = ["%B %d, %Y", "%Y-%m-%d", "%d-%b-%y", "%m/%d/%Y"];

/// Parse a `date_added` value and return its year.
pub fn parse_year_added(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(|date| date.year())
}

/// First country of a comma-separated list, trimmed.
pub fn main_country(raw: &str) -> Option<String> {
    raw.split(',')
        .next()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Numeric minutes from a duration such as "90 min". Seasons and other
/// non-numeric values yield `None`.
pub fn parse_duration_minutes(raw: &str) -> Option<f64> {
    raw.replace(" min", "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Split a multi-valued field ("Dramas, International Movies") into entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a string column as owned optional values, one per row.
pub fn string_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<String>>> {
    let series = df.column(column)?.as_materialized_series();
    let ca = series.str()?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}

/// Append `year_added`, `main_country` and `duration_min` to the frame.
pub fn derive_columns(mut df: DataFrame) -> PolarsResult<DataFrame> {
    let years: Vec<Option<i32>> = string_values(&df, "date_added")?
        .iter()
        .map(|v| v.as_deref().and_then(parse_year_added))
        .collect();

    let countries: Vec<Option<String>> = string_values(&df, "country")?
        .iter()
        .map(|v| v.as_deref().and_then(main_country))
        .collect();

    let durations: Vec<Option<f64>> = string_values(&df, "duration")?
        .iter()
        .map(|v| v.as_deref().and_then(parse_duration_minutes))
        .collect();

    df.with_column(Column::new(YEAR_ADDED.into(), years))?;
    df.with_column(Column::new(MAIN_COUNTRY.into(), countries))?;
    df.with_column(Column::new(DURATION_MIN.into(), durations))?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duration_in_minutes() {
        assert_eq!(parse_duration_minutes("90 min"), Some(90.0));
        assert_eq!(parse_duration_minutes("  125 min "), Some(125.0));
        assert_eq!(parse_duration_minutes("2 Seasons"), None);
        assert_eq!(parse_duration_minutes(""), None);
    }

    #[test]
    fn main_country_is_first_entry() {
        assert_eq!(main_country("India, USA"), Some("India".to_string()));
        assert_eq!(main_country("France"), Some("France".to_string()));
        assert_eq!(main_country(", France"), None);
        assert_eq!(main_country(""), None);
    }

    #[test]
    fn year_from_common_layouts() {
        assert_eq!(parse_year_added("September 25, 2021"), Some(2021));
        assert_eq!(parse_year_added(" April 5, 2019"), Some(2019));
        assert_eq!(parse_year_added("2018-01-01"), Some(2018));
        assert_eq!(parse_year_added("Sep 25, 2021"), Some(2021));
        assert_eq!(parse_year_added("25-Sep-21"), Some(2021));
        assert_eq!(parse_year_added("09/25/2021"), Some(2021));
        assert_eq!(parse_year_added("not a date"), None);
        assert_eq!(parse_year_added("   "), None);
    }

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(
            split_list("Dramas, International Movies,,  Thrillers"),
            vec!["Dramas", "International Movies", "Thrillers"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn derive_appends_typed_columns() {
        let df = DataFrame::new(vec![
            Column::new(
                "date_added".into(),
                vec![Some("August 1, 2020"), Some("garbage"), None],
            ),
            Column::new("country".into(), vec![Some("India, USA"), None, Some("Japan")]),
            Column::new(
                "duration".into(),
                vec![Some("90 min"), Some("1 Season"), None],
            ),
        ])
        .unwrap();

        let df = derive_columns(df).unwrap();

        let years: Vec<Option<i32>> = df
            .column(YEAR_ADDED)
            .unwrap()
            .as_materialized_series()
            .i32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(years, vec![Some(2020), None, None]);

        assert_eq!(
            string_values(&df, MAIN_COUNTRY).unwrap(),
            vec![Some("India".to_string()), None, Some("Japan".to_string())]
        );

        let durations: Vec<Option<f64>> = df
            .column(DURATION_MIN)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(durations, vec![Some(90.0), None, None]);
    }
}
