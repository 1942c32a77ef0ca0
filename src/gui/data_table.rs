//! Raw Data Table
//! Formats the filtered frame once and draws only the visible rows.

use egui::{RichText, ScrollArea};
use polars::prelude::*;

const CELL_WIDTH: f32 = 150.0;
const ROW_HEIGHT: f32 = 20.0;
const TABLE_HEIGHT: f32 = 400.0;

/// Pre-formatted cells of a filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn cell_text(value: AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

impl DataTable {
    pub fn from_dataframe(df: &DataFrame) -> PolarsResult<Self> {
        let headers = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let columns = df.get_columns();
        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let row = columns
                .iter()
                .map(|c| c.get(i).map(cell_text))
                .collect::<PolarsResult<Vec<String>>>()?;
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new(format!("{} rows", self.rows.len()))
                .size(11.0)
                .color(egui::Color32::GRAY),
        );

        ScrollArea::horizontal().id_salt("raw_data_h").show(ui, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    for header in &self.headers {
                        ui.add_sized(
                            [CELL_WIDTH, ROW_HEIGHT],
                            egui::Label::new(RichText::new(header).strong()).truncate(),
                        );
                    }
                });
                ui.separator();

                ScrollArea::vertical()
                    .id_salt("raw_data_v")
                    .max_height(TABLE_HEIGHT)
                    .show_rows(ui, ROW_HEIGHT, self.rows.len(), |ui, range| {
                        for row in &self.rows[range] {
                            ui.horizontal(|ui| {
                                for cell in row {
                                    let response = ui.add_sized(
                                        [CELL_WIDTH, ROW_HEIGHT],
                                        egui::Label::new(cell.as_str()).truncate(),
                                    );
                                    if cell.len() > 20 {
                                        response.on_hover_text(cell.as_str());
                                    }
                                }
                            });
                        }
                    });
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_strings_numbers_and_nulls() {
        let df = DataFrame::new(vec![
            Column::new("title".into(), &["Dick Johnson Is Dead", "Blood & Water"]),
            Column::new("year_added".into(), &[Some(2021i32), None]),
        ])
        .unwrap();

        let table = DataTable::from_dataframe(&df).unwrap();
        assert_eq!(table.headers, vec!["title", "year_added"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["Dick Johnson Is Dead".to_string(), "2021".to_string()],
                vec!["Blood & Water".to_string(), String::new()],
            ]
        );
    }
}
