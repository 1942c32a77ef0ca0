//! Filter Panel Widget
//! Left side panel with the dataset picker and the catalog filters.

use crate::data::{clamp_range, CatalogFilter};
use egui::{Color32, RichText, ScrollArea};

/// Left side filter panel: content types, main countries and year range.
pub struct FilterPanel {
    pub dataset_label: String,
    pub content_types: Vec<String>,
    pub selected_types: Vec<bool>,
    pub countries: Vec<String>,
    pub selected_countries: Vec<bool>,
    pub country_search: String,
    pub year_bounds: (i32, i32),
    pub year_from: i32,
    pub year_to: i32,
    pub status: String,
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self {
            dataset_label: "No file selected".to_string(),
            content_types: Vec::new(),
            selected_types: Vec::new(),
            countries: Vec::new(),
            selected_countries: Vec::new(),
            country_search: String::new(),
            year_bounds: (0, 0),
            year_from: 0,
            year_to: 0,
            status: "Ready".to_string(),
        }
    }
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the available options after a catalog load and preselect
    /// `initial`.
    pub fn set_options(
        &mut self,
        content_types: Vec<String>,
        countries: Vec<String>,
        year_bounds: Option<(i32, i32)>,
        initial: &CatalogFilter,
    ) {
        self.selected_types = content_types
            .iter()
            .map(|t| initial.content_types.contains(t))
            .collect();
        self.selected_countries = countries
            .iter()
            .map(|c| initial.countries.contains(c))
            .collect();
        self.content_types = content_types;
        self.countries = countries;
        self.country_search.clear();
        self.year_bounds = year_bounds.unwrap_or(initial.year_range);
        self.year_from = initial.year_range.0;
        self.year_to = initial.year_range.1;
    }

    /// The filter described by the current control state.
    pub fn current_filter(&self) -> CatalogFilter {
        CatalogFilter {
            content_types: Self::selected(&self.content_types, &self.selected_types),
            countries: Self::selected(&self.countries, &self.selected_countries),
            year_range: clamp_range((self.year_from, self.year_to), Some(self.year_bounds)),
        }
    }

    fn selected(values: &[String], flags: &[bool]) -> Vec<String> {
        values
            .iter()
            .zip(flags.iter())
            .filter(|(_, &on)| on)
            .map(|(v, _)| v.clone())
            .collect()
    }

    /// Keep `from <= to` after either slider moved.
    fn constrain_years(&mut self, from_changed: bool) {
        if self.year_from > self.year_to {
            if from_changed {
                self.year_to = self.year_from;
            } else {
                self.year_from = self.year_to;
            }
        }
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the filter panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> FilterPanelAction {
        let mut action = FilterPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🎬 Catalog Insights")
                    .size(22.0)
                    .color(Color32::from_rgb(229, 9, 20)),
            );
            ui.label(RichText::new("Filters").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&self.dataset_label).size(12.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = FilterPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Content Type =====
        ui.label(RichText::new("Content type").size(14.0).strong());
        ui.add_space(5.0);
        for (i, content_type) in self.content_types.iter().enumerate() {
            if let Some(flag) = self.selected_types.get_mut(i) {
                ui.checkbox(flag, content_type);
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Main Country =====
        let chosen = self.selected_countries.iter().filter(|&&s| s).count();
        ui.horizontal(|ui| {
            ui.label(RichText::new("Main country").size(14.0).strong());
            ui.label(
                RichText::new(if chosen == 0 {
                    "(all)".to_string()
                } else {
                    format!("({} selected)", chosen)
                })
                .size(11.0)
                .color(Color32::GRAY),
            );
        });
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.country_search)
                    .hint_text("Search countries")
                    .desired_width(180.0),
            );
            if ui.small_button("Clear").clicked() {
                self.selected_countries.iter_mut().for_each(|v| *v = false);
            }
        });

        let needle = self.country_search.to_lowercase();
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("country_list")
                    .max_height(180.0)
                    .show(ui, |ui| {
                        for (i, country) in self.countries.iter().enumerate() {
                            if !needle.is_empty() && !country.to_lowercase().contains(&needle) {
                                continue;
                            }
                            if let Some(flag) = self.selected_countries.get_mut(i) {
                                ui.checkbox(flag, country);
                            }
                        }
                    });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Year Added =====
        ui.label(RichText::new("Year added").size(14.0).strong());
        ui.add_space(5.0);
        let (lo, hi) = self.year_bounds;
        let from_changed = ui
            .add(egui::Slider::new(&mut self.year_from, lo..=hi).text("from"))
            .changed();
        let to_changed = ui
            .add(egui::Slider::new(&mut self.year_to, lo..=hi).text("to"))
            .changed();
        if from_changed || to_changed {
            self.constrain_years(from_changed);
        }

        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            if ui.button("↺ Reset filters").clicked() {
                action = FilterPanelAction::ResetFilters;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by the filter panel
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPanelAction {
    None,
    BrowseCsv,
    ResetFilters,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn panel() -> FilterPanel {
        let mut panel = FilterPanel::new();
        panel.set_options(
            vec!["Movie".to_string(), "TV Show".to_string()],
            vec!["France".to_string(), "India".to_string()],
            Some((2008, 2021)),
            &CatalogFilter {
                content_types: vec!["Movie".to_string(), "TV Show".to_string()],
                countries: Vec::new(),
                year_range: (2010, 2021),
            },
        );
        panel
    }

    #[test]
    fn current_filter_reflects_controls() {
        let mut panel = panel();
        panel.selected_types[1] = false;
        panel.selected_countries[1] = true;
        panel.year_from = 2015;

        assert_eq!(
            panel.current_filter(),
            CatalogFilter {
                content_types: vec!["Movie".to_string()],
                countries: vec!["India".to_string()],
                year_range: (2015, 2021),
            }
        );
    }

    #[test]
    fn sliders_never_cross() {
        let mut panel = panel();
        panel.year_from = 2020;
        panel.year_to = 2012;
        panel.constrain_years(true);
        assert_eq!((panel.year_from, panel.year_to), (2020, 2020));

        panel.year_from = 2020;
        panel.year_to = 2012;
        panel.constrain_years(false);
        assert_eq!((panel.year_from, panel.year_to), (2012, 2012));
    }
}
