//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot and the egui painter.

use super::palette::{self, Rgb};
use super::word_cloud::PlacedWord;
use crate::stats::{CategoryCount, CrossTab, DurationSummary, YearlySeries};
use egui::{Align2, Color32, FontId, RichText, Sense, Shape, Stroke, Vec2};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

pub const CHART_HEIGHT: f32 = 320.0;
pub const WORD_CLOUD_HEIGHT: f32 = 400.0;

const HEATMAP_CELL: Vec2 = Vec2::new(72.0, 26.0);
const HEATMAP_LABEL_WIDTH: f32 = 190.0;
const PIE_SEGMENTS_PER_TURN: f32 = 180.0;

pub fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Axis formatter that shows `labels[i]` at integer positions only.
fn category_formatter(
    labels: Vec<String>,
) -> impl Fn(egui_plot::GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let v = mark.value;
        if (v - v.round()).abs() > 1e-6 || v < 0.0 {
            return String::new();
        }
        labels.get(v.round() as usize).cloned().unwrap_or_default()
    }
}

/// Creates the dashboard's interactive charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Pie chart of titles per content type, with a legend on the right.
    pub fn draw_pie(ui: &mut egui::Ui, counts: &[CategoryCount]) {
        let total: usize = counts.iter().map(|c| c.count).sum();
        if total == 0 {
            ui.label(RichText::new("No titles for the current filters").color(Color32::GRAY));
            return;
        }

        let size = Vec2::new(ui.available_width(), CHART_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let rect = response.rect;
        let radius = (rect.height() / 2.0 - 10.0).max(10.0);
        let center = rect.left_center() + Vec2::new(radius + 20.0, 0.0);

        let mut start = -std::f32::consts::FRAC_PI_2;
        for (i, slice) in counts.iter().enumerate() {
            let fraction = slice.count as f32 / total as f32;
            let sweep = fraction * std::f32::consts::TAU;
            let fill = color32(palette::categorical(&palette::SET3, i));

            let steps = ((PIE_SEGMENTS_PER_TURN * fraction).ceil() as usize).max(1);
            for s in 0..steps {
                let a0 = start + sweep * s as f32 / steps as f32;
                let a1 = start + sweep * (s + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![
                        center,
                        center + radius * Vec2::angled(a0),
                        center + radius * Vec2::angled(a1),
                    ],
                    fill,
                    Stroke::NONE,
                ));
            }

            let mid = start + sweep / 2.0;
            painter.text(
                center + radius * 0.65 * Vec2::angled(mid),
                Align2::CENTER_CENTER,
                format!("{:.1}%", fraction * 100.0),
                FontId::proportional(13.0),
                Color32::BLACK,
            );
            start += sweep;
        }

        // Legend
        let legend_x = center.x + radius + 40.0;
        for (i, slice) in counts.iter().enumerate() {
            let y = rect.top() + 20.0 + i as f32 * 22.0;
            let swatch = egui::Rect::from_min_size(egui::pos2(legend_x, y), Vec2::splat(14.0));
            painter.rect_filled(swatch, 2.0, color32(palette::categorical(&palette::SET3, i)));
            painter.text(
                egui::pos2(legend_x + 22.0, y + 7.0),
                Align2::LEFT_CENTER,
                format!("{} ({})", slice.label, slice.count),
                FontId::proportional(13.0),
                ui.visuals().text_color(),
            );
        }
    }

    /// Titles added per year, one line with markers per content type.
    pub fn draw_yearly_lines(ui: &mut egui::Ui, series: &[YearlySeries]) {
        Plot::new("yearly_lines")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Year added")
            .y_axis_label("Titles")
            .show(ui, |plot_ui| {
                for (i, s) in series.iter().enumerate() {
                    let color = color32(palette::categorical(&palette::SERIES, i));
                    let points: Vec<[f64; 2]> = s
                        .points
                        .iter()
                        .map(|&(year, count)| [year as f64, count as f64])
                        .collect();

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(color)
                            .width(2.0)
                            .name(&s.content_type),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points.iter().copied()))
                            .radius(4.0)
                            .color(color),
                    );
                }
            });
    }

    /// Horizontal bars, largest on top, coloured along `scale`.
    pub fn draw_horizontal_bars(
        ui: &mut egui::Ui,
        id: &str,
        counts: &[CategoryCount],
        scale: &[Rgb],
        value_label: &str,
    ) {
        // Ascending so the most frequent entry sits at the top of the axis.
        let ordered: Vec<&CategoryCount> = counts.iter().rev().collect();
        let max = counts.iter().map(|c| c.count).max().unwrap_or(0) as f64;
        let labels: Vec<String> = ordered.iter().map(|c| c.label.clone()).collect();

        let bars: Vec<Bar> = ordered
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let t = palette::normalized(c.count as f64, max);
                Bar::new(i as f64, c.count as f64)
                    .width(0.7)
                    .name(&c.label)
                    .fill(color32(palette::sample_scale(scale, t)))
            })
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .allow_drag(false)
            .x_axis_label(value_label)
            .y_axis_formatter(category_formatter(labels))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    }

    /// Vertical bars in the given order, coloured along `scale`.
    pub fn draw_vertical_bars(
        ui: &mut egui::Ui,
        id: &str,
        counts: &[CategoryCount],
        scale: &[Rgb],
        x_label: &str,
        y_label: &str,
    ) {
        let max = counts.iter().map(|c| c.count).max().unwrap_or(0) as f64;
        let labels: Vec<String> = counts.iter().map(|c| c.label.clone()).collect();

        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let t = palette::normalized(c.count as f64, max);
                Bar::new(i as f64, c.count as f64)
                    .width(0.7)
                    .name(&c.label)
                    .fill(color32(palette::sample_scale(scale, t)))
            })
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .allow_drag(false)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .x_axis_formatter(category_formatter(labels))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Genre x country grid with annotated counts.
    pub fn draw_heatmap(ui: &mut egui::Ui, tab: &CrossTab) {
        let max = tab.max_count() as f64;
        let text_color = ui.visuals().text_color();

        egui::ScrollArea::horizontal()
            .id_salt("heatmap_scroll")
            .show(ui, |ui| {
                egui::Grid::new("genre_country_heatmap")
                    .spacing([2.0, 2.0])
                    .show(ui, |ui| {
                        ui.add_sized(
                            [HEATMAP_LABEL_WIDTH, HEATMAP_CELL.y],
                            egui::Label::new(RichText::new("Genre \\ Country").strong()),
                        );
                        for country in &tab.columns {
                            ui.add_sized(
                                HEATMAP_CELL,
                                egui::Label::new(RichText::new(country).size(11.0).strong())
                                    .truncate(),
                            )
                            .on_hover_text(country);
                        }
                        ui.end_row();

                        for (row, genre) in tab.rows.iter().enumerate() {
                            ui.add_sized(
                                [HEATMAP_LABEL_WIDTH, HEATMAP_CELL.y],
                                egui::Label::new(RichText::new(genre).size(11.0).color(text_color))
                                    .truncate(),
                            );
                            for (col, country) in tab.columns.iter().enumerate() {
                                let count = tab.counts[row][col];
                                let bg = palette::sample_scale(
                                    &palette::YL_GN_BU,
                                    palette::normalized(count as f64, max),
                                );
                                let (rect, response) =
                                    ui.allocate_exact_size(HEATMAP_CELL, Sense::hover());
                                ui.painter().rect_filled(rect, 0.0, color32(bg));
                                ui.painter().text(
                                    rect.center(),
                                    Align2::CENTER_CENTER,
                                    count.to_string(),
                                    FontId::proportional(12.0),
                                    color32(palette::contrasting_text(bg)),
                                );
                                response.on_hover_text(format!("{} / {}: {}", genre, country, count));
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    /// Movie duration histogram.
    pub fn draw_duration_histogram(ui: &mut egui::Ui, durations: &DurationSummary) {
        if durations.bins.is_empty() {
            ui.label(RichText::new("No numeric durations in this selection").color(Color32::GRAY));
            return;
        }

        let bars: Vec<Bar> = durations
            .bins
            .iter()
            .map(|b| {
                Bar::new((b.start + b.end) / 2.0, b.count as f64)
                    .width(b.end - b.start)
                    .name(format!("{:.0}-{:.0} min", b.start, b.end))
                    .fill(color32(palette::SKY_BLUE))
                    .stroke(Stroke::new(0.5, Color32::WHITE))
            })
            .collect();

        Plot::new("duration_histogram")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Duration (minutes)")
            .y_axis_label("Movies")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Movies"));
            });

        ui.label(
            RichText::new(format!(
                "Mean {:.1} min · Median {:.1} min · {} movies",
                durations.mean,
                durations.median,
                durations.values.len()
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );
    }

    /// Paint pre-laid-out words on a black canvas of `size`.
    pub fn draw_word_cloud(ui: &mut egui::Ui, words: &[PlacedWord], size: Vec2) {
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 4.0, Color32::BLACK);

        for word in words {
            painter.text(
                rect.min + Vec2::new(word.x, word.y),
                Align2::CENTER_CENTER,
                &word.text,
                FontId::proportional(word.font_size),
                color32(word.color),
            );
        }
    }
}
