//! Static Chart Renderer
//! Writes every dashboard panel to PNG with plotters, plus the summary as JSON.
//!
//! Files produced in the export directory:
//! - types.png, yearly.png, genres.png, countries.png, ratings.png
//! - heatmap.png, durations.png, wordcloud.png (when the panel has data)
//! - summary.json (written first)

use super::palette::{self, Rgb};
use super::word_cloud::layout_words;
use crate::stats::{
    CategoryCount, CrossTab, DashboardSummary, DurationSummary, WordFrequency, YearlySeries,
};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CHART_SIZE: (u32, u32) = (1000, 600);
const HEATMAP_SIZE: (u32, u32) = (1200, 700);
const WORD_CLOUD_SIZE: (u32, u32) = (800, 400);
const FONT: &str = "sans-serif";

type DrawResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to render {chart}: {message}")]
    Draw { chart: String, message: String },
    #[error("Failed to write summary: {0}")]
    Json(#[from] serde_json::Error),
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn centered(size: f64, color: RGBColor) -> TextStyle<'static> {
    (FONT, size)
        .into_font()
        .color(&color)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render all panels into `dir`, creating it if needed. Returns the
    /// written paths in order.
    pub fn export_all(
        summary: &DashboardSummary,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, RenderError> {
        fs::create_dir_all(dir)?;

        let json_path = dir.join("summary.json");
        fs::write(&json_path, serde_json::to_string_pretty(summary)?)?;
        let mut written = vec![json_path];

        let mut render = |name: &str,
                          draw: &dyn Fn(&Path) -> DrawResult|
         -> Result<(), RenderError> {
            let path = dir.join(name);
            draw(&path).map_err(|e| RenderError::Draw {
                chart: name.to_string(),
                message: e.to_string(),
            })?;
            tracing::debug!("Wrote {}", path.display());
            written.push(path);
            Ok(())
        };

        render("types.png", &|p| Self::render_pie(p, &summary.type_counts))?;
        render("yearly.png", &|p| Self::render_yearly(p, &summary.yearly_by_type))?;
        render("genres.png", &|p| {
            Self::render_horizontal_bars(p, "Top 10 genres", &summary.top_genres, &palette::VIRIDIS)
        })?;
        render("countries.png", &|p| {
            Self::render_vertical_bars(
                p,
                "Top 10 producing countries",
                &summary.top_countries,
                "Country",
                &palette::PLASMA,
            )
        })?;
        render("ratings.png", &|p| {
            Self::render_vertical_bars(
                p,
                "Rating distribution",
                &summary.ratings,
                "Rating",
                &palette::PLASMA,
            )
        })?;
        if let Some(tab) = &summary.heatmap {
            render("heatmap.png", &|p| Self::render_heatmap(p, tab))?;
        }
        if let Some(durations) = summary.durations.as_ref().filter(|d| !d.bins.is_empty()) {
            render("durations.png", &|p| Self::render_histogram(p, durations))?;
        }
        if !summary.words.is_empty() {
            render("wordcloud.png", &|p| Self::render_word_cloud(p, &summary.words))?;
        }

        tracing::info!("Exported {} files to '{}'", written.len(), dir.display());
        Ok(written)
    }

    fn render_pie(path: &Path, counts: &[CategoryCount]) -> DrawResult {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled("Share of content types", (FONT, 28))?;

        let total: usize = counts.iter().map(|c| c.count).sum();
        let (w, h) = root.dim_in_pixel();
        let center = ((w as f64 * 0.4), (h as f64 / 2.0));
        let radius = (h as f64 / 2.0 - 30.0).max(10.0);

        let mut start = -std::f64::consts::FRAC_PI_2;
        for (i, slice) in counts.iter().enumerate() {
            if total == 0 {
                break;
            }
            let fraction = slice.count as f64 / total as f64;
            let sweep = fraction * std::f64::consts::TAU;
            let steps = ((fraction * 180.0).ceil() as usize).max(1);

            let mut points = vec![(center.0 as i32, center.1 as i32)];
            points.extend((0..=steps).map(|s| {
                let a = start + sweep * s as f64 / steps as f64;
                (
                    (center.0 + radius * a.cos()) as i32,
                    (center.1 + radius * a.sin()) as i32,
                )
            }));
            let color = rgb(palette::categorical(&palette::SET3, i));
            root.draw(&Polygon::new(points, color.filled()))?;

            let mid = start + sweep / 2.0;
            root.draw(&Text::new(
                format!("{:.1}%", fraction * 100.0),
                (
                    (center.0 + radius * 0.65 * mid.cos()) as i32,
                    (center.1 + radius * 0.65 * mid.sin()) as i32,
                ),
                centered(18.0, BLACK),
            ))?;

            let legend_y = 40 + i as i32 * 30;
            let legend_x = (w as f64 * 0.75) as i32;
            root.draw(&Rectangle::new(
                [(legend_x, legend_y), (legend_x + 18, legend_y + 18)],
                color.filled(),
            ))?;
            root.draw(&Text::new(
                format!("{} ({})", slice.label, slice.count),
                (legend_x + 26, legend_y),
                (FONT, 18).into_font(),
            ))?;

            start += sweep;
        }

        root.present()?;
        Ok(())
    }

    fn render_yearly(path: &Path, series: &[YearlySeries]) -> DrawResult {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let years = series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
        let min_year = years.clone().min().unwrap_or(2010);
        let max_year = years.max().unwrap_or(2021).max(min_year + 1);
        let max_count = series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.1))
            .max()
            .unwrap_or(1)
            .max(1) as u32;

        let mut chart = ChartBuilder::on(&root)
            .caption("Titles added per year", (FONT, 28))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(min_year..max_year, 0u32..(max_count + max_count / 10 + 1))?;

        chart
            .configure_mesh()
            .x_desc("Year added")
            .y_desc("Titles")
            .x_label_formatter(&|y| y.to_string())
            .draw()?;

        for (i, s) in series.iter().enumerate() {
            let color = rgb(palette::categorical(&palette::SERIES, i));
            let points: Vec<(i32, u32)> = s.points.iter().map(|&(y, c)| (y, c as u32)).collect();

            chart
                .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
                .label(s.content_type.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            chart.draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))?;
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    fn render_horizontal_bars(
        path: &Path,
        title: &str,
        counts: &[CategoryCount],
        scale: &[Rgb],
    ) -> DrawResult {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        // Ascending so the largest bar is drawn at the top.
        let ordered: Vec<&CategoryCount> = counts.iter().rev().collect();
        let n = ordered.len().max(1) as u32;
        let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
        let labels: Vec<String> = ordered.iter().map(|c| c.label.clone()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (FONT, 28))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(220)
            .build_cartesian_2d(0u32..(max as u32 + max as u32 / 10 + 1), (0u32..n).into_segmented())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc("Titles")
            .y_labels(n as usize)
            .y_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        chart.draw_series(ordered.iter().enumerate().map(|(i, c)| {
            let t = palette::normalized(c.count as f64, max as f64);
            let color = rgb(palette::sample_scale(scale, t));
            let mut bar = Rectangle::new(
                [
                    (0, SegmentValue::Exact(i as u32)),
                    (c.count as u32, SegmentValue::Exact(i as u32 + 1)),
                ],
                color.filled(),
            );
            bar.set_margin(4, 4, 0, 0);
            bar
        }))?;

        root.present()?;
        Ok(())
    }

    fn render_vertical_bars(
        path: &Path,
        title: &str,
        counts: &[CategoryCount],
        x_desc: &str,
        scale: &[Rgb],
    ) -> DrawResult {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let n = counts.len().max(1) as u32;
        let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
        let labels: Vec<String> = counts.iter().map(|c| c.label.clone()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (FONT, 28))
            .margin(15)
            .x_label_area_size(60)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..n).into_segmented(), 0u32..(max as u32 + max as u32 / 10 + 1))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_desc)
            .y_desc("Titles")
            .x_labels(n as usize)
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(i, c)| {
            let t = palette::normalized(c.count as f64, max as f64);
            let color = rgb(palette::sample_scale(scale, t));
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i as u32), 0),
                    (SegmentValue::Exact(i as u32 + 1), c.count as u32),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, 6, 6);
            bar
        }))?;

        root.present()?;
        Ok(())
    }

    fn render_heatmap(path: &Path, tab: &CrossTab) -> DrawResult {
        let root = BitMapBackend::new(path, HEATMAP_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let cols = tab.columns.len().max(1) as u32;
        let rows = tab.rows.len().max(1) as u32;
        let max = tab.max_count() as f64;
        let col_labels = tab.columns.clone();
        // First genre on top.
        let row_labels: Vec<String> = tab.rows.iter().rev().cloned().collect();

        let mut chart = ChartBuilder::on(&root)
            .caption("Genres vs top 10 countries", (FONT, 28))
            .margin(15)
            .x_label_area_size(60)
            .y_label_area_size(240)
            .build_cartesian_2d((0u32..cols).into_segmented(), (0u32..rows).into_segmented())?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(cols as usize)
            .y_labels(rows as usize)
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => col_labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => row_labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        for (r, row) in tab.counts.iter().enumerate() {
            let y = rows - 1 - r as u32;
            for (c, &count) in row.iter().enumerate() {
                let x = c as u32;
                let bg = palette::sample_scale(&palette::YL_GN_BU, palette::normalized(count as f64, max));
                chart.draw_series(std::iter::once(Rectangle::new(
                    [
                        (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                        (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
                    ],
                    rgb(bg).filled(),
                )))?;
                chart.draw_series(std::iter::once(Text::new(
                    count.to_string(),
                    (SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)),
                    centered(16.0, rgb(palette::contrasting_text(bg))),
                )))?;
            }
        }

        root.present()?;
        Ok(())
    }

    fn render_histogram(path: &Path, durations: &DurationSummary) -> DrawResult {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let x_min = durations.bins.first().map(|b| b.start).unwrap_or(0.0);
        let x_max = durations.bins.last().map(|b| b.end).unwrap_or(1.0);
        let max_count = durations.bins.iter().map(|b| b.count).max().unwrap_or(1) as u32;

        let mut chart = ChartBuilder::on(&root)
            .caption("Movie duration distribution (minutes)", (FONT, 28))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0u32..(max_count + max_count / 10 + 1))?;

        chart
            .configure_mesh()
            .x_desc("Duration (minutes)")
            .y_desc("Movies")
            .draw()?;

        let fill = rgb(palette::SKY_BLUE);
        chart.draw_series(durations.bins.iter().map(|b| {
            Rectangle::new([(b.start, 0), (b.end, b.count as u32)], fill.filled())
        }))?;
        chart.draw_series(durations.bins.iter().map(|b| {
            Rectangle::new([(b.start, 0), (b.end, b.count as u32)], WHITE.stroke_width(1))
        }))?;

        root.present()?;
        Ok(())
    }

    fn render_word_cloud(path: &Path, words: &[WordFrequency]) -> DrawResult {
        let root = BitMapBackend::new(path, WORD_CLOUD_SIZE).into_drawing_area();
        root.fill(&BLACK)?;

        let placed = layout_words(words, WORD_CLOUD_SIZE.0 as f32, WORD_CLOUD_SIZE.1 as f32);
        for word in &placed {
            root.draw(&Text::new(
                word.text.as_str(),
                (word.x as i32, word.y as i32),
                centered(word.font_size as f64, rgb(word.color)),
            ))?;
        }

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_catalog;
    use crate::data::CatalogFilter;
    use pretty_assertions::assert_eq;

    fn file_names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn export_writes_every_panel() {
        let catalog = sample_catalog();
        let filter = CatalogFilter {
            content_types: catalog.content_types(),
            countries: Vec::new(),
            year_range: (2000, 2030),
        };
        let df = filter.apply(catalog.dataframe()).unwrap();
        let summary = DashboardSummary::compute(&df).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let written = StaticChartRenderer::export_all(&summary, dir.path()).unwrap();
        assert_eq!(
            file_names(&written),
            vec![
                "summary.json",
                "types.png",
                "yearly.png",
                "genres.png",
                "countries.png",
                "ratings.png",
                "heatmap.png",
                "durations.png",
                "wordcloud.png",
            ]
        );
        for path in &written {
            assert!(path.starts_with(dir.path()));
            assert!(fs::metadata(path).unwrap().len() > 0);
        }
        for path in &written[1..] {
            let bytes = fs::read(path).unwrap();
            let signature: &[u8] = b"\x89PNG\r\n\x1a\n";
            assert_eq!(&bytes[..8], signature, "{} is not a PNG", path.display());
        }

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(json["metrics"]["total"], 7);
        assert_eq!(json["metrics"]["movies"], 4);
        assert!(json["durations"]["values"].is_null());
    }

    #[test]
    fn empty_summary_skips_optional_panels() {
        let dir = tempfile::tempdir().unwrap();
        let written =
            StaticChartRenderer::export_all(&DashboardSummary::default(), dir.path()).unwrap();
        assert_eq!(
            file_names(&written),
            vec![
                "summary.json",
                "types.png",
                "yearly.png",
                "genres.png",
                "countries.png",
                "ratings.png",
            ]
        );
        assert!(!dir.path().join("heatmap.png").exists());
        assert!(!dir.path().join("wordcloud.png").exists());
    }
}
