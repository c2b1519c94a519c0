//! PNG rendering of a planned chart.

use std::fs;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;

use crate::chart::layout::{plan, Category, ChartLayout};
use crate::chart::ChartError;
use crate::config::ChartConfig;
use crate::metrics::MetricsSnapshot;

const FONT: &str = "sans-serif";
const FONT_SIZE: f64 = 20.0;
const TITLE_FONT_SIZE: f64 = 32.0;
/// Fraction of a row's height left empty above and below its bar.
const BAR_INSET: f64 = 0.15;

const INIT_COLOR: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);
const INVOCATION_COLOR: RGBColor = RGBColor(0x34, 0x98, 0xdb);
const OVERHEAD_COLOR: RGBColor = RGBColor(0x95, 0xa5, 0xa6);

fn color(category: Category) -> RGBColor {
    match category {
        Category::Init => INIT_COLOR,
        Category::Invocation => INVOCATION_COLOR,
        Category::Overhead => OVERHEAD_COLOR,
    }
}

fn draw_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

/// Render `snapshot` as a horizontal stacked-bar PNG at `path`.
pub fn render_chart(
    snapshot: &MetricsSnapshot,
    config: &ChartConfig,
    path: impl AsRef<Path>,
) -> Result<(), ChartError> {
    let path = path.as_ref();
    let layout = plan(snapshot, config).ok_or(ChartError::Empty)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ChartError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let title = format!("{} ({})", config.title, snapshot.timestamp.format("%Y-%m-%d"));
    draw(&layout, &title, config, path)?;

    tracing::debug!(path = %path.display(), rows = layout.rows.len(), "Chart rendered");
    Ok(())
}

/// Row `index` (0 = fastest) sits at the top of the plot.
fn row_center(layout: &ChartLayout, index: usize) -> f64 {
    (layout.rows.len() - 1 - index) as f64 + 0.5
}

fn draw(layout: &ChartLayout, title: &str, config: &ChartConfig, path: &Path) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, (config.width_px, config.height_px)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, TITLE_FONT_SIZE).into_font().style(FontStyle::Bold))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(140)
        .build_cartesian_2d(0f64..layout.axis_max, 0f64..layout.rows.len() as f64)
        .map_err(draw_error)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.15))
        .x_desc("Time (ms)")
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|_| String::new())
        .label_style((FONT, FONT_SIZE).into_font())
        .axis_desc_style((FONT, FONT_SIZE).into_font())
        .draw()
        .map_err(draw_error)?;

    // One series per category so the legend gets one entry each.
    for &category in layout.layout.categories() {
        let fill = color(category);
        let bars: Vec<_> = layout
            .rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                let y = row_center(layout, i);
                row.segments
                    .iter()
                    .filter(move |s| s.category == category && s.value > 0.0)
                    .map(move |s| {
                        Rectangle::new(
                            [(s.start, y - 0.5 + BAR_INSET), (s.end(), y + 0.5 - BAR_INSET)],
                            fill.filled(),
                        )
                    })
            })
            .collect();

        chart
            .draw_series(bars)
            .map_err(draw_error)?
            .label(category.legend())
            .legend(move |(x, y)| Rectangle::new([(x, y - 8), (x + 24, y + 8)], fill.filled()));
    }

    let inside = (FONT, FONT_SIZE)
        .into_font()
        .style(FontStyle::Bold)
        .color(&WHITE)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let outside = (FONT, FONT_SIZE)
        .into_font()
        .style(FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let row_name = (FONT, FONT_SIZE)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));

    for (i, row) in layout.rows.iter().enumerate() {
        let y = row_center(layout, i);

        for segment in row.segments.iter().filter(|s| s.labeled && s.value > 0.0) {
            chart
                .plotting_area()
                .draw(&Text::new(segment.text(), (segment.center(), y), inside.clone()))
                .map_err(draw_error)?;
        }

        chart
            .plotting_area()
            .draw(&Text::new(
                row.total_text.clone(),
                (row.total + layout.label_offset, y),
                outside.clone(),
            ))
            .map_err(draw_error)?;

        let (px, py) = chart.plotting_area().map_coordinate(&(0.0, y));
        root.draw(&Text::new(row.label.clone(), (px - 10, py), row_name.clone()))
            .map_err(draw_error)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font((FONT, FONT_SIZE).into_font())
        .draw()
        .map_err(draw_error)?;

    root.present().map_err(draw_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::TimingRecord;
    use std::collections::BTreeMap;

    #[test]
    fn test_empty_snapshot_is_rejected_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");

        let err = render_chart(&MetricsSnapshot::new(BTreeMap::new()), &ChartConfig::default(), &path).unwrap_err();

        assert!(matches!(err, ChartError::Empty));
        assert!(!path.exists());
    }

    fn png_size(bytes: &[u8]) -> (u32, u32) {
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        (width, height)
    }

    #[test]
    fn test_writes_png_at_configured_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("images/nested/chart.png");
        let snapshot = MetricsSnapshot::new(BTreeMap::from([
            ("Go".to_string(), TimingRecord::new(72.4, 1.9)),
            ("Java".to_string(), TimingRecord::new(412.3, 88.0)),
        ]));

        render_chart(&snapshot, &ChartConfig::default(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        assert_eq!(&bytes[12..16], b"IHDR");
        assert_eq!(png_size(&bytes), (1800, 900));
    }

    #[test]
    fn test_three_category_chart_renders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let snapshot = MetricsSnapshot::new(BTreeMap::from([
            ("Rust".to_string(), TimingRecord::with_overhead(21.5, 1.3, 0.4)),
            ("Python".to_string(), TimingRecord::with_overhead(180.0, 40.0, 2.0)),
        ]));
        let config = ChartConfig {
            width_px: 640,
            height_px: 320,
            ..ChartConfig::default()
        };

        render_chart(&snapshot, &config, &path).unwrap();

        assert_eq!(png_size(&std::fs::read(&path).unwrap()), (640, 320));
    }

    #[test]
    fn test_fastest_row_is_on_top() {
        let snapshot = MetricsSnapshot::new(BTreeMap::from([
            ("Java".to_string(), TimingRecord::new(400.0, 80.0)),
            ("Go".to_string(), TimingRecord::new(70.0, 2.0)),
        ]));
        let layout = plan(&snapshot, &ChartConfig::default()).unwrap();

        assert_eq!(layout.rows[0].label, "Go");
        assert_eq!(row_center(&layout, 0), 1.5);
        assert_eq!(row_center(&layout, 1), 0.5);
    }
}
