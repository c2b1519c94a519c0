//! Bar layout: row order, segment geometry and label placement.
//!
//! Everything here is plain arithmetic on the snapshot so it can be checked
//! without drawing anything.

use crate::config::ChartConfig;
use crate::metrics::{MetricsSnapshot, TimingRecord};

/// A stacked bar component, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Init,
    Invocation,
    Overhead,
}

impl Category {
    pub fn legend(self) -> &'static str {
        match self {
            Category::Init => "Init Duration (Cold Start)",
            Category::Invocation => "Invocation Duration",
            Category::Overhead => "Overhead Duration",
        }
    }
}

/// Which components the chart shows, and how thin segments are judged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Layout {
    /// Init + Invocation; label threshold is a fraction of the largest total.
    TwoCategory { min_fraction: f64 },
    /// Init + Invocation + Overhead; label threshold in milliseconds.
    ThreeCategory { min_ms: f64 },
}

impl Layout {
    /// Three-category when any record carries overhead.
    pub fn for_snapshot(snapshot: &MetricsSnapshot, config: &ChartConfig) -> Self {
        if snapshot.has_overhead() {
            Layout::ThreeCategory {
                min_ms: config.min_label_ms,
            }
        } else {
            Layout::TwoCategory {
                min_fraction: config.min_label_fraction,
            }
        }
    }

    pub fn categories(self) -> &'static [Category] {
        match self {
            Layout::TwoCategory { .. } => &[Category::Init, Category::Invocation],
            Layout::ThreeCategory { .. } => &[Category::Init, Category::Invocation, Category::Overhead],
        }
    }

    /// Smallest segment value that still gets an in-bar label.
    pub fn label_threshold(self, max_total: f64) -> f64 {
        match self {
            Layout::TwoCategory { min_fraction } => max_total * min_fraction,
            Layout::ThreeCategory { min_ms } => min_ms,
        }
    }
}

/// One drawn segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub category: Category,
    /// Left edge in ms.
    pub start: f64,
    pub value: f64,
    /// Whether the value is printed inside the segment.
    pub labeled: bool,
}

impl Segment {
    pub fn end(&self) -> f64 {
        self.start + self.value
    }

    pub fn center(&self) -> f64 {
        self.start + self.value / 2.0
    }

    pub fn text(&self) -> String {
        format!("{:.0}ms", self.value)
    }
}

/// One horizontal bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub label: String,
    pub segments: Vec<Segment>,
    pub total: f64,
    /// Text placed just past the end of the bar.
    pub total_text: String,
}

/// Complete chart geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub layout: Layout,
    /// Fastest first.
    pub rows: Vec<Row>,
    pub max_total: f64,
    pub axis_max: f64,
    /// Gap between a bar end and its total label, in ms.
    pub label_offset: f64,
}

fn component(record: &TimingRecord, category: Category) -> f64 {
    match category {
        Category::Init => record.init_duration_ms,
        Category::Invocation => record.invocation_duration_ms,
        Category::Overhead => record.overhead_duration_ms.unwrap_or(0.0),
    }
}

/// Plan the chart for `snapshot`; `None` when it has no results.
pub fn plan(snapshot: &MetricsSnapshot, config: &ChartConfig) -> Option<ChartLayout> {
    if snapshot.is_empty() {
        return None;
    }

    let layout = Layout::for_snapshot(snapshot, config);
    let categories = layout.categories();

    let mut ordered: Vec<(&String, &TimingRecord)> = snapshot.results.iter().collect();
    ordered.sort_by(|a, b| a.1.total_ms().total_cmp(&b.1.total_ms()));

    let max_total = ordered
        .iter()
        .map(|(_, record)| record.total_ms())
        .fold(0.0_f64, f64::max);
    let threshold = layout.label_threshold(max_total);

    let rows = ordered
        .into_iter()
        .map(|(label, record)| {
            let mut start = 0.0;
            let segments: Vec<Segment> = categories
                .iter()
                .map(|&category| {
                    let value = component(record, category);
                    let segment = Segment {
                        category,
                        start,
                        value,
                        labeled: value >= threshold,
                    };
                    start += value;
                    segment
                })
                .collect();

            let total = record.total_ms();
            let total_text = if segments.iter().all(|s| s.labeled) {
                format!("{:.0}ms", total)
            } else {
                let parts: Vec<String> = segments.iter().map(|s| format!("{:.0}", s.value)).collect();
                format!("{:.0}ms ({})", total, parts.join(" + "))
            };

            Row {
                label: label.clone(),
                segments,
                total,
                total_text,
            }
        })
        .collect();

    Some(ChartLayout {
        layout,
        rows,
        max_total,
        axis_max: (max_total * config.axis_padding).max(1.0),
        label_offset: max_total * config.label_offset_fraction,
    })
}
