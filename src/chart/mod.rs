//! Chart rendering subsystem.
//!
//! # Data Flow
//! ```text
//! MetricsSnapshot (non-empty, read-only)
//!     → layout.rs (row order, stacked segments, label visibility)
//!     → render.rs (plotters bitmap backend → PNG)
//! ```
//!
//! # Design Decisions
//! - Geometry is computed separately from drawing so it can be tested
//! - Rows sorted by total, fastest on top
//! - Thin segments get no in-bar label; their bar's total label carries the
//!   breakdown instead

pub mod layout;
pub mod render;

use std::path::PathBuf;

use thiserror::Error;

pub use layout::{plan, Category, ChartLayout, Layout};
pub use render::render_chart;

/// Errors raised while rendering a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("nothing to chart: snapshot has no results")]
    Empty,

    #[error("failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("drawing failed: {0}")]
    Draw(String),
}
