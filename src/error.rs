//! Top-level error type.

use thiserror::Error;

use crate::chart::ChartError;
use crate::config::ConfigError;
use crate::metrics::CollectError;
use crate::resolver::ResolveError;
use crate::sink::SinkError;

/// Any error that ends a run with a non-zero exit code.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error("failed to save results: {0}")]
    Sink(#[from] SinkError),

    #[error("failed to render chart: {0}")]
    Chart(#[from] ChartError),
}

pub type BenchResult<T> = Result<T, BenchError>;
