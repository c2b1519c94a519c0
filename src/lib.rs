//! Cold-start benchmark collector for serverless functions.

pub mod chart;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod metrics;
pub mod observability;
pub mod pipeline;
pub mod resilience;
pub mod resolver;
pub mod sink;
pub mod telemetry;

pub use config::schema::BenchConfig;
pub use error::{BenchError, BenchResult};
pub use metrics::{MetricsSnapshot, TimingRecord};
pub use pipeline::{Pipeline, RunSummary};
