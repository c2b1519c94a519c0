//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a benchmark
//! run. All types derive Serde traits for deserialization from config files.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Root configuration for a benchmark run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Name of the deployed stack that owns the benchmark functions.
    pub stack_name: String,

    /// Log namespace; log groups are named `/<namespace>/<physical_id>`.
    pub log_namespace: String,

    /// Functions under benchmark, in display order.
    pub targets: Vec<BenchmarkTarget>,

    /// Collection settings (backend selection, window, deadlines).
    pub collection: CollectionConfig,

    /// Log-report backend settings.
    pub logs: LogsConfig,

    /// Trace backend settings.
    pub traces: TracesConfig,

    /// Output locations.
    pub output: OutputConfig,

    /// Chart rendering settings.
    pub chart: ChartConfig,

    /// AWS client settings.
    pub aws: AwsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            stack_name: "aws-lambda-runtime-benchmark".to_string(),
            log_namespace: "aws/lambda".to_string(),
            targets: default_targets(),
            collection: CollectionConfig::default(),
            logs: LogsConfig::default(),
            traces: TracesConfig::default(),
            output: OutputConfig::default(),
            chart: ChartConfig::default(),
            aws: AwsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// A function under benchmark, as named in the stack template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BenchmarkTarget {
    /// Logical resource id in the stack template (e.g. "GoFunction").
    pub logical_id: String,

    /// Label used in the results file and on the chart (e.g. "Go").
    pub label: String,
}

impl BenchmarkTarget {
    pub fn new(logical_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            label: label.into(),
        }
    }
}

fn default_targets() -> Vec<BenchmarkTarget> {
    [
        ("PythonFunction", "Python"),
        ("NodeJsFunction", "Node.js"),
        ("RubyFunction", "Ruby"),
        ("JavaFunction", "Java"),
        ("DotNetFunction", ".NET"),
        ("GoFunction", "Go"),
        ("RustFunction", "Rust"),
    ]
    .into_iter()
    .map(|(logical_id, label)| BenchmarkTarget::new(logical_id, label))
    .collect()
}

/// Which telemetry backend produces the timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TelemetrySource {
    /// Platform `REPORT` lines in the function's log group.
    #[default]
    Logs,
    /// Function segments in the distributed-tracing store.
    Traces,
}

impl std::fmt::Display for TelemetrySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelemetrySource::Logs => write!(f, "logs"),
            TelemetrySource::Traces => write!(f, "traces"),
        }
    }
}

/// Collection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Backend to query.
    pub source: TelemetrySource,

    /// Lookback window ending at the current time, in seconds.
    pub lookback_secs: u64,

    /// Deadline for a single target's backend query, in seconds.
    pub target_timeout_secs: u64,

    /// Maximum number of targets queried at the same time.
    pub max_in_flight: usize,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            source: TelemetrySource::Logs,
            lookback_secs: 600,
            target_timeout_secs: 30,
            max_in_flight: 4,
        }
    }
}

/// Log-report backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogsConfig {
    /// Filter pattern selecting cold-start report lines.
    pub filter_pattern: String,

    /// Maximum number of matching events to fetch.
    pub limit: i32,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            filter_pattern: "REPORT Init Duration".to_string(),
            limit: 1,
        }
    }
}

/// Trace backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TracesConfig {
    /// `origin` of the segment recorded by the compute service itself.
    pub segment_origin: String,

    /// Upper bound on trace summary pages followed per target.
    pub max_pages: usize,
}

impl Default for TracesConfig {
    fn default() -> Self {
        Self {
            segment_origin: "AWS::Lambda::Function".to_string(),
            max_pages: 10,
        }
    }
}

/// Output locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the results JSON is written.
    pub results_path: String,

    /// Where the chart PNG is written.
    pub chart_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: "scripts/benchmark_results.json".to_string(),
            chart_path: "images/benchmark_results.png".to_string(),
        }
    }
}

/// Chart rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Render the chart after writing results.
    pub enabled: bool,

    /// Chart caption; the snapshot date is appended.
    pub title: String,

    /// Image width in pixels (12 in at 150 DPI).
    pub width_px: u32,

    /// Image height in pixels (6 in at 150 DPI).
    pub height_px: u32,

    /// Two-category layout: segments narrower than this fraction of the
    /// largest total get no in-bar label.
    pub min_label_fraction: f64,

    /// Three-category layout: segments shorter than this many milliseconds
    /// get no in-bar label.
    pub min_label_ms: f64,

    /// Axis maximum as a multiple of the largest total.
    pub axis_padding: f64,

    /// Gap between a bar and its total label, as a fraction of the largest total.
    pub label_offset_fraction: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "AWS Lambda Cold Start Benchmark".to_string(),
            width_px: 1800,
            height_px: 900,
            min_label_fraction: 0.10,
            min_label_ms: 30.0,
            axis_padding: 1.25,
            label_offset_fraction: 0.015,
        }
    }
}

/// AWS client configuration. Unset fields fall back to the default
/// credential and region provider chains.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AwsConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
