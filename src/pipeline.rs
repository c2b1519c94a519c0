//! One benchmark run, end to end.
//!
//! # Data Flow
//! ```text
//! BenchConfig.targets
//!     → resolver   (logical id → physical id; misses dropped)
//!     → metrics    (concurrent fetch via TimingSource → MetricsSnapshot)
//!     → sink       (pretty JSON)
//!     → chart      (PNG, when enabled)
//! ```
//!
//! # Design Decisions
//! - Backends are injected as trait objects; `lifecycle::startup` builds the
//!   AWS-backed ones
//! - Nothing is written unless the snapshot has at least one record
//! - The snapshot is read-only once collected

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::chart::render_chart;
use crate::config::{BenchConfig, ChartConfig};
use crate::error::BenchResult;
use crate::metrics::{Collector, MissReason, MissingTarget, MetricsSnapshot};
use crate::resolver::{resolve_targets, StackDescriber};
use crate::sink::{read_snapshot, write_snapshot};
use crate::telemetry::TimingSource;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub snapshot: MetricsSnapshot,
    /// Number of configured targets.
    pub configured: usize,
    /// Configured targets absent from the snapshot, with the reason.
    pub missing: Vec<MissingTarget>,
    pub results_path: PathBuf,
    /// `None` when chart rendering is disabled.
    pub chart_path: Option<PathBuf>,
}

impl RunSummary {
    pub fn collected(&self) -> usize {
        self.snapshot.len()
    }
}

/// Resolver, collector and outputs wired together for one configuration.
pub struct Pipeline {
    config: BenchConfig,
    describer: Arc<dyn StackDescriber>,
    source: Arc<dyn TimingSource>,
}

impl Pipeline {
    pub fn new(config: BenchConfig, describer: Arc<dyn StackDescriber>, source: Arc<dyn TimingSource>) -> Self {
        Self {
            config,
            describer,
            source,
        }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Resolve, collect, persist and render.
    pub async fn run(&self) -> BenchResult<RunSummary> {
        let config = &self.config;
        tracing::info!(
            stack = %config.stack_name,
            source = %config.collection.source,
            targets = config.targets.len(),
            "Starting benchmark collection"
        );

        let resolution = resolve_targets(self.describer.as_ref(), &config.stack_name, &config.targets).await?;

        let collector = Collector::new(Arc::clone(&self.source), &config.collection);
        let collected = collector.collect(&resolution.resolved).await?;

        let mut missing: Vec<MissingTarget> = resolution
            .unresolved
            .iter()
            .map(|target| MissingTarget::new(target.label.clone(), MissReason::Unresolved))
            .collect();
        missing.extend(collected.missing);
        for miss in &missing {
            tracing::debug!(label = %miss.label, reason = %miss.reason, "Target excluded from results");
        }

        let snapshot = collected.snapshot;
        let results_path = PathBuf::from(&config.output.results_path);
        write_snapshot(&snapshot, &results_path)?;

        let chart_path = if config.chart.enabled {
            let path = PathBuf::from(&config.output.chart_path);
            render_chart(&snapshot, &config.chart, &path)?;
            tracing::info!(path = %path.display(), "Chart saved");
            Some(path)
        } else {
            tracing::debug!("Chart rendering disabled");
            None
        };

        tracing::info!(
            "Results saved: {} ({}/{} targets)",
            results_path.display(),
            snapshot.len(),
            config.targets.len()
        );

        Ok(RunSummary {
            snapshot,
            configured: config.targets.len(),
            missing,
            results_path,
            chart_path,
        })
    }
}

/// Re-render the chart for a snapshot saved by an earlier run.
pub fn render_saved(input: &Path, output: &Path, chart: &ChartConfig) -> BenchResult<MetricsSnapshot> {
    let snapshot = read_snapshot(input)?;
    render_chart(&snapshot, chart, output)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        targets = snapshot.len(),
        "Chart saved"
    );
    Ok(snapshot)
}
