//! Shared in-memory backends for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use coldstart_bench::config::schema::TelemetrySource;
use coldstart_bench::config::{BenchConfig, BenchmarkTarget};
use coldstart_bench::resolver::{ResolveResult, StackDescriber};
use coldstart_bench::telemetry::logs::{LogEvent, LogQuery};
use coldstart_bench::telemetry::traces::{SummaryPage, TraceDetail, TraceSummary};
use coldstart_bench::telemetry::{LogStore, LookbackWindow, TelemetryError, TelemetryResult, TraceStore};

pub const ORIGIN: &str = "AWS::Lambda::Function";

/// Config for three targets writing into `dir`, chart disabled.
pub fn test_config(dir: &Path, source: TelemetrySource) -> BenchConfig {
    let mut config = BenchConfig::default();
    config.stack_name = "bench-stack".to_string();
    config.targets = vec![
        BenchmarkTarget::new("GoFunction", "Go"),
        BenchmarkTarget::new("RustFunction", "Rust"),
        BenchmarkTarget::new("JavaFunction", "Java"),
    ];
    config.collection.source = source;
    config.collection.target_timeout_secs = 5;
    config.output.results_path = dir.join("scripts/benchmark_results.json").display().to_string();
    config.output.chart_path = dir.join("images/benchmark_results.png").display().to_string();
    config.chart.enabled = false;
    config
}

/// Stack with a fixed logical → physical id table.
#[derive(Default)]
pub struct FakeStack {
    resources: HashMap<String, String>,
}

impl FakeStack {
    pub fn with(mut self, logical_id: &str, physical_id: &str) -> Self {
        self.resources.insert(logical_id.to_string(), physical_id.to_string());
        self
    }
}

#[async_trait]
impl StackDescriber for FakeStack {
    async fn physical_id(&self, _stack: &str, logical_id: &str) -> ResolveResult<Option<String>> {
        Ok(self.resources.get(logical_id).cloned())
    }
}

/// Log store keyed by log group. Groups not listed do not exist.
#[derive(Default)]
pub struct InMemoryLogs {
    groups: HashMap<String, Vec<LogEvent>>,
    failing: bool,
    queries: Arc<AtomicUsize>,
}

impl InMemoryLogs {
    pub fn with_report(mut self, log_group: &str, timestamp: i64, message: &str) -> Self {
        self.groups.entry(log_group.to_string()).or_default().push(LogEvent {
            timestamp: Some(timestamp),
            message: message.to_string(),
        });
        self
    }

    pub fn with_empty_group(mut self, log_group: &str) -> Self {
        self.groups.entry(log_group.to_string()).or_default();
        self
    }

    /// Shared count of queries served, readable after the store is moved.
    pub fn query_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.queries)
    }

    /// Every query fails as if credentials were rejected.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

#[async_trait]
impl LogStore for InMemoryLogs {
    async fn filter_events(&self, query: &LogQuery) -> TelemetryResult<Vec<LogEvent>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(TelemetryError::transport("logs", "AccessDeniedException"));
        }
        self.groups
            .get(&query.log_group)
            .cloned()
            .ok_or_else(|| TelemetryError::LogGroupNotFound(query.log_group.clone()))
    }
}

/// Trace store keyed by filter expression, one page per filter.
#[derive(Default)]
pub struct InMemoryTraces {
    summaries: HashMap<String, Vec<TraceSummary>>,
    traces: HashMap<String, Vec<String>>,
}

impl InMemoryTraces {
    pub fn with_trace(mut self, filter: &str, id: &str, response_time: f64, segments: Vec<String>) -> Self {
        self.summaries.entry(filter.to_string()).or_default().push(TraceSummary {
            id: id.to_string(),
            response_time,
        });
        self.traces.insert(id.to_string(), segments);
        self
    }
}

#[async_trait]
impl TraceStore for InMemoryTraces {
    async fn summaries_page(
        &self,
        filter: &str,
        _window: &LookbackWindow,
        _next_token: Option<String>,
    ) -> TelemetryResult<SummaryPage> {
        Ok(SummaryPage {
            summaries: self.summaries.get(filter).cloned().unwrap_or_default(),
            next_token: None,
        })
    }

    async fn batch_traces(&self, ids: &[String]) -> TelemetryResult<Vec<TraceDetail>> {
        Ok(ids
            .iter()
            .filter_map(|id| {
                self.traces.get(id).map(|segments| TraceDetail {
                    id: id.clone(),
                    segments: segments.clone(),
                })
            })
            .collect())
    }
}

/// `REPORT` line as emitted by the compute platform.
pub fn report_line(duration_ms: f64, init_ms: f64) -> String {
    format!(
        "REPORT RequestId: 8f5c3a1e-0d9b-4f4e-9a57-1c2b3d4e5f60\tDuration: {duration_ms:.2} ms\tBilled Duration: 100 ms\tMemory Size: 128 MB\tMax Memory Used: 20 MB\tInit Duration: {init_ms:.2} ms\t\n"
    )
}

/// Compute-service segment document with the given phases, in seconds.
pub fn segment(phases: &[(&str, f64, f64)]) -> String {
    let subsegments: Vec<serde_json::Value> = phases
        .iter()
        .map(|(name, start, end)| serde_json::json!({ "name": name, "start_time": start, "end_time": end }))
        .collect();
    serde_json::json!({ "origin": ORIGIN, "subsegments": subsegments }).to_string()
}
