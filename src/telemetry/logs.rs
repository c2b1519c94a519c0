//! Log-report backend.
//!
//! # Responsibilities
//! - Query the target's log group for recent cold-start `REPORT` lines
//! - Pick the newest matching event
//! - Parse it into a `TimingRecord`

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_cloudwatchlogs::error::DisplayErrorContext;
use aws_sdk_cloudwatchlogs::Client;

use crate::config::BenchConfig;
use crate::metrics::TimingRecord;
use crate::resolver::ResolvedTarget;
use crate::telemetry::report::parse_report_line;
use crate::telemetry::window::LookbackWindow;
use crate::telemetry::{TelemetryError, TelemetryResult, TimingSource};

/// A filtered log query.
#[derive(Debug, Clone, PartialEq)]
pub struct LogQuery {
    pub log_group: String,
    pub window: LookbackWindow,
    pub filter_pattern: String,
    pub limit: i32,
}

/// One raw log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// Event time, epoch milliseconds.
    pub timestamp: Option<i64>,
    pub message: String,
}

/// Read-only log store.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Events matching `query`. A missing log group is reported as
    /// `TelemetryError::LogGroupNotFound`.
    async fn filter_events(&self, query: &LogQuery) -> TelemetryResult<Vec<LogEvent>>;
}

/// Newest event: highest timestamp, ties and missing timestamps resolved in
/// favour of the later list position.
fn newest(events: &[LogEvent]) -> Option<&LogEvent> {
    events
        .iter()
        .enumerate()
        .max_by_key(|(i, event)| (event.timestamp.unwrap_or(i64::MIN), *i))
        .map(|(_, event)| event)
}

/// Reads cold-start timings from platform report lines.
pub struct LogReportAdapter<S> {
    store: S,
    namespace: String,
    filter_pattern: String,
    limit: i32,
    lookback: Duration,
}

impl<S: LogStore> LogReportAdapter<S> {
    pub fn new(store: S, config: &BenchConfig) -> Self {
        Self {
            store,
            namespace: config.log_namespace.trim_matches('/').to_string(),
            filter_pattern: config.logs.filter_pattern.clone(),
            limit: config.logs.limit,
            lookback: Duration::from_secs(config.collection.lookback_secs),
        }
    }

    /// Log group holding `physical_id`'s output.
    pub fn log_group(&self, physical_id: &str) -> String {
        format!("/{}/{}", self.namespace, physical_id)
    }
}

#[async_trait]
impl<S: LogStore> TimingSource for LogReportAdapter<S> {
    fn name(&self) -> &'static str {
        "logs"
    }

    async fn fetch(&self, target: &ResolvedTarget) -> TelemetryResult<Option<TimingRecord>> {
        let query = LogQuery {
            log_group: self.log_group(&target.physical_id),
            window: LookbackWindow::ending_now(self.lookback),
            filter_pattern: self.filter_pattern.clone(),
            limit: self.limit,
        };

        let events = match self.store.filter_events(&query).await {
            Ok(events) => events,
            Err(TelemetryError::LogGroupNotFound(group)) => {
                tracing::warn!(label = %target.label(), log_group = %group, "Log group not found");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let Some(event) = newest(&events) else {
            tracing::warn!(
                label = %target.label(),
                logical_id = %target.logical_id(),
                physical_id = %target.physical_id,
                "No REPORT line in lookback window"
            );
            return Ok(None);
        };

        let Some(parsed) = parse_report_line(&event.message) else {
            tracing::warn!(
                label = %target.label(),
                message = %event.message.trim_end(),
                "Failed to parse REPORT line"
            );
            return Ok(None);
        };

        let record = TimingRecord::new(parsed.init_duration_ms, parsed.duration_ms);
        tracing::info!(
            label = %target.label(),
            init_ms = record.init_duration_ms,
            duration_ms = record.invocation_duration_ms,
            "Collected report"
        );
        Ok(Some(record))
    }
}

#[async_trait]
impl LogStore for Client {
    async fn filter_events(&self, query: &LogQuery) -> TelemetryResult<Vec<LogEvent>> {
        let output = self
            .filter_log_events()
            .log_group_name(&query.log_group)
            .start_time(query.window.start_millis())
            .end_time(query.window.end_millis())
            .filter_pattern(&query.filter_pattern)
            .limit(query.limit)
            .send()
            .await
            .map_err(|err| {
                let not_found = err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception());
                if not_found {
                    TelemetryError::LogGroupNotFound(query.log_group.clone())
                } else {
                    TelemetryError::transport("logs", DisplayErrorContext(&err).to_string())
                }
            })?;

        Ok(output
            .events()
            .iter()
            .filter_map(|event| {
                event.message().map(|message| LogEvent {
                    timestamp: event.timestamp(),
                    message: message.to_string(),
                })
            })
            .collect())
    }
}
