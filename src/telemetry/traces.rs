//! Trace backend.
//!
//! # Responsibilities
//! - Page through trace summaries for the target's service
//! - Pick the slowest trace in the window
//! - Fetch its segments and extract the compute-service phases

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_xray::error::DisplayErrorContext;
use aws_sdk_xray::primitives::DateTime;
use aws_sdk_xray::Client;

use crate::config::BenchConfig;
use crate::metrics::TimingRecord;
use crate::resolver::ResolvedTarget;
use crate::telemetry::segment::extract_timing;
use crate::telemetry::window::LookbackWindow;
use crate::telemetry::{TelemetryError, TelemetryResult, TimingSource};

/// One trace summary.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSummary {
    pub id: String,
    /// End-to-end response time in seconds.
    pub response_time: f64,
}

/// One page of trace summaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryPage {
    pub summaries: Vec<TraceSummary>,
    pub next_token: Option<String>,
}

/// Full trace detail: raw segment documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceDetail {
    pub id: String,
    pub segments: Vec<String>,
}

/// Read-only tracing store.
#[async_trait]
pub trait TraceStore: Send + Sync {
    /// One page of summaries matching `filter` inside `window`.
    async fn summaries_page(
        &self,
        filter: &str,
        window: &LookbackWindow,
        next_token: Option<String>,
    ) -> TelemetryResult<SummaryPage>;

    /// Full detail for `ids`.
    async fn batch_traces(&self, ids: &[String]) -> TelemetryResult<Vec<TraceDetail>>;
}

/// Slowest summary; ties keep the earliest.
fn slowest(summaries: &[TraceSummary]) -> Option<&TraceSummary> {
    summaries.iter().fold(None, |best, s| match best {
        Some(b) if b.response_time >= s.response_time => Some(b),
        _ => Some(s),
    })
}

/// Reads cold-start phases from the tracing store.
pub struct TraceAdapter<S> {
    store: S,
    origin: String,
    max_pages: usize,
    lookback: Duration,
}

impl<S: TraceStore> TraceAdapter<S> {
    pub fn new(store: S, config: &BenchConfig) -> Self {
        Self {
            store,
            origin: config.traces.segment_origin.clone(),
            max_pages: config.traces.max_pages,
            lookback: Duration::from_secs(config.collection.lookback_secs),
        }
    }

    /// Filter expression selecting `physical_id`'s traces.
    pub fn filter_expression(physical_id: &str) -> String {
        format!("service(\"{}\")", physical_id.replace('"', "\\\""))
    }

    async fn all_summaries(&self, filter: &str, window: &LookbackWindow) -> TelemetryResult<Vec<TraceSummary>> {
        let mut summaries = Vec::new();
        let mut next_token = None;

        for page_no in 1..=self.max_pages {
            let page = self.store.summaries_page(filter, window, next_token).await?;
            summaries.extend(page.summaries);

            match page.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => return Ok(summaries),
            }

            if page_no == self.max_pages {
                tracing::warn!(filter = %filter, max_pages = self.max_pages, "Trace summary page limit reached");
            }
        }

        Ok(summaries)
    }
}

#[async_trait]
impl<S: TraceStore> TimingSource for TraceAdapter<S> {
    fn name(&self) -> &'static str {
        "traces"
    }

    async fn fetch(&self, target: &ResolvedTarget) -> TelemetryResult<Option<TimingRecord>> {
        let window = LookbackWindow::ending_now(self.lookback);
        let filter = Self::filter_expression(&target.physical_id);

        let summaries = self.all_summaries(&filter, &window).await?;
        let Some(selected) = slowest(&summaries) else {
            tracing::warn!(
                label = %target.label(),
                logical_id = %target.logical_id(),
                filter = %filter,
                "No traces in lookback window"
            );
            return Ok(None);
        };

        tracing::debug!(
            label = %target.label(),
            trace_id = %selected.id,
            response_time = selected.response_time,
            candidates = summaries.len(),
            "Selected trace"
        );

        let traces = self.store.batch_traces(std::slice::from_ref(&selected.id)).await?;
        let record = traces
            .iter()
            .find_map(|trace| extract_timing(&trace.segments, &self.origin));

        match record {
            Some(record) => {
                tracing::info!(
                    label = %target.label(),
                    init_ms = record.init_duration_ms,
                    invocation_ms = record.invocation_duration_ms,
                    overhead_ms = record.overhead_duration_ms.unwrap_or(0.0),
                    "Collected trace"
                );
                Ok(Some(record))
            }
            None => {
                tracing::warn!(
                    label = %target.label(),
                    trace_id = %selected.id,
                    origin = %self.origin,
                    "Trace has no compute-service segment"
                );
                Ok(None)
            }
        }
    }
}

fn transport<E>(err: E) -> TelemetryError
where
    E: std::error::Error,
{
    TelemetryError::transport("xray", DisplayErrorContext(&err).to_string())
}

#[async_trait]
impl TraceStore for Client {
    async fn summaries_page(
        &self,
        filter: &str,
        window: &LookbackWindow,
        next_token: Option<String>,
    ) -> TelemetryResult<SummaryPage> {
        let output = self
            .get_trace_summaries()
            .start_time(DateTime::from_millis(window.start_millis()))
            .end_time(DateTime::from_millis(window.end_millis()))
            .filter_expression(filter)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(transport)?;

        let summaries = output
            .trace_summaries()
            .iter()
            .filter_map(|s| {
                Some(TraceSummary {
                    id: s.id()?.to_string(),
                    response_time: s.response_time().unwrap_or(0.0),
                })
            })
            .collect();

        Ok(SummaryPage {
            summaries,
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn batch_traces(&self, ids: &[String]) -> TelemetryResult<Vec<TraceDetail>> {
        let output = self
            .batch_get_traces()
            .set_trace_ids(Some(ids.to_vec()))
            .send()
            .await
            .map_err(transport)?;

        Ok(output
            .traces()
            .iter()
            .map(|trace| TraceDetail {
                id: trace.id().unwrap_or_default().to_string(),
                segments: trace
                    .segments()
                    .iter()
                    .filter_map(|segment| segment.document().map(str::to_string))
                    .collect(),
            })
            .collect())
    }
}
