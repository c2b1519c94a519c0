//! Fan-out collection and merge into a snapshot.
//!
//! # Responsibilities
//! - Query the configured backend once per resolved target
//! - Bound in-flight queries and give each one a deadline
//! - Merge present records into a `MetricsSnapshot`
//! - Report targets without data as diagnostics, not errors
//!
//! # Design Decisions
//! - One Tokio task per target; every task is awaited, so a slow or failing
//!   target never cancels its siblings
//! - Only this module writes the result map, and only after a task completes
//! - Transport errors still abort the run, but only once all tasks finished
//! - An empty snapshot is fatal

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Semaphore;

use crate::config::schema::CollectionConfig;
use crate::metrics::record::TimingRecord;
use crate::metrics::snapshot::MetricsSnapshot;
use crate::resilience::with_deadline;
use crate::resolver::ResolvedTarget;
use crate::telemetry::{TelemetryError, TimingSource};

/// Why a configured target is absent from the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum MissReason {
    /// The stack has no such resource.
    Unresolved,
    /// The backend holds no usable data for the window.
    NoData,
    /// The per-target deadline elapsed.
    TimedOut(Duration),
    /// The collection task panicked or was cancelled.
    TaskFailed(String),
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissReason::Unresolved => write!(f, "not found in stack"),
            MissReason::NoData => write!(f, "no data in lookback window"),
            MissReason::TimedOut(limit) => write!(f, "timed out after {}s", limit.as_secs()),
            MissReason::TaskFailed(e) => write!(f, "collection task failed: {}", e),
        }
    }
}

/// A configured target that produced no record.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingTarget {
    pub label: String,
    pub reason: MissReason,
}

impl MissingTarget {
    pub fn new(label: impl Into<String>, reason: MissReason) -> Self {
        Self {
            label: label.into(),
            reason,
        }
    }
}

/// Errors that end collection for the whole run.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("no target produced timing data ({attempted} queried)")]
    Empty { attempted: usize },
}

/// A non-empty snapshot plus the targets that were left out.
#[derive(Debug, Clone)]
pub struct Collected {
    pub snapshot: MetricsSnapshot,
    pub missing: Vec<MissingTarget>,
}

/// Runs a `TimingSource` across resolved targets.
pub struct Collector {
    source: Arc<dyn TimingSource>,
    target_timeout: Duration,
    max_in_flight: usize,
}

impl Collector {
    pub fn new(source: Arc<dyn TimingSource>, config: &CollectionConfig) -> Self {
        Self {
            source,
            target_timeout: Duration::from_secs(config.target_timeout_secs),
            max_in_flight: config.max_in_flight.max(1),
        }
    }

    pub async fn collect(&self, targets: &[ResolvedTarget]) -> Result<Collected, CollectError> {
        tracing::info!(
            backend = self.source.name(),
            targets = targets.len(),
            max_in_flight = self.max_in_flight,
            "Collecting timings"
        );

        let permits = Arc::new(Semaphore::new(self.max_in_flight));
        let tasks: Vec<_> = targets
            .iter()
            .cloned()
            .map(|target| {
                let label = target.label().to_string();
                let source = Arc::clone(&self.source);
                let permits = Arc::clone(&permits);
                let limit = self.target_timeout;

                let handle = tokio::spawn(async move {
                    let _permit = permits.acquire_owned().await;
                    with_deadline(limit, source.fetch(&target)).await
                });
                (label, handle)
            })
            .collect();

        let mut results: BTreeMap<String, TimingRecord> = BTreeMap::new();
        let mut missing = Vec::new();
        let mut fatal: Option<TelemetryError> = None;

        for (label, handle) in tasks {
            match handle.await {
                Ok(Ok(Some(record))) => {
                    results.insert(label, record);
                }
                Ok(Ok(None)) => missing.push(MissingTarget::new(label, MissReason::NoData)),
                Ok(Err(TelemetryError::Timeout(limit))) => {
                    tracing::warn!(label = %label, timeout_secs = limit.as_secs(), "Target query timed out");
                    missing.push(MissingTarget::new(label, MissReason::TimedOut(limit)));
                }
                Ok(Err(e)) if e.is_per_target() => {
                    tracing::warn!(label = %label, error = %e, "No data for target");
                    missing.push(MissingTarget::new(label, MissReason::NoData));
                }
                Ok(Err(e)) => {
                    tracing::error!(label = %label, error = %e, "Backend request failed");
                    fatal.get_or_insert(e);
                }
                Err(e) => {
                    tracing::error!(label = %label, error = %e, "Collection task failed");
                    missing.push(MissingTarget::new(label, MissReason::TaskFailed(e.to_string())));
                }
            }
        }

        if let Some(e) = fatal {
            return Err(e.into());
        }
        if results.is_empty() {
            return Err(CollectError::Empty {
                attempted: targets.len(),
            });
        }

        Ok(Collected {
            snapshot: MetricsSnapshot::new(results),
            missing,
        })
    }
}
