//! Telemetry backend subsystem.
//!
//! # Data Flow
//! ```text
//! ResolvedTarget
//!     → window.rs (lookback window ending now)
//!     → logs.rs   (log group → newest REPORT line → report.rs parse)
//!       or
//!       traces.rs (trace summaries → slowest trace → segment.rs extract)
//!     → Option<TimingRecord>
//! ```
//!
//! # Design Decisions
//! - Both backends implement one capability, `TimingSource`
//! - Missing data is `Ok(None)` plus a warning, never an error
//! - Errors are reserved for transport/auth failures and deadlines
//! - Backend stores are traits so adapters run against in-memory fakes

pub mod logs;
pub mod report;
pub mod segment;
pub mod traces;
pub mod window;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::metrics::TimingRecord;
use crate::resolver::ResolvedTarget;

pub use logs::{LogReportAdapter, LogStore};
pub use traces::{TraceAdapter, TraceStore};
pub use window::LookbackWindow;

/// Errors raised while querying a telemetry backend.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The target's log group does not exist.
    #[error("log group not found: {0}")]
    LogGroupNotFound(String),

    /// The backend call itself failed (network, credentials, throttling).
    #[error("{backend} request failed: {message}")]
    Transport {
        backend: &'static str,
        message: String,
    },

    /// The per-target deadline elapsed.
    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl TelemetryError {
    pub fn transport(backend: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            backend,
            message: message.into(),
        }
    }

    /// Whether the condition only affects the target it was raised for.
    pub fn is_per_target(&self) -> bool {
        matches!(self, Self::LogGroupNotFound(_) | Self::Timeout(_))
    }
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Something that can measure a resolved target's cold start.
#[async_trait]
pub trait TimingSource: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Latest cold-start timings for `target`, or `None` if the backend holds
    /// no usable data for it.
    async fn fetch(&self, target: &ResolvedTarget) -> TelemetryResult<Option<TimingRecord>>;
}
