//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap every per-target backend call with a deadline
//! - Report an elapsed deadline as a distinct, per-target error
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from transport errors
//! - A timed-out target is dropped from the run, never retried

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::telemetry::{TelemetryError, TelemetryResult};

/// Run `fut`, failing with `TelemetryError::Timeout` once `limit` elapses.
pub async fn with_deadline<T, F>(limit: Duration, fut: F) -> TelemetryResult<T>
where
    F: Future<Output = TelemetryResult<T>>,
{
    match timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(TelemetryError::Timeout(limit)),
    }
}
