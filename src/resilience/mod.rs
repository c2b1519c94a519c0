//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Per-target backend query:
//!     → timeouts.rs (enforce the per-target deadline)
//!     → On timeout: target reported missing, siblings unaffected
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every backend call has a deadline
//! - No retries at this layer; the AWS SDK retries transient faults itself

pub mod timeouts;

pub use timeouts::with_deadline;
