//! Metrics model and normalization.
//!
//! # Data Flow
//! ```text
//! ResolvedTarget[]
//!     → normalizer.rs (one task per target, deadline, merge)
//!     → record.rs     (TimingRecord, rounded to 0.1 ms)
//!     → snapshot.rs   (MetricsSnapshot: timestamp + label → record)
//!     → sink / chart (read-only)
//! ```

pub mod normalizer;
pub mod record;
pub mod snapshot;

pub use normalizer::{CollectError, Collected, Collector, MissReason, MissingTarget};
pub use record::TimingRecord;
pub use snapshot::MetricsSnapshot;
