//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! resolver / telemetry / metrics / sink / chart
//!     → tracing events with structured fields (label, physical_id, ...)
//!     → run span (run_id, UUID v4) opened in main
//!     → logging.rs subscriber (EnvFilter → pretty or JSON fmt layer)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - Structured fields instead of formatted strings where a value is useful
//!   to filter on
//! - The run id ties every line of one invocation together

pub mod logging;

pub use logging::init_logging;
