//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → CLI overrides → Validate → AWS settings → Build backends
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then AWS clients, then the pipeline
//! - The process runs once and exits; there is no shutdown phase to manage

pub mod startup;

pub use startup::{apply_overrides, build_describer, build_source, load_aws_config, Overrides};
