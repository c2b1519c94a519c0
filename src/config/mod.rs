//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BenchConfig (validated, immutable)
//!     → CLI overrides applied once in main
//!     → passed by reference into the pipeline
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the run starts
//! - All fields have defaults to allow minimal configs
//! - The target set lives here, never in global state
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::BenchConfig;
pub use schema::BenchmarkTarget;
pub use schema::ChartConfig;
pub use schema::TelemetrySource;
