//! Structured logging.
//!
//! # Responsibilities
//! - Install the global `tracing` subscriber once per process
//! - Pick the output format (pretty for terminals, JSON for CI logs)
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level
//! - The configured level only applies to this crate, so AWS SDK internals
//!   stay quiet unless `RUST_LOG` asks for them

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::config::schema::{LogFormat, ObservabilityConfig};

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(level: &str) -> String {
    format!("{}={}", env!("CARGO_CRATE_NAME"), level.trim().to_lowercase())
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)))
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    let pretty = (config.log_format == LogFormat::Pretty).then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));
    let json = (config.log_format == LogFormat::Json).then(|| fmt::layer().json().with_current_span(true).with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter(&config.log_level))
        .with(pretty)
        .with(json)
        .try_init()
}
