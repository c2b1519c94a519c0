//! Resource resolution subsystem.
//!
//! # Data Flow
//! ```text
//! BenchConfig.targets (logical ids + labels)
//!     → StackDescriber::physical_id (one lookup per target, sequential)
//!     → ResolvedTarget (label + physical function name)
//! ```
//!
//! # Design Decisions
//! - A target missing from the stack is dropped, not fatal
//! - Any other API error aborts the run (credentials/environment problem)
//! - No retries: lookups are cheap and the SDK already retries transient faults

pub mod cloudformation;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::BenchmarkTarget;

/// Errors that abort resolution as a whole.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The deployment description service call itself failed.
    #[error("stack lookup for '{logical_id}' failed: {message}")]
    Api { logical_id: String, message: String },

    /// The service answered but gave no physical id for an existing resource.
    #[error("stack resource '{0}' has no physical id")]
    MissingPhysicalId(String),
}

/// Result type for resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Read-only view of a deployed stack.
#[async_trait]
pub trait StackDescriber: Send + Sync {
    /// Physical id of `logical_id` in `stack`, or `None` when the stack has no
    /// such resource.
    async fn physical_id(&self, stack: &str, logical_id: &str) -> ResolveResult<Option<String>>;
}

/// A benchmark target bound to its deployed function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub target: BenchmarkTarget,
    pub physical_id: String,
}

impl ResolvedTarget {
    pub fn new(target: BenchmarkTarget, physical_id: impl Into<String>) -> Self {
        Self {
            target,
            physical_id: physical_id.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.target.label
    }

    pub fn logical_id(&self) -> &str {
        &self.target.logical_id
    }
}

/// Outcome of resolving the configured target set.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Targets found in the stack, in configuration order.
    pub resolved: Vec<ResolvedTarget>,
    /// Targets the stack does not contain.
    pub unresolved: Vec<BenchmarkTarget>,
}

/// Resolve every target against `stack`, one lookup at a time.
pub async fn resolve_targets(
    describer: &dyn StackDescriber,
    stack: &str,
    targets: &[BenchmarkTarget],
) -> ResolveResult<Resolution> {
    let mut resolution = Resolution::default();

    for target in targets {
        match describer.physical_id(stack, &target.logical_id).await? {
            Some(physical_id) => {
                tracing::info!(
                    label = %target.label,
                    logical_id = %target.logical_id,
                    physical_id = %physical_id,
                    "Resolved target"
                );
                resolution.resolved.push(ResolvedTarget::new(target.clone(), physical_id));
            }
            None => {
                tracing::warn!(
                    label = %target.label,
                    logical_id = %target.logical_id,
                    stack = %stack,
                    "Target not found in stack, skipping"
                );
                resolution.unresolved.push(target.clone());
            }
        }
    }

    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedStack {
        resources: HashMap<&'static str, &'static str>,
        broken: Option<&'static str>,
    }

    #[async_trait]
    impl StackDescriber for FixedStack {
        async fn physical_id(&self, _stack: &str, logical_id: &str) -> ResolveResult<Option<String>> {
            if self.broken == Some(logical_id) {
                return Err(ResolveError::Api {
                    logical_id: logical_id.to_string(),
                    message: "AccessDenied".to_string(),
                });
            }
            Ok(self.resources.get(logical_id).map(|id| id.to_string()))
        }
    }

    fn targets() -> Vec<BenchmarkTarget> {
        vec![
            BenchmarkTarget::new("GoFunction", "Go"),
            BenchmarkTarget::new("RubyFunction", "Ruby"),
            BenchmarkTarget::new("RustFunction", "Rust"),
        ]
    }

    #[tokio::test]
    async fn test_missing_targets_are_dropped() {
        let stack = FixedStack {
            resources: HashMap::from([("GoFunction", "bench-Go-abc"), ("RustFunction", "bench-Rust-def")]),
            broken: None,
        };

        let resolution = resolve_targets(&stack, "bench", &targets()).await.unwrap();

        let labels: Vec<_> = resolution.resolved.iter().map(ResolvedTarget::label).collect();
        assert_eq!(labels, vec!["Go", "Rust"]);
        assert_eq!(resolution.resolved[1].physical_id, "bench-Rust-def");
        assert_eq!(resolution.resolved[1].logical_id(), "RustFunction");
        assert_eq!(resolution.unresolved, vec![BenchmarkTarget::new("RubyFunction", "Ruby")]);
    }

    #[tokio::test]
    async fn test_api_error_aborts() {
        let stack = FixedStack {
            resources: HashMap::from([("GoFunction", "bench-Go-abc")]),
            broken: Some("RubyFunction"),
        };

        let err = resolve_targets(&stack, "bench", &targets()).await.unwrap_err();
        assert!(err.to_string().contains("RubyFunction"));
    }
}
