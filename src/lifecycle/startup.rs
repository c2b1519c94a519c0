//! Startup orchestration.
//!
//! # Responsibilities
//! - Apply command-line overrides to the loaded configuration
//! - Load shared AWS settings (credentials chain, region, profile)
//! - Build the stack describer and the configured timing source
//!
//! # Design Decisions
//! - Fail fast: configuration errors end the run before any AWS call
//! - The backend is picked once here; the pipeline only sees `TimingSource`

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::config::schema::{AwsConfig, TelemetrySource};
use crate::config::validation::validate_config;
use crate::config::{BenchConfig, ConfigError};
use crate::resolver::StackDescriber;
use crate::telemetry::{LogReportAdapter, TimingSource, TraceAdapter};

/// Command-line overrides for a collection run. `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub stack_name: Option<String>,
    pub source: Option<TelemetrySource>,
    pub results_path: Option<String>,
    pub chart_path: Option<String>,
    pub no_chart: bool,
}

/// Apply `overrides` and re-validate.
pub fn apply_overrides(mut config: BenchConfig, overrides: Overrides) -> Result<BenchConfig, ConfigError> {
    if let Some(stack_name) = overrides.stack_name {
        config.stack_name = stack_name;
    }
    if let Some(source) = overrides.source {
        config.collection.source = source;
    }
    if let Some(path) = overrides.results_path {
        config.output.results_path = path;
    }
    if let Some(path) = overrides.chart_path {
        config.output.chart_path = path;
    }
    if overrides.no_chart {
        config.chart.enabled = false;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load shared AWS settings from the default provider chain.
pub async fn load_aws_config(aws: &AwsConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &aws.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(profile) = &aws.profile {
        loader = loader.profile_name(profile);
    }

    let sdk = loader.load().await;
    tracing::debug!(
        region = sdk.region().map(|r| r.as_ref()).unwrap_or("<unset>"),
        "AWS configuration loaded"
    );
    sdk
}

/// Stack describer backed by the deployment description service.
pub fn build_describer(sdk: &SdkConfig) -> Arc<dyn StackDescriber> {
    Arc::new(aws_sdk_cloudformation::Client::new(sdk))
}

/// Timing source for the configured backend.
pub fn build_source(config: &BenchConfig, sdk: &SdkConfig) -> Arc<dyn TimingSource> {
    match config.collection.source {
        TelemetrySource::Logs => Arc::new(LogReportAdapter::new(aws_sdk_cloudwatchlogs::Client::new(sdk), config)),
        TelemetrySource::Traces => Arc::new(TraceAdapter::new(aws_sdk_xray::Client::new(sdk), config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_file_values() {
        let config = apply_overrides(
            BenchConfig::default(),
            Overrides {
                stack_name: Some("staging-bench".to_string()),
                source: Some(TelemetrySource::Traces),
                results_path: Some("out/results.json".to_string()),
                chart_path: None,
                no_chart: true,
            },
        )
        .unwrap();

        assert_eq!(config.stack_name, "staging-bench");
        assert_eq!(config.collection.source, TelemetrySource::Traces);
        assert_eq!(config.output.results_path, "out/results.json");
        assert_eq!(config.output.chart_path, "images/benchmark_results.png");
        assert!(!config.chart.enabled);
    }

    #[test]
    fn test_empty_override_is_rejected() {
        let err = apply_overrides(
            BenchConfig::default(),
            Overrides {
                stack_name: Some(String::new()),
                ..Overrides::default()
            },
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = apply_overrides(BenchConfig::default(), Overrides::default()).unwrap();
        assert_eq!(config.stack_name, BenchConfig::default().stack_name);
        assert!(config.chart.enabled);
    }

    #[tokio::test]
    async fn test_explicit_region_wins() {
        let sdk = load_aws_config(&AwsConfig {
            region: Some("eu-west-1".to_string()),
            profile: None,
        })
        .await;
        assert_eq!(sdk.region().map(|r| r.as_ref()), Some("eu-west-1"));
    }
}
