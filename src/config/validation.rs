//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check target identity (non-empty, unique logical ids and labels)
//! - Validate value ranges (windows and deadlines > 0, fractions in range)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BenchConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use crate::config::schema::BenchConfig;

/// Longest accepted lookback window: one week.
pub const MAX_LOOKBACK_SECS: u64 = 7 * 24 * 60 * 60;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration, collecting every violation.
pub fn validate_config(config: &BenchConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.stack_name.trim().is_empty() {
        errors.push(ValidationError::new("stack_name", "must not be empty"));
    }
    if config.log_namespace.trim_matches('/').is_empty() {
        errors.push(ValidationError::new("log_namespace", "must not be empty"));
    }

    validate_targets(config, &mut errors);

    let collection = &config.collection;
    if collection.lookback_secs == 0 {
        errors.push(ValidationError::new("collection.lookback_secs", "must be greater than 0"));
    } else if collection.lookback_secs > MAX_LOOKBACK_SECS {
        errors.push(ValidationError::new(
            "collection.lookback_secs",
            format!("must be at most {} (7 days)", MAX_LOOKBACK_SECS),
        ));
    }
    if collection.target_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "collection.target_timeout_secs",
            "must be greater than 0",
        ));
    }
    if collection.max_in_flight == 0 {
        errors.push(ValidationError::new("collection.max_in_flight", "must be greater than 0"));
    }

    if !(1..=10_000).contains(&config.logs.limit) {
        errors.push(ValidationError::new("logs.limit", "must be between 1 and 10000"));
    }
    if config.traces.max_pages == 0 {
        errors.push(ValidationError::new("traces.max_pages", "must be greater than 0"));
    }
    if config.traces.segment_origin.is_empty() {
        errors.push(ValidationError::new("traces.segment_origin", "must not be empty"));
    }

    let chart = &config.chart;
    if !(chart.min_label_fraction > 0.0 && chart.min_label_fraction < 1.0) {
        errors.push(ValidationError::new(
            "chart.min_label_fraction",
            "must be between 0 and 1 (exclusive)",
        ));
    }
    if !(chart.min_label_ms >= 0.0) {
        errors.push(ValidationError::new("chart.min_label_ms", "must not be negative"));
    }
    if !(chart.axis_padding > 1.0) {
        errors.push(ValidationError::new("chart.axis_padding", "must be greater than 1"));
    }
    if chart.width_px == 0 || chart.height_px == 0 {
        errors.push(ValidationError::new("chart", "width_px and height_px must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_targets(config: &BenchConfig, errors: &mut Vec<ValidationError>) {
    if config.targets.is_empty() {
        errors.push(ValidationError::new("targets", "at least one target is required"));
        return;
    }

    let mut logical_ids = HashSet::new();
    let mut labels = HashSet::new();

    for (i, target) in config.targets.iter().enumerate() {
        let field = format!("targets[{}]", i);
        if target.logical_id.trim().is_empty() {
            errors.push(ValidationError::new(&field, "logical_id must not be empty"));
        } else if !logical_ids.insert(target.logical_id.as_str()) {
            errors.push(ValidationError::new(
                &field,
                format!("duplicate logical_id '{}'", target.logical_id),
            ));
        }

        if target.label.trim().is_empty() {
            errors.push(ValidationError::new(&field, "label must not be empty"));
        } else if !labels.insert(target.label.as_str()) {
            errors.push(ValidationError::new(&field, format!("duplicate label '{}'", target.label)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::BenchmarkTarget;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&BenchConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = BenchConfig::default();
        config.collection.lookback_secs = 0;
        config.collection.max_in_flight = 0;
        config.chart.axis_padding = 1.0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["collection.lookback_secs", "collection.max_in_flight", "chart.axis_padding"]
        );
    }

    #[test]
    fn test_duplicate_targets_rejected() {
        let mut config = BenchConfig::default();
        config.targets = vec![
            BenchmarkTarget::new("GoFunction", "Go"),
            BenchmarkTarget::new("GoFunction", "Golang"),
            BenchmarkTarget::new("RustFunction", "Go"),
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("duplicate logical_id 'GoFunction'"));
        assert!(errors[1].message.contains("duplicate label 'Go'"));
    }

    #[test]
    fn test_lookback_upper_bound() {
        let mut config = BenchConfig::default();
        config.collection.lookback_secs = MAX_LOOKBACK_SECS;
        assert!(validate_config(&config).is_ok());

        config.collection.lookback_secs = 1_000_000_000_000_000;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "collection.lookback_secs");
        assert!(errors[0].message.contains("at most 604800"));
    }

    #[test]
    fn test_label_fraction_bounds() {
        let mut config = BenchConfig::default();
        config.chart.min_label_fraction = 1.0;
        assert!(validate_config(&config).is_err());

        config.chart.min_label_fraction = 0.25;
        assert!(validate_config(&config).is_ok());
    }
}
