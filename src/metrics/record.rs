//! Per-target timing record.

use serde::{Deserialize, Serialize};

/// Round a duration to the one-decimal precision stored in results.
///
/// Negative and non-finite inputs collapse to zero.
pub fn round_ms(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    (value * 10.0).round() / 10.0
}

/// Cold-start timings measured for one function.
///
/// All durations are milliseconds, non-negative and rounded to one decimal
/// place on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingRecord {
    /// Time spent initializing the runtime before the handler ran.
    pub init_duration_ms: f64,
    /// Time spent in the handler itself.
    pub invocation_duration_ms: f64,
    /// Platform time outside init and invocation (trace backend only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overhead_duration_ms: Option<f64>,
}

impl TimingRecord {
    /// Record without an overhead component (log-report backend).
    pub fn new(init_ms: f64, invocation_ms: f64) -> Self {
        Self {
            init_duration_ms: round_ms(init_ms),
            invocation_duration_ms: round_ms(invocation_ms),
            overhead_duration_ms: None,
        }
    }

    /// Record with an overhead component (trace backend).
    pub fn with_overhead(init_ms: f64, invocation_ms: f64, overhead_ms: f64) -> Self {
        Self {
            overhead_duration_ms: Some(round_ms(overhead_ms)),
            ..Self::new(init_ms, invocation_ms)
        }
    }

    /// Sum of every present duration.
    pub fn total_ms(&self) -> f64 {
        self.init_duration_ms + self.invocation_duration_ms + self.overhead_duration_ms.unwrap_or(0.0)
    }

    pub fn has_overhead(&self) -> bool {
        self.overhead_duration_ms.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_one_decimal() {
        let record = TimingRecord::new(12.34, 56.78);
        assert_eq!(record.init_duration_ms, 12.3);
        assert_eq!(record.invocation_duration_ms, 56.8);
        assert_eq!(record.overhead_duration_ms, None);
    }

    #[test]
    fn test_negative_and_nan_clamp_to_zero() {
        let record = TimingRecord::with_overhead(-4.0, f64::NAN, 0.04);
        assert_eq!(record.init_duration_ms, 0.0);
        assert_eq!(record.invocation_duration_ms, 0.0);
        assert_eq!(record.overhead_duration_ms, Some(0.0));
    }

    #[test]
    fn test_total_sums_present_fields() {
        assert_eq!(TimingRecord::new(100.0, 20.5).total_ms(), 120.5);
        assert_eq!(TimingRecord::with_overhead(100.0, 20.0, 5.0).total_ms(), 125.0);
    }

    #[test]
    fn test_overhead_omitted_from_json_when_absent() {
        let json = serde_json::to_value(TimingRecord::new(1.0, 2.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"init_duration_ms": 1.0, "invocation_duration_ms": 2.0})
        );

        let json = serde_json::to_value(TimingRecord::with_overhead(1.0, 2.0, 0.0)).unwrap();
        assert_eq!(json["overhead_duration_ms"], 0.0);
    }
}
