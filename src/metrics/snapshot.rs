//! Canonical results table for one run.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::record::TimingRecord;

/// Timings for every target that produced data, stamped with the time the
/// table was built. A label missing from `results` means that target had no
/// usable data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub results: BTreeMap<String, TimingRecord>,
}

impl MetricsSnapshot {
    /// Snapshot stamped with the current UTC instant.
    pub fn new(results: BTreeMap<String, TimingRecord>) -> Self {
        Self::at(Utc::now(), results)
    }

    pub fn at(timestamp: DateTime<Utc>, results: BTreeMap<String, TimingRecord>) -> Self {
        Self { timestamp, results }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when any record carries an overhead component.
    pub fn has_overhead(&self) -> bool {
        self.results.values().any(TimingRecord::has_overhead)
    }
}
