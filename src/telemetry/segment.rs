//! Extraction of cold-start phases from trace segment documents.
//!
//! The compute service records one segment per invocation with phase
//! sub-segments:
//!
//! ```text
//! { "origin": "AWS::Lambda::Function",
//!   "subsegments": [ { "name": "Initialization", "start_time": 1.0, "end_time": 1.25 },
//!                    { "name": "Invocation",     ... },
//!                    { "name": "Overhead",       ... } ] }
//! ```

use serde::Deserialize;

use crate::metrics::TimingRecord;

#[derive(Debug, Deserialize)]
struct SegmentDocument {
    #[serde(default)]
    origin: Option<String>,
    #[serde(default)]
    subsegments: Vec<Subsegment>,
}

#[derive(Debug, Deserialize)]
struct Subsegment {
    #[serde(default)]
    name: String,
    #[serde(default)]
    start_time: Option<f64>,
    #[serde(default)]
    end_time: Option<f64>,
}

impl Subsegment {
    /// Elapsed milliseconds; `None` while the sub-segment is still open.
    fn duration_ms(&self) -> Option<f64> {
        Some((self.end_time? - self.start_time?) * 1000.0)
    }
}

/// Timings from the first segment whose `origin` equals `origin`.
///
/// Phases absent from that segment count as zero. Returns `None` when no
/// document carries the origin; unparseable documents are skipped.
pub fn extract_timing<S: AsRef<str>>(documents: &[S], origin: &str) -> Option<TimingRecord> {
    let segment = documents.iter().find_map(|raw| {
        match serde_json::from_str::<SegmentDocument>(raw.as_ref()) {
            Ok(doc) if doc.origin.as_deref() == Some(origin) => Some(doc),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unparseable segment document");
                None
            }
        }
    })?;

    let (mut init, mut invocation, mut overhead) = (0.0, 0.0, 0.0);
    for sub in &segment.subsegments {
        let slot = match sub.name.as_str() {
            "Initialization" => &mut init,
            "Invocation" => &mut invocation,
            "Overhead" => &mut overhead,
            _ => continue,
        };
        if let Some(ms) = sub.duration_ms() {
            *slot = ms;
        }
    }

    Some(TimingRecord::with_overhead(init, invocation, overhead))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "AWS::Lambda::Function";

    #[test]
    fn test_extracts_all_phases() {
        let docs = [
            r#"{"origin":"AWS::Lambda","subsegments":[]}"#,
            r#"{"origin":"AWS::Lambda::Function","subsegments":[
                {"name":"Initialization","start_time":100.0,"end_time":100.2504},
                {"name":"Invocation","start_time":100.2504,"end_time":100.3004},
                {"name":"Overhead","start_time":100.3004,"end_time":100.3024},
                {"name":"DynamoDB","start_time":100.26,"end_time":100.29}
            ]}"#,
        ];

        let record = extract_timing(&docs, ORIGIN).unwrap();
        assert_eq!(record.init_duration_ms, 250.4);
        assert_eq!(record.invocation_duration_ms, 50.0);
        assert_eq!(record.overhead_duration_ms, Some(2.0));
    }

    #[test]
    fn test_partial_segment_defaults_to_zero() {
        let docs = [r#"{"origin":"AWS::Lambda::Function","subsegments":[
            {"name":"Initialization","start_time":10.0,"end_time":10.5}
        ]}"#];

        let record = extract_timing(&docs, ORIGIN).unwrap();
        assert_eq!(record, TimingRecord::with_overhead(500.0, 0.0, 0.0));
    }

    #[test]
    fn test_first_matching_segment_wins() {
        let docs = [
            r#"{"origin":"AWS::Lambda::Function","subsegments":[{"name":"Invocation","start_time":0.0,"end_time":0.1}]}"#,
            r#"{"origin":"AWS::Lambda::Function","subsegments":[{"name":"Invocation","start_time":0.0,"end_time":0.9}]}"#,
        ];

        let record = extract_timing(&docs, ORIGIN).unwrap();
        assert_eq!(record.invocation_duration_ms, 100.0);
    }

    #[test]
    fn test_no_matching_origin() {
        let docs = [r#"{"origin":"AWS::Lambda","subsegments":[]}"#, "not json"];
        assert_eq!(extract_timing(&docs, ORIGIN), None);
        assert_eq!(extract_timing::<&str>(&[], ORIGIN), None);
    }

    #[test]
    fn test_open_subsegment_is_ignored() {
        let docs = [r#"{"origin":"AWS::Lambda::Function","subsegments":[
            {"name":"Invocation","start_time":1.0,"in_progress":true}
        ]}"#];

        let record = extract_timing(&docs, ORIGIN).unwrap();
        assert_eq!(record.invocation_duration_ms, 0.0);
    }
}
