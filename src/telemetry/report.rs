//! Parsing of platform `REPORT` log lines.
//!
//! A cold-start report line looks like:
//!
//! ```text
//! REPORT RequestId: 3f1c…  Duration: 12.34 ms  Billed Duration: 13 ms
//!   Memory Size: 128 MB  Max Memory Used: 64 MB  Init Duration: 250.17 ms
//! ```
//!
//! Warm invocations carry no `Init Duration` and do not parse.

use once_cell::sync::Lazy;
use regex::Regex;

static REPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"Duration:\s+(?P<duration>[\d.]+)\s+ms.*Init Duration:\s+(?P<init>[\d.]+)\s+ms",
    )
    .expect("report pattern is valid")
});

/// The two durations carried by a cold-start report line, unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportDurations {
    /// `Duration`: handler time.
    pub duration_ms: f64,
    /// `Init Duration`: initialization time.
    pub init_duration_ms: f64,
}

/// Extract `Duration` and `Init Duration` from a report line.
///
/// Returns `None` when the line does not match or a value is not a number.
pub fn parse_report_line(message: &str) -> Option<ReportDurations> {
    let caps = REPORT_RE.captures(message)?;
    let duration_ms: f64 = caps.name("duration")?.as_str().parse().ok()?;
    let init_duration_ms: f64 = caps.name("init")?.as_str().parse().ok()?;

    Some(ReportDurations {
        duration_ms,
        init_duration_ms,
    })
}
