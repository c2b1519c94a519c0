//! Lookback window shared by both backends.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Closed time range `[start, end]` a backend query is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl LookbackWindow {
    /// Window of `length` ending now.
    pub fn ending_now(length: Duration) -> Self {
        Self::ending_at(Utc::now(), length)
    }

    /// Window of `length` ending at `end`. A length reaching past the
    /// earliest representable instant is clamped to it.
    pub fn ending_at(end: DateTime<Utc>, length: Duration) -> Self {
        let start = chrono::Duration::from_std(length)
            .ok()
            .and_then(|length| end.checked_sub_signed(length))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { start, end }
    }

    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ten_minute_window() {
        let end = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let window = LookbackWindow::ending_at(end, Duration::from_secs(600));

        assert_eq!(window.end_millis() - window.start_millis(), 600_000);
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 10, 18, 11, 50, 0).unwrap());
    }

    #[test]
    fn test_oversized_window_clamps_to_earliest_instant() {
        let window = LookbackWindow::ending_now(Duration::from_secs(1_000_000_000_000_000));
        assert_eq!(window.start, DateTime::<Utc>::MIN_UTC);
        assert!(window.start_millis() < window.end_millis());

        let window = LookbackWindow::ending_now(Duration::MAX);
        assert_eq!(window.start, DateTime::<Utc>::MIN_UTC);
    }
}
