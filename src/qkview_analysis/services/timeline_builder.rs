use crate::qkview_analysis::domain::{LogRecord, LogSeverity, TimelineEntry};
use std::collections::BTreeMap;

/// Date string of an unset timestamp; never counted
const ZERO_DATE: &str = "0001-01-01";

/// Builds the per-day count of warning-or-worse records
pub struct TimelineBuilder;

impl TimelineBuilder {
    pub fn new() -> Self {
        Self
    }

    /// One entry per day, ascending by `YYYY-MM-DD`
    pub fn build(&self, records: &[LogRecord]) -> Vec<TimelineEntry> {
        let mut per_day: BTreeMap<String, usize> = BTreeMap::new();

        for record in records {
            if !(record.severity().is_error_class() || record.severity() == LogSeverity::Warning) {
                continue;
            }
            let date = record.timestamp().format("%Y-%m-%d").to_string();
            if date == ZERO_DATE {
                continue;
            }
            *per_day.entry(date).or_insert(0) += 1;
        }

        per_day
            .into_iter()
            .map(|(date, errors)| TimelineEntry { date, errors })
            .collect()
    }
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(severity: LogSeverity, y: i32, m: u32, d: u32) -> LogRecord {
        let ts = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        LogRecord::new("/var/log/ltm", "line", severity, ts, "qkview.tgz")
    }

    #[test]
    fn test_counts_per_day_sorted_ascending() {
        let timeline = TimelineBuilder::new().build(&[
            record(LogSeverity::Error, 2024, 10, 2),
            record(LogSeverity::Warning, 2024, 10, 1),
            record(LogSeverity::Critical, 2024, 10, 2),
            record(LogSeverity::Severe, 2023, 12, 31),
        ]);

        assert_eq!(
            timeline,
            vec![
                TimelineEntry {
                    date: "2023-12-31".to_string(),
                    errors: 1
                },
                TimelineEntry {
                    date: "2024-10-01".to_string(),
                    errors: 1
                },
                TimelineEntry {
                    date: "2024-10-02".to_string(),
                    errors: 2
                },
            ]
        );
    }

    #[test]
    fn test_notice_records_are_ignored() {
        let timeline = TimelineBuilder::new().build(&[record(LogSeverity::Notice, 2024, 1, 1)]);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_zero_date_is_excluded() {
        let timeline = TimelineBuilder::new().build(&[
            record(LogSeverity::Error, 1, 1, 1),
            record(LogSeverity::Error, 2024, 1, 1),
        ]);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].date, "2024-01-01");
    }
}
