use crate::qkview_analysis::domain::{LogRecord, LogSeverity};
use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};
use std::path::Path;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Controls how a year is chosen for syslog-style `Mon D HH:MM:SS` stamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateParseOptions {
    /// "Now" used for year inference and the future-date check
    pub reference_time: Option<NaiveDateTime>,
    /// Year applied to stamps that carry none; wins over `reference_time`
    pub default_year: Option<i32>,
}

/// Severity and timestamp recognised in one log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub severity: LogSeverity,
    pub timestamp: NaiveDateTime,
}

/// Turns raw log lines into severity-tagged, timestamped classifications
///
/// Lines without a severity word or without a recognised date are rejected.
pub struct LogClassifier {
    options: DateParseOptions,
    severity_pattern: Regex,
    date_with_year_pattern: Regex,
    iso_pattern: Regex,
    rfc3339_pattern: Regex,
    date_without_year_pattern: Regex,
}

impl LogClassifier {
    pub fn new(options: DateParseOptions) -> Self {
        Self {
            options,
            severity_pattern: Regex::new(r"(?i)\b(warning|error|severe|critical|notice)\b")
                .expect("severity pattern is valid"),
            date_with_year_pattern: Regex::new(
                r"\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+([0-9]{1,2})\s+([0-9]{2}:[0-9]{2}:[0-9]{2})\s+([0-9]{4})\b",
            )
            .expect("dated syslog pattern is valid"),
            iso_pattern: Regex::new(
                r"\b([0-9]{4})-([0-9]{2})-([0-9]{2})\s+([0-9]{2}:[0-9]{2}:[0-9]{2})\b",
            )
            .expect("iso pattern is valid"),
            rfc3339_pattern: Regex::new(
                r"\b([0-9]{4})-([0-9]{2})-([0-9]{2})T([0-9]{2}:[0-9]{2}:[0-9]{2})(?:Z|[+-][0-9]{2}:?[0-9]{2})?\b",
            )
            .expect("rfc3339 pattern is valid"),
            date_without_year_pattern: Regex::new(
                r"\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+([0-9]{1,2})\s+([0-9]{2}:[0-9]{2}:[0-9]{2})\b",
            )
            .expect("syslog pattern is valid"),
        }
    }

    pub fn options(&self) -> DateParseOptions {
        self.options
    }

    /// Classifies a line, or `None` when either severity or date is missing
    pub fn classify(&self, line: &str) -> Option<Classification> {
        let severity = self.parse_severity(line)?;
        let timestamp = self.parse_date(line)?;
        Some(Classification {
            severity,
            timestamp,
        })
    }

    /// Builds a LogRecord for `line` when it classifies
    pub fn to_record(&self, path: &Path, line: &str, source: &str) -> Option<LogRecord> {
        self.classify(line).map(|c| {
            LogRecord::new(path, line, c.severity, c.timestamp, source)
        })
    }

    /// First whole-word severity token, case-insensitive
    pub fn parse_severity(&self, line: &str) -> Option<LogSeverity> {
        self.severity_pattern
            .captures(line)
            .and_then(|caps| LogSeverity::from_token(&caps[1]))
    }

    /// Tries each supported date layout in priority order; first valid match wins
    pub fn parse_date(&self, line: &str) -> Option<NaiveDateTime> {
        if let Some(ts) = self
            .date_with_year_pattern
            .captures(line)
            .and_then(|caps| syslog_with_year(&caps))
        {
            return Some(ts);
        }

        if let Some(ts) = self.iso_pattern.captures(line).and_then(|caps| numeric_date(&caps)) {
            return Some(ts);
        }

        // Offset is matched but not applied; stamps are kept as written.
        if let Some(ts) = self
            .rfc3339_pattern
            .captures(line)
            .and_then(|caps| numeric_date(&caps))
        {
            return Some(ts);
        }

        self.date_without_year_pattern
            .captures(line)
            .and_then(|caps| self.syslog_without_year(&caps))
    }

    fn syslog_without_year(&self, caps: &Captures<'_>) -> Option<NaiveDateTime> {
        let now = self.reference_now();
        let year = self.options.default_year.unwrap_or_else(|| now.year());

        let month = month_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let date = yearless_date(year, month, day)?;
        let time = NaiveTime::parse_from_str(&caps[3], "%H:%M:%S").ok()?;
        let timestamp = date.and_time(time);

        // A stamp in the future belongs to the previous year (log spans New Year)
        if timestamp > now {
            return timestamp.checked_sub_months(Months::new(12));
        }
        Some(timestamp)
    }

    fn reference_now(&self) -> NaiveDateTime {
        self.options
            .reference_time
            .unwrap_or_else(|| Local::now().naive_local())
    }
}

impl Default for LogClassifier {
    fn default() -> Self {
        Self::new(DateParseOptions::default())
    }
}

fn month_number(abbrev: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == abbrev)
        .map(|index| index as u32 + 1)
}

/// Calendar date for an inferred year; `Feb 29` in a common year becomes `Mar 1`
fn yearless_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        if month == 2 && day == 29 {
            NaiveDate::from_ymd_opt(year, 3, 1)
        } else {
            None
        }
    })
}

fn syslog_with_year(caps: &Captures<'_>) -> Option<NaiveDateTime> {
    let month = month_number(&caps[1])?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[4].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::parse_from_str(&caps[3], "%H:%M:%S").ok()?;
    Some(date.and_time(time))
}

fn numeric_date(caps: &Captures<'_>) -> Option<NaiveDateTime> {
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::parse_from_str(&caps[4], "%H:%M:%S").ok()?;
    Some(date.and_time(time))
}
