use crate::qkview_analysis::domain::{LogRecord, TopError};
use crate::shared::text::truncate_with_ellipsis;
use chrono::NaiveDateTime;
use regex::Regex;
use std::collections::HashMap;

const TOP_ERROR_LIMIT: usize = 10;
const MESSAGE_MAX_LEN: usize = 150;

/// Markers searched (case-insensitively, in order) to find where the
/// human-readable part of an error line starts.
const MESSAGE_MARKERS: [&str; 5] = [": error:", ": warning:", ": critical:", "error:", "err:"];

struct ErrorGroup {
    representative: String,
    count: usize,
    last_occurred: NaiveDateTime,
}

/// Groups recurring error lines and reports the most frequent ones
///
/// The grouping key masks IPv4 addresses and ports, collapses whitespace and
/// lower-cases the line. Timestamps embedded in the line are left in place,
/// so lines that differ only by their stamp land in separate groups.
pub struct ErrorAnalyzer {
    ip_pattern: Regex,
    port_pattern: Regex,
}

impl ErrorAnalyzer {
    pub fn new() -> Self {
        Self {
            ip_pattern: Regex::new(r"[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}")
                .expect("ip pattern is valid"),
            port_pattern: Regex::new(r":[0-9]{2,5}\b").expect("port pattern is valid"),
        }
    }

    /// Up to ten groups, most frequent first; equal counts keep first-seen order
    pub fn analyze(&self, records: &[LogRecord]) -> Vec<TopError> {
        let mut groups: Vec<ErrorGroup> = Vec::new();
        let mut index_by_key: HashMap<String, usize> = HashMap::new();

        for record in records.iter().filter(|r| r.severity().is_error_class()) {
            let key = self.grouping_key(record.line());

            match index_by_key.get(&key) {
                Some(&index) => {
                    let group = &mut groups[index];
                    group.count += 1;
                    if record.timestamp() > group.last_occurred {
                        group.last_occurred = record.timestamp();
                        group.representative = record.line().to_string();
                    }
                }
                None => {
                    index_by_key.insert(key, groups.len());
                    groups.push(ErrorGroup {
                        representative: record.line().to_string(),
                        count: 1,
                        last_occurred: record.timestamp(),
                    });
                }
            }
        }

        let mut top: Vec<TopError> = groups
            .into_iter()
            .map(|group| TopError {
                message: extract_error_message(&group.representative),
                count: group.count,
                last_occurred: group.last_occurred,
            })
            .collect();

        top.sort_by(|a, b| b.count.cmp(&a.count));
        top.truncate(TOP_ERROR_LIMIT);
        top
    }

    /// IP/port-masked, whitespace-collapsed, lower-cased line
    pub fn grouping_key(&self, line: &str) -> String {
        let masked = self.ip_pattern.replace_all(line, "X.X.X.X");
        let masked = self.port_pattern.replace_all(&masked, ":XXXX");
        masked
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

impl Default for ErrorAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Text after the first known marker, or the whole line, capped at 150 bytes
pub fn extract_error_message(line: &str) -> String {
    let lower = line.to_ascii_lowercase();
    for marker in MESSAGE_MARKERS {
        if let Some(index) = lower.find(marker) {
            let message = line[index + marker.len()..].trim();
            return truncate_with_ellipsis(message, MESSAGE_MAX_LEN);
        }
    }
    truncate_with_ellipsis(line, MESSAGE_MAX_LEN)
}
