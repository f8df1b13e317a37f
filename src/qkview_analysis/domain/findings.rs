use crate::shared::text::serialize_iso;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Severity of an SSL/TLS finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    Critical,
    Warning,
}

impl FindingSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingType {
    Certificate,
    Cipher,
    Configuration,
}

impl FindingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Certificate => "certificate",
            Self::Cipher => "cipher",
            Self::Configuration => "configuration",
        }
    }
}

impl fmt::Display for FindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected SSL/TLS posture issue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SslFinding {
    pub severity: FindingSeverity,
    #[serde(rename = "type")]
    pub finding_type: FindingType,
    pub message: String,
    pub detail: String,
    #[serde(rename = "affectedVS")]
    pub affected_virtual_servers: Vec<String>,
}

impl SslFinding {
    /// Identity used to suppress repeated findings: type followed by message
    pub fn dedup_key(&self) -> String {
        format!("{}{}", self.finding_type.as_str(), self.message)
    }
}

/// A recurring error group, represented by its most recent occurrence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopError {
    pub message: String,
    pub count: usize,
    #[serde(serialize_with = "serialize_iso")]
    pub last_occurred: NaiveDateTime,
}

/// Number of warning-or-worse records on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// `YYYY-MM-DD`
    pub date: String,
    pub errors: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServerInfo {
    pub name: String,
    /// Referenced pool name, empty when the virtual server has none
    pub pool: String,
    pub status: HealthStatus,
    /// `active/total`
    pub active_members: String,
    /// `<message> - <YYYY-MM-DD HH:MM:SS>`
    pub last_error: Option<String>,
}

/// Recommendation priority; declaration order is the sort rank
///
/// There is no `warning` priority. A warning-severity SSL finding maps to
/// `High`, one step below critical findings and above recurring-error
/// recommendations of medium priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl From<FindingSeverity> for Priority {
    fn from(severity: FindingSeverity) -> Self {
        match severity {
            FindingSeverity::Critical => Self::Critical,
            FindingSeverity::Warning => Self::High,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub impact: String,
}

impl Recommendation {
    pub fn new(
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
        impact: impl Into<String>,
    ) -> Self {
        Self {
            priority,
            title: title.into(),
            description: description.into(),
            impact: impact.into(),
        }
    }

    /// Identity used for de-duplication: title followed by priority
    pub fn dedup_key(&self) -> String {
        format!("{}{}", self.title, self.priority.as_str())
    }
}
