use super::findings::{Recommendation, SslFinding, TimelineEntry, TopError, VirtualServerInfo};
use serde::Serialize;

/// Counts derived from virtual server health and certificate findings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub critical: usize,
    pub warning: usize,
    pub healthy: usize,
    pub certs_expiring_soon: usize,
}

/// Pass-through view of one retained log record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryLog {
    pub message: String,
    pub level: String,
    /// ISO-8601, `YYYY-MM-DDTHH:MM:SSZ`
    pub date: String,
}

/// Complete output of one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: Summary,
    pub error_timeline: Vec<TimelineEntry>,
    pub ssl_findings: Vec<SslFinding>,
    pub top_errors: Vec<TopError>,
    pub recommendations: Vec<Recommendation>,
    pub virtual_servers: Vec<VirtualServerInfo>,
    pub entry_logs: Vec<EntryLog>,
}

impl AnalysisResult {
    /// True when any virtual server is critical or any SSL finding is critical
    pub fn has_critical_findings(&self) -> bool {
        use super::findings::FindingSeverity;

        self.summary.critical > 0
            || self
                .ssl_findings
                .iter()
                .any(|f| f.severity == FindingSeverity::Critical)
    }
}
