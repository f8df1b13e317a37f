use crate::qkview_analysis::domain::{
    FindingType, HealthStatus, SslFinding, Summary, VirtualServerInfo,
};

/// Tallies virtual server health and certificate findings into a Summary
pub struct SummaryAggregator;

impl SummaryAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(
        &self,
        virtual_servers: &[VirtualServerInfo],
        ssl_findings: &[SslFinding],
    ) -> Summary {
        let mut summary = Summary::default();

        for vs in virtual_servers {
            match vs.status {
                HealthStatus::Critical => summary.critical += 1,
                HealthStatus::Warning => summary.warning += 1,
                HealthStatus::Healthy => summary.healthy += 1,
            }
        }

        // Every certificate finding is either critical or warning
        summary.certs_expiring_soon = ssl_findings
            .iter()
            .filter(|f| f.finding_type == FindingType::Certificate)
            .count();

        summary
    }
}

impl Default for SummaryAggregator {
    fn default() -> Self {
        Self::new()
    }
}
