use crate::qkview_analysis::domain::{
    FindingType, Priority, Recommendation, SslFinding, Summary, TopError,
};
use crate::shared::text::format_display;
use std::collections::HashSet;

const RECOMMENDATION_LIMIT: usize = 10;
const RECURRING_ERROR_THRESHOLD: usize = 10;
const CRITICAL_EVENT_THRESHOLD: usize = 10;

/// Turns findings into a prioritized, de-duplicated action list
///
/// Generation order is SSL findings, then recurring errors, then the two
/// summary thresholds. The list is then stable-sorted by priority, reduced
/// to the first recommendation per title and priority, and capped at ten.
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        summary: &Summary,
        ssl_findings: &[SslFinding],
        top_errors: &[TopError],
    ) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = ssl_findings
            .iter()
            .map(ssl_recommendation)
            .chain(top_errors.iter().filter_map(error_recommendation))
            .collect();

        if summary.critical > CRITICAL_EVENT_THRESHOLD {
            recommendations.push(Recommendation::new(
                Priority::Critical,
                "High number of critical events",
                format!(
                    "{} critical events detected. Immediate investigation required.",
                    summary.critical
                ),
                "System stability and security may be compromised",
            ));
        }

        if summary.certs_expiring_soon > 0 {
            recommendations.push(Recommendation::new(
                Priority::Critical,
                "Certificate renewal required",
                format!(
                    "{} certificate(s) expiring soon. Plan renewal immediately.",
                    summary.certs_expiring_soon
                ),
                "Service interruption for HTTPS traffic",
            ));
        }

        // sort_by_key is stable
        recommendations.sort_by_key(|r| r.priority.rank());

        let mut deduplicated = deduplicate(recommendations);
        deduplicated.truncate(RECOMMENDATION_LIMIT);
        deduplicated
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the first recommendation for each title and priority
pub fn deduplicate(recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    let mut seen = HashSet::new();
    recommendations
        .into_iter()
        .filter(|r| seen.insert(r.dedup_key()))
        .collect()
}

fn ssl_recommendation(finding: &SslFinding) -> Recommendation {
    let (title, description) = match finding.finding_type {
        FindingType::Certificate => (
            "SSL Certificate Issue",
            format!("{}. {}", finding.message, finding.detail),
        ),
        FindingType::Cipher => (
            "SSL/TLS Configuration Issue",
            format!("{}. {}", finding.message, finding.detail),
        ),
        FindingType::Configuration => ("SSL Configuration Issue", finding.message.clone()),
    };

    Recommendation::new(
        Priority::from(finding.severity),
        title,
        description,
        affected_servers_impact(&finding.affected_virtual_servers),
    )
}

fn error_recommendation(error: &TopError) -> Option<Recommendation> {
    if error.count < RECURRING_ERROR_THRESHOLD {
        return None;
    }

    let priority = if error.count > 500 {
        Priority::Critical
    } else if error.count > 100 {
        Priority::High
    } else {
        Priority::Medium
    };

    Some(Recommendation::new(
        priority,
        "Investigate recurring error",
        format!("Error occurred {} times: {}", error.count, error.message),
        format!("Last occurred: {}", format_display(&error.last_occurred)),
    ))
}

fn affected_servers_impact(servers: &[String]) -> String {
    if servers.is_empty() {
        "Virtual servers affected: unknown".to_string()
    } else {
        format!("Affected: {}", servers.join(", "))
    }
}
