use crate::ports::outbound::ReportFormatter;
use crate::qkview_analysis::domain::{
    AnalysisResult, Recommendation, SslFinding, Summary, TimelineEntry, TopError,
    VirtualServerInfo,
};
use crate::shared::text::format_display;
use crate::shared::Result;

/// Markdown table header for virtual server health
const VS_TABLE_HEADER: &str = "| Virtual Server | Pool | Status | Active Members | Last Error |\n";

/// Markdown table separator line for virtual server health
const VS_TABLE_SEPARATOR: &str = "|----------------|------|--------|----------------|------------|\n";

/// Markdown table header for recurring errors
const ERROR_TABLE_HEADER: &str = "| Count | Last Occurred | Message |\n";

/// Markdown table separator line for recurring errors
const ERROR_TABLE_SEPARATOR: &str = "|-------|---------------|---------|\n";

/// MarkdownFormatter adapter for a human-readable diagnostic report
///
/// Renders the same data as the JSON report, minus the raw entry logs.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String) {
        output.push_str("# qkview Diagnostic Report\n\n");
    }

    fn render_summary(&self, output: &mut String, summary: &Summary) {
        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "- 🔴 Critical virtual servers: {}\n",
            summary.critical
        ));
        output.push_str(&format!(
            "- 🟡 Warning virtual servers: {}\n",
            summary.warning
        ));
        output.push_str(&format!(
            "- 🟢 Healthy virtual servers: {}\n",
            summary.healthy
        ));
        output.push_str(&format!(
            "- Certificate findings: {}\n\n",
            summary.certs_expiring_soon
        ));
    }

    fn render_virtual_servers(&self, output: &mut String, servers: &[VirtualServerInfo]) {
        output.push_str("## Virtual Servers\n\n");
        if servers.is_empty() {
            output.push_str("*No virtual servers found in bigip.conf*\n\n");
            return;
        }

        output.push_str(VS_TABLE_HEADER);
        output.push_str(VS_TABLE_SEPARATOR);
        for vs in servers {
            let pool = if vs.pool.is_empty() { "-" } else { &vs.pool };
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&vs.name),
                Self::escape_markdown_table_cell(pool),
                vs.status,
                vs.active_members,
                Self::escape_markdown_table_cell(vs.last_error.as_deref().unwrap_or("")),
            ));
        }
        output.push('\n');
    }

    fn render_ssl_findings(&self, output: &mut String, findings: &[SslFinding]) {
        output.push_str("## SSL Findings\n\n");
        if findings.is_empty() {
            output.push_str("*No SSL/TLS issues detected*\n\n");
            return;
        }

        for finding in findings {
            output.push_str(&format!(
                "- **[{}] {}** ({})\n",
                finding.severity.as_str().to_uppercase(),
                finding.message,
                finding.finding_type.as_str()
            ));
            output.push_str(&format!("  - {}\n", finding.detail.replace('\n', " ")));
            if !finding.affected_virtual_servers.is_empty() {
                output.push_str(&format!(
                    "  - Affected virtual servers: {}\n",
                    finding.affected_virtual_servers.join(", ")
                ));
            }
        }
        output.push('\n');
    }

    fn render_top_errors(&self, output: &mut String, errors: &[TopError]) {
        output.push_str("## Top Errors\n\n");
        if errors.is_empty() {
            output.push_str("*No recurring errors*\n\n");
            return;
        }

        output.push_str(ERROR_TABLE_HEADER);
        output.push_str(ERROR_TABLE_SEPARATOR);
        for error in errors {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                error.count,
                format_display(&error.last_occurred),
                Self::escape_markdown_table_cell(&error.message)
            ));
        }
        output.push('\n');
    }

    fn render_timeline(&self, output: &mut String, timeline: &[TimelineEntry]) {
        output.push_str("## Error Timeline\n\n");
        if timeline.is_empty() {
            output.push_str("*No dated warnings or errors*\n\n");
            return;
        }

        output.push_str("| Date | Warnings and Errors |\n");
        output.push_str("|------|---------------------|\n");
        for entry in timeline {
            output.push_str(&format!("| {} | {} |\n", entry.date, entry.errors));
        }
        output.push('\n');
    }

    fn render_recommendations(&self, output: &mut String, recommendations: &[Recommendation]) {
        output.push_str("## Recommendations\n\n");
        if recommendations.is_empty() {
            output.push_str("*No action required*\n\n");
            return;
        }

        for (i, rec) in recommendations.iter().enumerate() {
            output.push_str(&format!(
                "{}. **[{}] {}**\n",
                i + 1,
                rec.priority.as_str().to_uppercase(),
                rec.title
            ));
            output.push_str(&format!("   - {}\n", rec.description));
            output.push_str(&format!("   - Impact: {}\n", rec.impact));
        }
        output.push('\n');
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output);
        self.render_summary(&mut output, &result.summary);
        self.render_virtual_servers(&mut output, &result.virtual_servers);
        self.render_ssl_findings(&mut output, &result.ssl_findings);
        self.render_top_errors(&mut output, &result.top_errors);
        self.render_timeline(&mut output, &result.error_timeline);
        self.render_recommendations(&mut output, &result.recommendations);

        Ok(output)
    }
}
