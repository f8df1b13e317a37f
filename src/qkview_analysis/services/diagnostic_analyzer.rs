use super::{
    ErrorAnalyzer, RecommendationEngine, SslAnalyzer, SummaryAggregator, TimelineBuilder,
    VirtualServerAnalyzer,
};
use crate::qkview_analysis::domain::{AnalysisResult, DeviceConfig, EntryLog, LogRecord};
use crate::shared::text::format_iso;

/// Runs every analyzer over one archive's records and assembles the report
///
/// Order is fixed: timeline, SSL, errors, virtual servers, summary, log
/// pass-through, recommendations. Later stages consume earlier outputs.
pub struct DiagnosticAnalyzer {
    timeline_builder: TimelineBuilder,
    ssl_analyzer: SslAnalyzer,
    error_analyzer: ErrorAnalyzer,
    virtual_server_analyzer: VirtualServerAnalyzer,
    summary_aggregator: SummaryAggregator,
    recommendation_engine: RecommendationEngine,
}

impl DiagnosticAnalyzer {
    pub fn new() -> Self {
        Self {
            timeline_builder: TimelineBuilder::new(),
            ssl_analyzer: SslAnalyzer::new(),
            error_analyzer: ErrorAnalyzer::new(),
            virtual_server_analyzer: VirtualServerAnalyzer::new(),
            summary_aggregator: SummaryAggregator::new(),
            recommendation_engine: RecommendationEngine::new(),
        }
    }

    pub fn analyze(&self, records: &[LogRecord], config: Option<&DeviceConfig>) -> AnalysisResult {
        let error_timeline = self.timeline_builder.build(records);
        let ssl_findings = self.ssl_analyzer.analyze(records);
        let top_errors = self.error_analyzer.analyze(records);
        let virtual_servers = self.virtual_server_analyzer.analyze(config, records);
        let summary = self
            .summary_aggregator
            .aggregate(&virtual_servers, &ssl_findings);
        let entry_logs = records.iter().map(entry_log).collect();
        let recommendations =
            self.recommendation_engine
                .generate(&summary, &ssl_findings, &top_errors);

        AnalysisResult {
            summary,
            error_timeline,
            ssl_findings,
            top_errors,
            recommendations,
            virtual_servers,
            entry_logs,
        }
    }
}

impl Default for DiagnosticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn entry_log(record: &LogRecord) -> EntryLog {
    EntryLog {
        message: record.line().to_string(),
        level: record.severity().as_str().to_string(),
        date: format_iso(&record.timestamp()),
    }
}
