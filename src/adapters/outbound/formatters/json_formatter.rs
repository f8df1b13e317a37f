use crate::ports::outbound::ReportFormatter;
use crate::qkview_analysis::domain::AnalysisResult;
use crate::shared::Result;

/// JsonFormatter adapter producing the `metadata.json` report document
///
/// Field names and nesting follow the serde attributes of the domain types.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }
}
