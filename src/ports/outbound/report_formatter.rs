use crate::qkview_analysis::domain::AnalysisResult;
use crate::shared::Result;

/// ReportFormatter port for rendering an analysis report
///
/// This port abstracts the output encoding (JSON, Markdown, etc.).
pub trait ReportFormatter {
    /// Renders the result
    ///
    /// # Arguments
    /// * `result` - The complete analysis result
    ///
    /// # Returns
    /// Formatted report content as a string
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, result: &AnalysisResult) -> Result<String>;
}
