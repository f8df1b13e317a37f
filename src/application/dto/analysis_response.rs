use crate::qkview_analysis::domain::AnalysisResult;
use std::path::PathBuf;

/// AnalysisResponse - Result of one analysis run plus ingestion counters
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    pub result: AnalysisResult,
    /// Lines that classified into records, across all archives
    pub records_found: usize,
    /// Records the indexer accepted
    pub records_indexed: usize,
    /// Problems that did not abort the run
    pub non_fatal_errors: Vec<String>,
    /// Where archives were unpacked, when kept
    pub extraction_dir: Option<PathBuf>,
}

impl AnalysisResponse {
    pub fn new(result: AnalysisResult) -> Self {
        Self {
            result,
            records_found: 0,
            records_indexed: 0,
            non_fatal_errors: Vec::new(),
            extraction_dir: None,
        }
    }
}
