use std::path::PathBuf;

/// AnalysisRequest - Internal request DTO for the analysis use case
///
/// Carries the settings that vary per run. Which archives are analyzed is
/// decided by the injected event source, not by this request.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    /// Keep the extraction directory after the run instead of deleting it
    pub keep_extracted: bool,
    /// Parent directory for extraction; system temp dir when `None`
    pub work_dir: Option<PathBuf>,
}

impl AnalysisRequest {
    pub fn new(keep_extracted: bool) -> Self {
        Self {
            keep_extracted,
            work_dir: None,
        }
    }

    pub fn with_work_dir(mut self, work_dir: PathBuf) -> Self {
        self.work_dir = Some(work_dir);
        self
    }
}
