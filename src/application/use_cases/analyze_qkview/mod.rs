use crate::adapters::outbound::indexers::MemoryIndexer;
use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::ports::inbound::QkviewAnalysisPort;
use crate::ports::outbound::{
    ArchiveEvent, ArchiveExtractor, EventSource, LogCollector, LogIndexer, ProgressReporter,
    StorageBackend,
};
use crate::qkview_analysis::domain::DeviceConfig;
use crate::qkview_analysis::services::DiagnosticAnalyzer;
use crate::shared::error::QkviewError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Prefix of the per-archive working directory
const WORKSPACE_PREFIX: &str = "qkview-";

/// Name of the directory the archive is unpacked into
const EXTRACTED_DIR: &str = "extracted";

/// File name used when an event key carries no usable name
const FALLBACK_ARCHIVE_NAME: &str = "archive.qkview";

/// Running totals across all archives of one run
#[derive(Debug, Default)]
struct IngestionState {
    config: Option<DeviceConfig>,
    records_found: usize,
    records_indexed: usize,
    non_fatal_errors: Vec<String>,
    extraction_dir: Option<PathBuf>,
}

/// AnalyzeQkviewUseCase - Core use case for qkview ingestion and analysis
///
/// Drains the event source, unpacks every announced archive, classifies its
/// log lines and hands the records to the indexer. Once every event is
/// processed the records gathered in memory are analyzed in one batch.
///
/// # Type Parameters
/// * `EV` - EventSource implementation
/// * `ST` - StorageBackend implementation
/// * `EX` - ArchiveExtractor implementation
/// * `LC` - LogCollector implementation
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeQkviewUseCase<EV, ST, EX, LC, PR> {
    event_source: EV,
    storage: ST,
    extractor: EX,
    collector: LC,
    progress_reporter: PR,
    memory: Arc<MemoryIndexer>,
    indexer: Arc<dyn LogIndexer>,
}

impl<EV, ST, EX, LC, PR> AnalyzeQkviewUseCase<EV, ST, EX, LC, PR>
where
    EV: EventSource,
    ST: StorageBackend,
    EX: ArchiveExtractor,
    LC: LogCollector,
    PR: ProgressReporter,
{
    /// Creates a new use case with injected dependencies
    ///
    /// `indexer` receives every record; it must deliver them to `memory`
    /// (directly, or through a tee) for the analysis stage to see them.
    pub fn new(
        event_source: EV,
        storage: ST,
        extractor: EX,
        collector: LC,
        progress_reporter: PR,
        memory: Arc<MemoryIndexer>,
        indexer: Arc<dyn LogIndexer>,
    ) -> Self {
        Self {
            event_source,
            storage,
            extractor,
            collector,
            progress_reporter,
            memory,
            indexer,
        }
    }

    /// Executes ingestion followed by analysis
    ///
    /// # Arguments
    /// * `request` - Extraction settings for this run
    ///
    /// # Returns
    /// AnalysisResponse with the report and ingestion counters
    pub async fn execute(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        let mut state = IngestionState::default();

        // Step 1: Ingest every announced archive
        while let Some(event) = self.event_source.next_event().await? {
            self.process_event(&event, &request, &mut state).await?;
        }

        // Step 2: Flush and release collaborators
        if let Err(e) = self.indexer.close().await {
            tracing::warn!(error = %e, "indexer did not flush cleanly");
            state.non_fatal_errors.push(e.to_string());
        }
        self.event_source.close().await?;
        self.storage.close().await?;

        // Step 3: Analyze what reached memory
        let records = self.memory.records();
        tracing::info!(records = records.len(), "running analysis");
        self.progress_reporter.report(&format!(
            "🔍 Analyzing {} log record(s)...",
            records.len()
        ));
        let result = DiagnosticAnalyzer::new().analyze(&records, state.config.as_ref());

        self.progress_reporter.report_completion("✅ Analysis complete");

        Ok(AnalysisResponse {
            result,
            records_found: state.records_found,
            records_indexed: state.records_indexed,
            non_fatal_errors: state.non_fatal_errors,
            extraction_dir: state.extraction_dir,
        })
    }

    /// Downloads, unpacks and ingests one archive
    async fn process_event(
        &self,
        event: &ArchiveEvent,
        request: &AnalysisRequest,
        state: &mut IngestionState,
    ) -> Result<()> {
        let archive_name = Self::archive_file_name(event);
        tracing::info!(bucket = %event.bucket, key = %event.key, "processing archive");
        self.progress_reporter
            .report(&format!("📦 Processing archive: {}", archive_name));

        let workspace = Self::create_workspace(request.work_dir.as_deref())?;
        let archive_path = workspace.path().join(&archive_name);
        self.storage
            .download_to_file(&event.bucket, &event.key, &archive_path)
            .await?;

        let extraction_root = workspace.path().join(EXTRACTED_DIR);
        std::fs::create_dir_all(&extraction_root).map_err(|e| QkviewError::FileWriteError {
            path: extraction_root.clone(),
            details: e.to_string(),
        })?;
        let extracted = self.extractor.extract(&archive_path, &extraction_root)?;
        tracing::debug!(files = extracted, root = %extraction_root.display(), "archive extracted");
        self.progress_reporter
            .report(&format!("   Extracted {} file(s)", extracted));

        self.load_device_config(&extraction_root, state);
        self.ingest_logs(&extraction_root, &archive_name, state)
            .await?;

        if request.keep_extracted {
            let kept = workspace.keep();
            self.progress_reporter
                .report(&format!("📁 Extracted files kept in {}", kept.display()));
            state.extraction_dir = Some(kept);
        }

        Ok(())
    }

    fn load_device_config(&self, extraction_root: &Path, state: &mut IngestionState) {
        match self.collector.read_device_config(extraction_root) {
            Ok(Some(outcome)) => {
                state.non_fatal_errors.extend(
                    outcome
                        .issues
                        .iter()
                        .map(|issue| format!("bigip.conf: {}", issue)),
                );
                tracing::debug!(
                    virtual_servers = outcome.config.virtual_servers.len(),
                    pools = outcome.config.pools.len(),
                    "device configuration parsed"
                );
                state.config = Some(outcome.config);
            }
            Ok(None) => tracing::debug!("archive has no bigip.conf"),
            Err(e) => {
                tracing::warn!(error = %e, "device configuration unreadable");
                state.non_fatal_errors.push(e.to_string());
            }
        }
    }

    async fn ingest_logs(
        &self,
        extraction_root: &Path,
        source: &str,
        state: &mut IngestionState,
    ) -> Result<()> {
        let discovery = self.collector.discover_log_files(extraction_root)?;
        state.non_fatal_errors.extend(discovery.non_fatal_errors);

        let total = discovery.files.len();
        self.progress_reporter
            .report(&format!("📖 Scanning {} log file(s)...", total));

        for (idx, file) in discovery.files.iter().enumerate() {
            let label = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
            self.progress_reporter
                .report_progress(idx + 1, total, label.as_deref());

            let records = match self.collector.read_log_file(file, source) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %e, "log file skipped");
                    state.non_fatal_errors.push(e.to_string());
                    continue;
                }
            };
            tracing::debug!(file = %file.display(), records = records.len(), "log file classified");
            state.records_found += records.len();

            if records.is_empty() {
                continue;
            }
            match self.indexer.index_batch(&records).await {
                Ok(()) => state.records_indexed += records.len(),
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %e, "indexing failed");
                    state
                        .non_fatal_errors
                        .push(format!("{}: {}", file.display(), e));
                }
            }
        }

        self.progress_reporter.finish_progress();
        Ok(())
    }

    fn create_workspace(work_dir: Option<&Path>) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);
        let workspace = match work_dir {
            Some(dir) => builder.tempdir_in(dir),
            None => builder.tempdir(),
        };
        workspace.map_err(|e| {
            QkviewError::FileWriteError {
                path: work_dir
                    .map(Path::to_path_buf)
                    .unwrap_or_else(std::env::temp_dir),
                details: e.to_string(),
            }
            .into()
        })
    }

    /// Last key segment, unless it could name something outside the workspace
    fn archive_file_name(event: &ArchiveEvent) -> String {
        let name = event.file_name();
        if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
            FALLBACK_ARCHIVE_NAME.to_string()
        } else {
            name.to_string()
        }
    }
}

#[async_trait(?Send)]
impl<EV, ST, EX, LC, PR> QkviewAnalysisPort for AnalyzeQkviewUseCase<EV, ST, EX, LC, PR>
where
    EV: EventSource,
    ST: StorageBackend,
    EX: ArchiveExtractor,
    LC: LogCollector,
    PR: ProgressReporter,
{
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        self.execute(request).await
    }
}
