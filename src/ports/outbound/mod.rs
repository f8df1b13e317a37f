/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (archives, file system, search index, console).
pub mod archive_extractor;
pub mod event_source;
pub mod log_collector;
pub mod log_indexer;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;
pub mod storage_backend;

pub use archive_extractor::ArchiveExtractor;
pub use event_source::{ArchiveEvent, EventSource};
pub use log_collector::{CollectedLogs, LogCollector, LogFileDiscovery};
pub use log_indexer::LogIndexer;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
pub use storage_backend::StorageBackend;
