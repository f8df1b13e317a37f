/// Mock implementations for testing
mod mock_event_source;
mod mock_indexer;
mod mock_progress_reporter;
mod mock_storage;

pub use mock_event_source::MockEventSource;
pub use mock_indexer::RecordingIndexer;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_storage::DirectoryStorage;
