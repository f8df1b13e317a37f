use crate::qkview_analysis::domain::LogRecord;
use crate::shared::Result;
use async_trait::async_trait;

/// LogIndexer port receiving every classified log record
///
/// The in-memory implementation keeps records for analysis; remote
/// implementations ship them to a search index.
#[async_trait]
pub trait LogIndexer: Send + Sync {
    /// Indexes one record
    ///
    /// # Errors
    /// Returns an error if the record could not be accepted
    async fn index(&self, record: &LogRecord) -> Result<()>;

    /// Indexes several records at once
    ///
    /// # Errors
    /// Returns an error if any record could not be accepted
    async fn index_batch(&self, records: &[LogRecord]) -> Result<()> {
        for record in records {
            self.index(record).await?;
        }
        Ok(())
    }

    /// Flushes pending work and releases resources
    async fn close(&self) -> Result<()>;
}
