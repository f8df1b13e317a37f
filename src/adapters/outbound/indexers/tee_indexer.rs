use crate::ports::outbound::LogIndexer;
use crate::qkview_analysis::domain::LogRecord;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// TeeIndexer adapter forwarding every record to two indexers
///
/// The primary always receives the record first, so a failing secondary
/// (a remote search index) never costs the primary (the in-memory store
/// used for analysis) any records. The first error is returned.
pub struct TeeIndexer {
    primary: Arc<dyn LogIndexer>,
    secondary: Arc<dyn LogIndexer>,
}

impl TeeIndexer {
    pub fn new(primary: Arc<dyn LogIndexer>, secondary: Arc<dyn LogIndexer>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl LogIndexer for TeeIndexer {
    async fn index(&self, record: &LogRecord) -> Result<()> {
        let primary = self.primary.index(record).await;
        let secondary = self.secondary.index(record).await;
        primary.and(secondary)
    }

    async fn index_batch(&self, records: &[LogRecord]) -> Result<()> {
        let primary = self.primary.index_batch(records).await;
        let secondary = self.secondary.index_batch(records).await;
        primary.and(secondary)
    }

    async fn close(&self) -> Result<()> {
        let primary = self.primary.close().await;
        let secondary = self.secondary.close().await;
        primary.and(secondary)
    }
}
