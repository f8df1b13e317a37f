use crate::ports::outbound::LogIndexer;
use crate::qkview_analysis::domain::LogRecord;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// MemoryIndexer adapter keeping every indexed record in memory
///
/// The analysis stage reads its records back from here.
pub struct MemoryIndexer {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryIndexer {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        // A panic while pushing cannot leave the Vec half-written
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of every record indexed so far, in arrival order
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Default for MemoryIndexer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogIndexer for MemoryIndexer {
    async fn index(&self, record: &LogRecord) -> Result<()> {
        self.lock().push(record.clone());
        Ok(())
    }

    async fn index_batch(&self, records: &[LogRecord]) -> Result<()> {
        self.lock().extend_from_slice(records);
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
