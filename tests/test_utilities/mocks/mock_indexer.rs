use async_trait::async_trait;
use qkview_analyzer::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// LogIndexer recording batch sizes, optionally rejecting everything
#[derive(Default)]
pub struct RecordingIndexer {
    pub batches: Mutex<Vec<usize>>,
    pub closed: AtomicBool,
    pub fail: bool,
}

impl RecordingIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn total(&self) -> usize {
        self.batches.lock().unwrap().iter().sum()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogIndexer for RecordingIndexer {
    async fn index(&self, record: &LogRecord) -> Result<()> {
        self.index_batch(std::slice::from_ref(record)).await
    }

    async fn index_batch(&self, records: &[LogRecord]) -> Result<()> {
        if self.fail {
            anyhow::bail!("remote index rejected {} record(s)", records.len());
        }
        self.batches.lock().unwrap().push(records.len());
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
