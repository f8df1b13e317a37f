use crate::ports::outbound::{ArchiveEvent, EventSource};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Bucket name reported for local events
pub const LOCAL_BUCKET: &str = "local";

/// LocalEventSource adapter announcing one archive from the command line
///
/// Yields a single event for the configured file and is drained afterwards.
pub struct LocalEventSource {
    archive_path: PathBuf,
    fired: AtomicBool,
}

impl LocalEventSource {
    pub fn new(archive_path: PathBuf) -> Self {
        Self {
            archive_path,
            fired: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EventSource for LocalEventSource {
    async fn next_event(&self) -> Result<Option<ArchiveEvent>> {
        if self.fired.swap(true, Ordering::SeqCst) {
            return Ok(None);
        }

        let mut event = ArchiveEvent::new(LOCAL_BUCKET, self.archive_path.to_string_lossy());
        let file_name = self
            .archive_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        event.metadata.insert("filename".to_string(), file_name);
        event.metadata.insert("mode".to_string(), "local".to_string());
        Ok(Some(event))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
