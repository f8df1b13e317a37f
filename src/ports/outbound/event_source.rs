use crate::shared::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Notification that an archive is ready to be analyzed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEvent {
    pub bucket: String,
    pub key: String,
    pub metadata: BTreeMap<String, String>,
}

impl ArchiveEvent {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Last `/`-separated segment of the key
    pub fn file_name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

/// EventSource port delivering archive events
///
/// Pull-based: callers ask for the next event until `None` says the source
/// is drained. A local source yields exactly one event; a message-queue
/// source may never drain.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Next pending event, or `None` when no more will arrive
    ///
    /// # Errors
    /// Returns an error if the underlying transport fails
    async fn next_event(&self) -> Result<Option<ArchiveEvent>>;

    /// Stops delivery and releases resources
    async fn close(&self) -> Result<()>;
}
