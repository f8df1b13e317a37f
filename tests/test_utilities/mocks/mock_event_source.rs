use async_trait::async_trait;
use qkview_analyzer::prelude::*;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock EventSource announcing a fixed list of object keys
pub struct MockEventSource {
    events: Mutex<VecDeque<ArchiveEvent>>,
}

impl MockEventSource {
    pub fn new(bucket: &str, keys: &[&str]) -> Self {
        Self {
            events: Mutex::new(
                keys.iter()
                    .map(|key| ArchiveEvent::new(bucket, *key))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl EventSource for MockEventSource {
    async fn next_event(&self) -> Result<Option<ArchiveEvent>> {
        Ok(self.events.lock().unwrap().pop_front())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
