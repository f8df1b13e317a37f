use async_trait::async_trait;
use qkview_analyzer::prelude::*;
use std::path::{Path, PathBuf};

/// StorageBackend serving objects from a local directory, keyed by relative path
pub struct DirectoryStorage {
    root: PathBuf,
}

impl DirectoryStorage {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

#[async_trait]
impl StorageBackend for DirectoryStorage {
    async fn download(&self, _bucket: &str, key: &str) -> Result<Vec<u8>> {
        Ok(std::fs::read(self.root.join(key))?)
    }

    async fn download_to_file(&self, _bucket: &str, key: &str, destination: &Path) -> Result<()> {
        std::fs::copy(self.root.join(key), destination)?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
