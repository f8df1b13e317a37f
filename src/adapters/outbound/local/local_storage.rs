use crate::ports::outbound::StorageBackend;
use crate::shared::error::QkviewError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// LocalStorage adapter serving a single archive already on disk
///
/// Bucket and key are ignored: every download resolves to the file the
/// adapter was created with.
pub struct LocalStorage {
    archive_path: PathBuf,
}

impl LocalStorage {
    pub fn new(archive_path: PathBuf) -> Self {
        Self { archive_path }
    }

    fn read_error(&self, e: std::io::Error) -> anyhow::Error {
        if e.kind() == std::io::ErrorKind::NotFound {
            QkviewError::ArchiveNotFound {
                path: self.archive_path.clone(),
                suggestion: "Check the path passed with --file".to_string(),
            }
            .into()
        } else {
            QkviewError::FileReadError {
                path: self.archive_path.clone(),
                details: e.to_string(),
            }
            .into()
        }
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    async fn download(&self, _bucket: &str, _key: &str) -> Result<Vec<u8>> {
        tokio::fs::read(&self.archive_path)
            .await
            .map_err(|e| self.read_error(e))
    }

    async fn download_to_file(&self, _bucket: &str, _key: &str, destination: &Path) -> Result<()> {
        if destination == self.archive_path {
            return Ok(());
        }

        tokio::fs::copy(&self.archive_path, destination)
            .await
            .map_err(|e| self.read_error(e))?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_download_reads_archive() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("case.qkview");
        std::fs::write(&archive, b"bytes").unwrap();

        let storage = LocalStorage::new(archive);
        assert_eq!(storage.download("local", "ignored").await.unwrap(), b"bytes");
    }

    #[tokio::test]
    async fn test_download_to_file_copies() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("case.qkview");
        std::fs::write(&archive, b"bytes").unwrap();
        let destination = dir.path().join("copy.qkview");

        let storage = LocalStorage::new(archive.clone());
        storage
            .download_to_file("local", "case.qkview", &destination)
            .await
            .unwrap();
        assert_eq!(std::fs::read(&destination).unwrap(), b"bytes");

        // same path is a no-op
        storage
            .download_to_file("local", "case.qkview", &archive)
            .await
            .unwrap();
        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_archive_maps_to_not_found() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("missing.qkview"));
        let err = storage.download("local", "missing").await.unwrap_err();
        assert!(err.to_string().contains("qkview archive not found"));
    }
}
