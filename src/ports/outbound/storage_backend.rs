use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// StorageBackend port for fetching archives
///
/// Abstracts where an archive named by an event lives (local disk, an
/// object store). Implementations must be `Send + Sync`.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Reads the whole object into memory
    ///
    /// # Errors
    /// Returns an error if the object does not exist or cannot be read
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Copies the object to `destination`
    ///
    /// # Arguments
    /// * `bucket` - Container the object lives in
    /// * `key` - Object key
    /// * `destination` - Local file path to write
    ///
    /// # Errors
    /// Returns an error if the object cannot be read or the file cannot be written
    async fn download_to_file(&self, bucket: &str, key: &str, destination: &Path) -> Result<()>;

    /// Releases any held connections
    async fn close(&self) -> Result<()>;
}
