use crate::shared::Result;
use std::path::Path;

/// ArchiveExtractor port for unpacking a qkview archive
///
/// This port abstracts how the compressed bundle becomes a directory tree
/// that the log collector can walk.
pub trait ArchiveExtractor {
    /// Extracts `archive` into `destination`
    ///
    /// # Arguments
    /// * `archive` - Path to the qkview archive
    /// * `destination` - Existing directory to unpack into
    ///
    /// # Returns
    /// The number of regular files written
    ///
    /// # Errors
    /// Returns an error if:
    /// - The archive cannot be opened or is not a gzip-compressed tar
    /// - An entry path would escape `destination`
    /// - A file cannot be written
    fn extract(&self, archive: &Path, destination: &Path) -> Result<usize>;
}
