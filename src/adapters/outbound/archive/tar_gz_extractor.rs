use crate::ports::outbound::ArchiveExtractor;
use crate::shared::error::QkviewError;
use crate::shared::security::{validate_archive_entry_path, validate_regular_file};
use crate::shared::Result;
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use tar::Archive;
use tracing::{debug, warn};

/// TarGzExtractor adapter unpacking gzip-compressed tar qkviews
///
/// Only regular files and directories are materialized; links and special
/// entries are skipped. Any entry whose path would land outside the
/// destination aborts the extraction.
pub struct TarGzExtractor;

impl TarGzExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extraction_error(archive: &Path, details: impl ToString) -> anyhow::Error {
        QkviewError::ArchiveExtractionError {
            path: archive.to_path_buf(),
            details: details.to_string(),
        }
        .into()
    }
}

impl Default for TarGzExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveExtractor for TarGzExtractor {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<usize> {
        validate_regular_file(archive, "qkview archive")?;

        let file = File::open(archive).map_err(|e| Self::extraction_error(archive, e))?;
        let mut tar = Archive::new(GzDecoder::new(BufReader::new(file)));
        let entries = tar
            .entries()
            .map_err(|e| Self::extraction_error(archive, e))?;

        let mut files_written = 0;
        for entry in entries {
            let mut entry = entry.map_err(|e| Self::extraction_error(archive, e))?;
            let entry_path = entry
                .path()
                .map_err(|e| Self::extraction_error(archive, e))?
                .into_owned();

            validate_archive_entry_path(&entry_path)?;
            let out_path = destination.join(&entry_path);
            let entry_type = entry.header().entry_type();

            if entry_type.is_dir() {
                fs::create_dir_all(&out_path).map_err(|e| {
                    Self::extraction_error(archive, format!("{}: {}", out_path.display(), e))
                })?;
            } else if entry_type.is_file() {
                if let Some(parent) = out_path.parent() {
                    fs::create_dir_all(parent).map_err(|e| {
                        Self::extraction_error(archive, format!("{}: {}", parent.display(), e))
                    })?;
                }
                entry.unpack(&out_path).map_err(|e| {
                    Self::extraction_error(archive, format!("{}: {}", out_path.display(), e))
                })?;
                files_written += 1;
            } else {
                warn!(
                    entry = %entry_path.display(),
                    "Skipping non-regular archive entry"
                );
            }
        }

        debug!(
            archive = %archive.display(),
            files = files_written,
            "Archive extracted"
        );
        Ok(files_written)
    }
}
