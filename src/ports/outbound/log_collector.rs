use crate::qkview_analysis::domain::{DeviceConfig, LogRecord};
use crate::qkview_analysis::services::ConfigParseOutcome;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// Log files found under an extraction root
#[derive(Debug, Clone, Default)]
pub struct LogFileDiscovery {
    /// Text log files, in walk order
    pub files: Vec<PathBuf>,
    /// Entries that could not be inspected or were skipped for a reason worth reporting
    pub non_fatal_errors: Vec<String>,
}

/// Everything read out of one extracted qkview
#[derive(Debug, Clone, Default)]
pub struct CollectedLogs {
    /// Classified records in walk order, then line order
    pub records: Vec<LogRecord>,
    /// Parsed bigip.conf, `None` when the archive has none
    pub config: Option<DeviceConfig>,
    /// Problems that did not stop collection (unreadable file, config issue)
    pub non_fatal_errors: Vec<String>,
}

/// LogCollector port turning an extracted archive into classified records
///
/// Implementations decide which files are logs, read them, and keep only
/// lines that classify. The steps are exposed separately so callers can
/// report per-file progress.
pub trait LogCollector {
    /// Parses the device configuration shipped in the archive
    ///
    /// # Returns
    /// `None` when the archive carries no configuration file
    ///
    /// # Errors
    /// Returns an error if the configuration file exists but cannot be read
    fn read_device_config(&self, extraction_root: &Path) -> Result<Option<ConfigParseOutcome>>;

    /// Lists the text log files to read
    ///
    /// # Errors
    /// Returns an error if the root has no `var/log` directory
    fn discover_log_files(&self, extraction_root: &Path) -> Result<LogFileDiscovery>;

    /// Reads one log file and keeps the lines that classify
    ///
    /// # Arguments
    /// * `path` - Log file to read
    /// * `source` - Archive identifier stamped on every record
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or read
    fn read_log_file(&self, path: &Path, source: &str) -> Result<Vec<LogRecord>>;

    /// Runs all three steps without progress reporting
    ///
    /// Configuration problems and unreadable log files are downgraded to
    /// non-fatal errors; only a missing `var/log` fails the call.
    fn collect(&self, extraction_root: &Path, source: &str) -> Result<CollectedLogs> {
        let mut collected = CollectedLogs::default();

        match self.read_device_config(extraction_root) {
            Ok(Some(outcome)) => {
                collected.non_fatal_errors.extend(
                    outcome
                        .issues
                        .iter()
                        .map(|issue| format!("bigip.conf: {}", issue)),
                );
                collected.config = Some(outcome.config);
            }
            Ok(None) => {}
            Err(e) => collected.non_fatal_errors.push(e.to_string()),
        }

        let discovery = self.discover_log_files(extraction_root)?;
        collected.non_fatal_errors.extend(discovery.non_fatal_errors);

        for file in &discovery.files {
            match self.read_log_file(file, source) {
                Ok(records) => collected.records.extend(records),
                Err(e) => collected.non_fatal_errors.push(e.to_string()),
            }
        }

        Ok(collected)
    }
}
