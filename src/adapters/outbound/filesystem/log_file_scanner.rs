use crate::ports::outbound::{LogCollector, LogFileDiscovery};
use crate::qkview_analysis::domain::LogRecord;
use crate::qkview_analysis::services::{
    ConfigParseOutcome, ConfigParser, DateParseOptions, LogClassifier,
};
use crate::shared::error::QkviewError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Bytes inspected when deciding whether a file is text
const BINARY_SNIFF_LEN: usize = 1024;

/// Directory names never descended into
const SKIPPED_DIRECTORIES: [&str; 1] = ["journal"];

/// File-name substrings always skipped
const SKIPPED_FILE_PATTERNS: [&str; 1] = ["audit"];

/// Settings for walking an extracted qkview
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub date_options: DateParseOptions,
    /// Extra file-name substrings to skip, on top of `audit`
    pub skip_patterns: Vec<String>,
    /// Larger log files are skipped with a warning
    pub max_file_size: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            date_options: DateParseOptions::default(),
            skip_patterns: Vec::new(),
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

/// LogFileScanner adapter reading bigip.conf and var/log from an extraction root
///
/// Implements the LogCollector port. Every line of every text log passes
/// through the LogClassifier; unclassifiable lines are dropped silently.
pub struct LogFileScanner {
    classifier: LogClassifier,
    config_parser: ConfigParser,
    skip_patterns: Vec<String>,
    max_file_size: u64,
}

impl LogFileScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            classifier: LogClassifier::new(options.date_options),
            config_parser: ConfigParser::new(),
            skip_patterns: options.skip_patterns,
            max_file_size: options.max_file_size,
        }
    }

    fn is_skipped_name(&self, file_name: &str) -> bool {
        SKIPPED_FILE_PATTERNS
            .iter()
            .any(|pattern| file_name.contains(pattern))
            || self
                .skip_patterns
                .iter()
                .any(|pattern| !pattern.is_empty() && file_name.contains(pattern.as_str()))
    }
}

impl Default for LogFileScanner {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}

impl LogCollector for LogFileScanner {
    fn read_device_config(&self, extraction_root: &Path) -> Result<Option<ConfigParseOutcome>> {
        let config_path = extraction_root.join("config").join("bigip.conf");
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No bigip.conf in archive");
            return Ok(None);
        }

        validate_regular_file(&config_path, "bigip.conf")?;
        let size = fs::metadata(&config_path)
            .map_err(|e| QkviewError::FileReadError {
                path: config_path.clone(),
                details: e.to_string(),
            })?
            .len();
        validate_file_size(size, &config_path, MAX_FILE_SIZE)?;

        let bytes = fs::read(&config_path).map_err(|e| QkviewError::FileReadError {
            path: config_path.clone(),
            details: e.to_string(),
        })?;
        let outcome = self.config_parser.parse(&String::from_utf8_lossy(&bytes));

        for issue in &outcome.issues {
            warn!(%issue, "bigip.conf parse issue");
        }
        debug!(
            virtual_servers = outcome.config.virtual_servers.len(),
            pools = outcome.config.pools.len(),
            "Parsed bigip.conf"
        );
        Ok(Some(outcome))
    }

    fn discover_log_files(&self, extraction_root: &Path) -> Result<LogFileDiscovery> {
        let log_dir = extraction_root.join("var").join("log");
        if !log_dir.is_dir() {
            return Err(QkviewError::LogDirectoryNotFound { path: log_dir }.into());
        }

        let mut discovery = LogFileDiscovery::default();
        let walker = WalkDir::new(&log_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir()
                    && SKIPPED_DIRECTORIES
                        .iter()
                        .any(|dir| entry.file_name() == *dir))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    discovery.non_fatal_errors.push(format!("walk error: {}", e));
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if self.is_skipped_name(&file_name) {
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    discovery
                        .non_fatal_errors
                        .push(format!("metadata error for {}: {}", entry.path().display(), e));
                    continue;
                }
            };
            if size == 0 {
                continue;
            }
            if size > self.max_file_size {
                warn!(
                    file = %entry.path().display(),
                    size,
                    max = self.max_file_size,
                    "Skipping log file over size limit"
                );
                discovery.non_fatal_errors.push(format!(
                    "skipped {}: {} bytes exceeds limit of {} bytes",
                    entry.path().display(),
                    size,
                    self.max_file_size
                ));
                continue;
            }

            match sniff_binary(entry.path()) {
                Ok(true) => debug!(file = %entry.path().display(), "Skipping binary file"),
                Ok(false) => discovery.files.push(entry.into_path()),
                Err(e) => discovery.non_fatal_errors.push(format!(
                    "binary check failed for {}: {}",
                    entry.path().display(),
                    e
                )),
            }
        }

        Ok(discovery)
    }

    fn read_log_file(&self, path: &Path, source: &str) -> Result<Vec<LogRecord>> {
        let file = File::open(path).map_err(|e| QkviewError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        let mut reader = BufReader::new(file);

        let mut records = Vec::new();
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            let read = reader
                .read_until(b'\n', &mut buffer)
                .map_err(|e| QkviewError::FileReadError {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                })?;
            if read == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buffer);
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(record) = self.classifier.to_record(path, line, source) {
                records.push(record);
            }
        }

        debug!(file = %path.display(), records = records.len(), "Classified log file");
        Ok(records)
    }
}

/// True when the leading bytes contain a control byte that never appears in text
///
/// Text bytes are BEL, BS, TAB, LF, FF, CR, ESC and everything from 0x20 up
/// except DEL.
pub fn is_binary(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .take(BINARY_SNIFF_LEN)
        .any(|&b| !is_text_byte(b))
}

fn is_text_byte(byte: u8) -> bool {
    matches!(byte, 7 | 8 | 9 | 10 | 12 | 13 | 27) || (byte >= 0x20 && byte != 0x7F)
}

fn sniff_binary(path: &Path) -> std::io::Result<bool> {
    let mut head = Vec::with_capacity(BINARY_SNIFF_LEN);
    File::open(path)?
        .take(BINARY_SNIFF_LEN as u64)
        .read_to_end(&mut head)?;
    Ok(is_binary(&head))
}
