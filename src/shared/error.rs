use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes let scripts tell a clean report apart from one that carries
/// critical findings, and both apart from a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Report produced; no critical findings, or `--fail-on-critical` not set
    Success = 0,
    /// Report produced with critical findings and `--fail-on-critical` set
    CriticalFindings = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unreadable archive, missing logs, I/O failure, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::CriticalFindings => write!(f, "Critical Findings (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Failures of the ingestion and output layers.
///
/// The analysis core never produces these; they come from archive handling,
/// the filesystem and remote indexers.
#[derive(Debug, Error)]
pub enum QkviewError {
    #[error("qkview archive not found: {path}\n\n💡 Hint: {suggestion}")]
    ArchiveNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to extract qkview archive: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file is a gzip-compressed tar archive (.tar.gz / .tgz / .qkview)")]
    ArchiveExtractionError { path: PathBuf, details: String },

    #[error("Log directory not found: {path}\n\n💡 Hint: A qkview archive must contain var/log; make sure the archive was produced by the qkview utility")]
    LogDirectoryNotFound { path: PathBuf },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid archive path: {path}\nReason: {reason}\n\n💡 Hint: Please pass the path of a qkview archive file with --file")]
    InvalidArchivePath { path: PathBuf, reason: String },

    /// Validation error for configuration and request values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    #[error("Log indexer error: {details}\n\n💡 Hint: Check the Elasticsearch URL, index name and credentials")]
    IndexerError { details: String },
}
